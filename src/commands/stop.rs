use citybus::MoveDirection;
use clap::{Args, Subcommand, ValueEnum};

use super::{confirm, Repo};

#[derive(Clone, Copy, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

#[derive(Args)]
pub struct StopCommand {
    #[command(subcommand)]
    pub command: StopSubcommand,
}

#[derive(Subcommand)]
pub enum StopSubcommand {
    /// List a route's stops in order
    List {
        /// Route ID
        route: String,
    },

    /// Append a stop to a route
    Add {
        /// Route ID
        route: String,

        /// Stop name
        name: String,

        /// Expected arrival time (e.g. 09:20)
        #[arg(long)]
        eta: Option<String>,
    },

    /// Move a stop one place up or down
    Move {
        /// Route ID
        route: String,

        /// Stop position, starting at 1
        position: usize,

        /// Direction to move
        #[arg(value_enum)]
        direction: Direction,
    },

    /// Remove a stop from a route
    Delete {
        /// Route ID
        route: String,

        /// Stop position, starting at 1
        position: usize,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

/// Converts a 1-based position from the command line to an index.
fn to_index(position: usize) -> Result<usize, Box<dyn std::error::Error>> {
    position
        .checked_sub(1)
        .ok_or_else(|| "Stop positions start at 1".into())
}

impl StopCommand {
    pub fn run(&self, repo: &Repo) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            StopSubcommand::List { route } => {
                let route = repo
                    .route(route)?
                    .ok_or_else(|| format!("Route not found: {}", route))?;

                println!("Stops for route {}", route.id);
                if route.stops.is_empty() {
                    println!("  (none)");
                }
                for (i, stop) in route.stops.iter().enumerate() {
                    println!("  {}. {}", i + 1, stop);
                }
                Ok(())
            }

            StopSubcommand::Add { route, name, eta } => {
                repo.add_stop(route, name, eta.as_deref())?;
                println!("Added stop '{}' to route {}", name.trim(), route);
                Ok(())
            }

            StopSubcommand::Move {
                route,
                position,
                direction,
            } => {
                let index = to_index(*position)?;
                repo.move_stop(route, index, (*direction).into())?;

                let route = repo
                    .route(route)?
                    .ok_or_else(|| format!("Route not found: {}", route))?;
                for (i, stop) in route.stops.iter().enumerate() {
                    println!("  {}. {}", i + 1, stop);
                }
                Ok(())
            }

            StopSubcommand::Delete {
                route,
                position,
                force,
            } => {
                let index = to_index(*position)?;
                let stop = repo
                    .route(route)?
                    .ok_or_else(|| format!("Route not found: {}", route))?
                    .stops
                    .get(index)
                    .cloned();

                if let Some(stop) = &stop {
                    if !force && !confirm(&format!("Delete stop '{}'?", stop.name))? {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                repo.delete_stop(route, index)?;
                println!("Deleted stop {} from route {}", position, route);
                Ok(())
            }
        }
    }
}
