use citybus::{RouteDetail, RouteDetails};
use clap::{Args, Subcommand};

use super::{confirm, OutputFormat, Repo};
use crate::config::Config;

#[derive(Args)]
pub struct RouteCommand {
    #[command(subcommand)]
    pub command: RouteSubcommand,
}

#[derive(Subcommand)]
pub enum RouteSubcommand {
    /// List routes
    List {
        /// Only routes whose id, name, start or end contain this text
        #[arg(long, short)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show stops, schedule, live status and recent updates for a route
    Show {
        /// Route ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new route
    Add {
        /// Route ID
        id: String,

        /// Route name
        #[arg(long)]
        name: String,

        /// First stop
        #[arg(long)]
        start: String,

        /// Last stop
        #[arg(long)]
        end: String,

        /// Trip duration in minutes
        #[arg(long)]
        duration: u32,
    },

    /// Change a route's name, endpoints and duration
    Edit {
        /// Route ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New start
        #[arg(long)]
        start: Option<String>,

        /// New end
        #[arg(long)]
        end: Option<String>,

        /// New duration in minutes
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Delete a route with its updates and buses
    Delete {
        /// Route ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl RouteCommand {
    pub fn run(&self, repo: &Repo, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            RouteSubcommand::List { search, format } => {
                let routes = repo.search_routes(search.as_deref().unwrap_or_default())?;

                if routes.is_empty() {
                    println!("No routes found.");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&routes)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<8}  {:<36}  {:<40}  DURATION", "ID", "NAME", "START → END");
                        println!("{}", "-".repeat(100));
                        for route in &routes {
                            let endpoints = format!("{} → {}", route.start, route.end);
                            println!(
                                "{:<8}  {:<36}  {:<40}  ~{} min",
                                route.id, route.name, endpoints, route.duration
                            );
                        }
                        println!("\nTotal: {} route(s)", routes.len());
                    }
                }
                Ok(())
            }

            RouteSubcommand::Show { id, format } => {
                let detail = repo
                    .route_detail(id, config.recent_updates.value)?
                    .ok_or_else(|| format!("Route not found: {}", id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&detail)?);
                    }
                    OutputFormat::Text => print_detail(&detail),
                }
                Ok(())
            }

            RouteSubcommand::Add {
                id,
                name,
                start,
                end,
                duration,
            } => {
                repo.add_route(id, &RouteDetails::new(name, start, end, *duration))?;

                let created = repo
                    .route(id.trim())?
                    .ok_or_else(|| format!("Route not found: {}", id))?;
                println!("Created route:");
                println!("{}", created);
                Ok(())
            }

            RouteSubcommand::Edit {
                id,
                name,
                start,
                end,
                duration,
            } => {
                if name.is_none() && start.is_none() && end.is_none() && duration.is_none() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let route = repo
                    .route(id)?
                    .ok_or_else(|| format!("Route not found: {}", id))?;

                let details = RouteDetails::new(
                    name.clone().unwrap_or(route.name),
                    start.clone().unwrap_or(route.start),
                    end.clone().unwrap_or(route.end),
                    duration.unwrap_or(route.duration),
                );
                repo.edit_route(id, &details)?;

                let updated = repo
                    .route(id)?
                    .ok_or_else(|| format!("Route not found: {}", id))?;
                println!("Updated route:");
                println!("{}", updated);
                Ok(())
            }

            RouteSubcommand::Delete { id, force } => {
                let route = repo
                    .route(id)?
                    .ok_or_else(|| format!("Route not found: {}", id))?;

                if !force && !confirm(&format!("Delete route {} '{}'?", route.id, route.name))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                repo.delete_route(&route.id)?;
                println!("Deleted route: {}", route.id);
                Ok(())
            }
        }
    }
}

fn print_detail(detail: &RouteDetail) {
    print!("{}", detail.route);

    println!("\nSchedule:");
    println!("  {:<28}  EXPECTED TIME", "STOP");
    for stop in &detail.route.stops {
        println!("  {:<28}  {}", stop.name, stop.eta);
    }

    println!("\n{}", detail.live_status);
    println!("Last updated: {}", detail.last_updated);

    println!("\nRecent updates:");
    if detail.recent_updates.is_empty() {
        println!("  No recent updates.");
    } else {
        for update in &detail.recent_updates {
            println!("  {}", update);
        }
    }
}
