use citybus::BusStatus;
use clap::{Args, Subcommand, ValueEnum};

use super::{confirm, OutputFormat, Repo};

#[derive(Clone, Copy, ValueEnum)]
pub enum Status {
    Active,
    Inactive,
}

impl From<Status> for BusStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Active => BusStatus::Active,
            Status::Inactive => BusStatus::Inactive,
        }
    }
}

#[derive(Args)]
pub struct BusCommand {
    #[command(subcommand)]
    pub command: BusSubcommand,
}

#[derive(Subcommand)]
pub enum BusSubcommand {
    /// List all buses
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a bus to a route
    Add {
        /// Bus number
        number: String,

        /// Route ID the bus runs on
        #[arg(long)]
        route: String,

        /// Service status
        #[arg(long, value_enum, default_value = "active")]
        status: Status,
    },

    /// Delete a bus
    Delete {
        /// Bus number
        number: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl BusCommand {
    pub fn run(&self, repo: &Repo) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            BusSubcommand::List { format } => {
                let buses = repo.buses()?;

                if buses.is_empty() {
                    println!("No buses found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&buses)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<16}  {:<8}  STATUS", "NUMBER", "ROUTE");
                        println!("{}", "-".repeat(40));
                        for bus in &buses {
                            println!("{:<16}  {:<8}  {}", bus.number, bus.route_id, bus.status);
                        }
                        println!("\nTotal: {} bus(es)", buses.len());
                    }
                }
                Ok(())
            }

            BusSubcommand::Add {
                number,
                route,
                status,
            } => {
                repo.add_bus(number, route, (*status).into())?;
                println!("Added bus {} on route {}", number.trim(), route.trim());
                Ok(())
            }

            BusSubcommand::Delete { number, force } => {
                let exists = repo.buses()?.iter().any(|b| &b.number == number);
                if !exists {
                    return Err(format!("Bus not found: {}", number).into());
                }

                if !force && !confirm(&format!("Delete bus {}?", number))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                repo.delete_bus(number)?;
                println!("Deleted bus: {}", number);
                Ok(())
            }
        }
    }
}
