use clap::Args;

use super::{OutputFormat, Repo};

#[derive(Args)]
pub struct DashboardCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DashboardCommand {
    pub fn run(&self, repo: &Repo) -> Result<(), Box<dyn std::error::Error>> {
        let stats = repo.dashboard()?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            OutputFormat::Text => {
                println!("Dashboard");
                println!("=========\n");
                println!("Total Routes: {}", stats.routes);
                println!("Total Buses:  {}", stats.buses);
                println!("Total Stops:  {}", stats.stops);
            }
        }
        Ok(())
    }
}
