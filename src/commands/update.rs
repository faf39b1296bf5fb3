use citybus::{UpdateKind, UpdateReport};
use clap::{Args, Subcommand};
use std::str::FromStr;

use super::Repo;

#[derive(Args)]
pub struct UpdateCommand {
    #[command(subcommand)]
    pub command: UpdateSubcommand,
}

#[derive(Subcommand)]
pub enum UpdateSubcommand {
    /// Report what the bus is doing at a stop
    Post {
        /// Route ID
        route: String,

        /// Update type: arrived, left or delayed
        #[arg(long)]
        kind: Option<String>,

        /// Stop name
        #[arg(long, default_value = "")]
        stop: String,

        /// Your name (optional)
        #[arg(long)]
        name: Option<String>,

        /// Short note (optional)
        #[arg(long)]
        note: Option<String>,
    },
}

impl UpdateCommand {
    pub fn run(&self, repo: &Repo) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UpdateSubcommand::Post {
                route,
                kind,
                stop,
                name,
                note,
            } => {
                let kind = kind
                    .as_deref()
                    .filter(|k| !k.trim().is_empty())
                    .map(UpdateKind::from_str)
                    .transpose()?;

                let report = UpdateReport {
                    name: name.as_deref(),
                    kind,
                    stop,
                    note: note.as_deref(),
                };
                repo.append_update(route, &report)?;

                if let Some(latest) = repo.recent_updates(route, 1)?.first() {
                    println!("Posted update:");
                    println!("  {}", latest);
                }
                Ok(())
            }
        }
    }
}
