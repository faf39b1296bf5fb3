mod bus;
mod config_cmd;
mod dashboard;
mod route;
mod stop;
mod update;

pub use bus::BusCommand;
pub use config_cmd::ConfigCommand;
pub use dashboard::DashboardCommand;
pub use route::RouteCommand;
pub use stop::StopCommand;
pub use update::UpdateCommand;

use citybus::{CityBusRepository, FileStore};
use clap::ValueEnum;
use std::io::{self, Write};

/// Repository backed by the configured data directory.
pub type Repo = CityBusRepository<FileStore>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Asks a yes/no question on stdin. Anything but `y` means no.
fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
