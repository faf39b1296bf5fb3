use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ANONYMOUS: &str = "Anonymous";

fn anonymous() -> String {
    ANONYMOUS.to_string()
}

/// What a rider reports about the bus at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Arrived,
    Left,
    Delayed,
}

impl UpdateKind {
    /// Builds the display message for a report at `stop`, with an optional note.
    pub fn message(&self, stop: &str, note: Option<&str>) -> String {
        let mut message = match self {
            UpdateKind::Arrived => format!("Bus just arrived at {}", stop),
            UpdateKind::Left => format!("Bus just left {}", stop),
            UpdateKind::Delayed => format!("Bus delayed at {}", stop),
        };
        if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
            message.push_str(" — ");
            message.push_str(note);
        }
        message
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateKind::Arrived => write!(f, "arrived"),
            UpdateKind::Left => write!(f, "left"),
            UpdateKind::Delayed => write!(f, "delayed"),
        }
    }
}

impl FromStr for UpdateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arrived" => Ok(UpdateKind::Arrived),
            "left" => Ok(UpdateKind::Left),
            "delayed" => Ok(UpdateKind::Delayed),
            _ => Err(format!(
                "Invalid update type '{}'. Valid options: arrived, left, delayed",
                s
            )),
        }
    }
}

/// A crowd-sourced status note attached to a route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Update {
    #[serde(default = "anonymous")]
    pub name: String,
    pub message: String,
    pub time: String,
}

impl Update {
    /// Blank or missing reporter names become "Anonymous".
    pub fn new(name: Option<&str>, message: impl Into<String>, time: impl Into<String>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(anonymous);
        Self {
            name,
            message: message.into(),
            time: time.into(),
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.time, self.name, self.message)
    }
}
