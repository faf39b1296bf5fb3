use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusStatus {
    Active,
    Inactive,
}

impl fmt::Display for BusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusStatus::Active => write!(f, "Active"),
            BusStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for BusStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(BusStatus::Active),
            "inactive" => Ok(BusStatus::Inactive),
            _ => Err(format!(
                "Invalid bus status '{}'. Valid options: active, inactive",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub number: String,
    /// Not checked against existing routes.
    pub route_id: String,
    pub status: BusStatus,
}

impl Bus {
    pub fn new(number: impl Into<String>, route_id: impl Into<String>, status: BusStatus) -> Self {
        Self {
            number: number.into(),
            route_id: route_id.into(),
            status,
        }
    }
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (route {}, {})", self.number, self.route_id, self.status)
    }
}
