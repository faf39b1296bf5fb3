//! Simulated bus position for a route.
//!
//! The position is not real telemetry: the bus is placed at stop index
//! `minute_of_hour % stop_count` and recomputed on every read.

use serde::Serialize;
use std::fmt;

use crate::models::Stop;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LiveStatus {
    NoStops,
    AtLastStop { index: usize, stop: String },
    Between { index: usize, from: String, to: String },
}

/// Index of the simulated position, or `None` for a route with no stops.
pub fn position_index(stop_count: usize, minute: u32) -> Option<usize> {
    if stop_count == 0 {
        None
    } else {
        Some(minute as usize % stop_count)
    }
}

pub fn live_status(stops: &[Stop], minute: u32) -> LiveStatus {
    let Some(index) = position_index(stops.len(), minute) else {
        return LiveStatus::NoStops;
    };

    if index == stops.len() - 1 {
        LiveStatus::AtLastStop {
            index,
            stop: stops[index].name.clone(),
        }
    } else {
        LiveStatus::Between {
            index,
            from: stops[index].name.clone(),
            to: stops[index + 1].name.clone(),
        }
    }
}

impl fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiveStatus::NoStops => write!(f, "No stops on this route"),
            LiveStatus::AtLastStop { stop, .. } => write!(f, "Bus is currently at {}", stop),
            LiveStatus::Between { from, to, .. } => {
                write!(f, "Bus is currently between {} and {}", from, to)
            }
        }
    }
}
