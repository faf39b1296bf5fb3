use serde::{Deserialize, Serialize};
use std::fmt;

/// A named point on a route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stop {
    pub name: String,
    /// Expected arrival, free-form display text. Empty means no ETA.
    #[serde(default)]
    pub eta: String,
}

impl Stop {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            eta: String::new(),
        }
    }

    pub fn with_eta(mut self, eta: impl Into<String>) -> Self {
        self.eta = eta.into();
        self
    }

    pub fn eta(&self) -> Option<&str> {
        if self.eta.is_empty() {
            None
        } else {
            Some(&self.eta)
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.eta() {
            Some(eta) => write!(f, "{} ({})", self.name, eta),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub duration: u32, // minutes
    pub stops: Vec<Stop>,
}

impl Route {
    /// Creates a route whose stop sequence is just its two endpoints.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        duration: u32,
    ) -> Self {
        let start = start.into();
        let end = end.into();
        Self {
            id: id.into(),
            name: name.into(),
            stops: vec![Stop::new(start.clone()), Stop::new(end.clone())],
            start,
            end,
            duration,
        }
    }

    pub fn with_stops(mut self, stops: Vec<Stop>) -> Self {
        self.stops = stops;
        self
    }

    /// Case-insensitive substring match over id, name, start and end.
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        [&self.id, &self.name, &self.start, &self.end]
            .iter()
            .any(|field| field.to_lowercase().contains(&filter))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{} – {}", self.id, self.name);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;
        writeln!(f, "{} → {}", self.start, self.end)?;
        writeln!(f, "~{} min", self.duration)?;

        if !self.stops.is_empty() {
            writeln!(f, "\nStops:")?;
            for (i, stop) in self.stops.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, stop)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_new_has_boundary_stops() {
        let route = Route::new("303", "X→Y", "X", "Y", 20);
        assert_eq!(route.stops, vec![Stop::new("X"), Stop::new("Y")]);
        assert!(route.stops.iter().all(|s| s.eta().is_none()));
    }

    #[test]
    fn test_route_matches_any_field() {
        let route = Route::new("101", "Central Station → Tech Park", "Central Station", "Tech Park", 34);
        assert!(route.matches("tech"));
        assert!(route.matches("10"));
        assert!(route.matches("  CENTRAL "));
        assert!(route.matches(""));
        assert!(!route.matches("university"));
    }

    #[test]
    fn test_stop_display() {
        assert_eq!(Stop::new("City Hall").with_eta("09:14").to_string(), "City Hall (09:14)");
        assert_eq!(Stop::new("City Hall").to_string(), "City Hall");
    }

    #[test]
    fn test_stop_missing_eta_deserializes_empty() {
        let stop: Stop = serde_json::from_str(r#"{"name":"Lakeview"}"#).unwrap();
        assert_eq!(stop.eta, "");
        assert_eq!(stop.eta(), None);
    }
}
