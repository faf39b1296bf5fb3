use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::bus::{Bus, BusStatus};
use super::route::{Route, Stop};
use super::update::Update;

/// Maximum number of updates kept per route; older entries are dropped first.
pub const MAX_UPDATES_PER_ROUTE: usize = 30;

/// The single persisted aggregate of routes, buses and updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Document {
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub buses: Vec<Bus>,
    #[serde(default)]
    pub updates: BTreeMap<String, Vec<Update>>,
}

impl Document {
    /// The sample network written on first load.
    pub fn seed() -> Self {
        let routes = vec![
            Route::new(
                "101",
                "Central Station → Tech Park",
                "Central Station",
                "Tech Park",
                34,
            )
            .with_stops(vec![
                Stop::new("Central Station").with_eta("09:00"),
                Stop::new("City Hall").with_eta("09:14"),
                Stop::new("Green Avenue").with_eta("09:22"),
                Stop::new("Tech Park").with_eta("09:34"),
            ]),
            Route::new("202", "Old Town → University", "Old Town", "University", 41).with_stops(
                vec![
                    Stop::new("Old Town").with_eta("13:20"),
                    Stop::new("Lakeview").with_eta("13:36"),
                    Stop::new("Library Rd").with_eta("13:48"),
                    Stop::new("University").with_eta("14:01"),
                ],
            ),
        ];

        let buses = vec![
            Bus::new("C-101A", "101", BusStatus::Active),
            Bus::new("U-202B", "202", BusStatus::Inactive),
        ];

        let updates = routes
            .iter()
            .map(|route| (route.id.clone(), Vec::new()))
            .collect();

        Self {
            routes,
            buses,
            updates,
        }
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn route_mut(&mut self, id: &str) -> Option<&mut Route> {
        self.routes.iter_mut().find(|r| r.id == id)
    }

    pub fn has_route(&self, id: &str) -> bool {
        self.route(id).is_some()
    }

    pub fn has_bus(&self, number: &str) -> bool {
        self.buses.iter().any(|b| b.number == number)
    }

    /// Updates for a route in chronological order. A missing list is empty.
    pub fn updates_for(&self, route_id: &str) -> &[Update] {
        self.updates
            .get(route_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Appends an update and trims the list to the newest
    /// [`MAX_UPDATES_PER_ROUTE`] entries.
    pub fn push_update(&mut self, route_id: &str, update: Update) {
        let list = self.updates.entry(route_id.to_string()).or_default();
        list.push(update);
        if list.len() > MAX_UPDATES_PER_ROUTE {
            let excess = list.len() - MAX_UPDATES_PER_ROUTE;
            list.drain(..excess);
        }
    }

    pub fn stop_count(&self) -> usize {
        self.routes.iter().map(|r| r.stops.len()).sum()
    }
}
