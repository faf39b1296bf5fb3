//! Route, stop, bus and update operations over the persisted document.
//!
//! Every mutation follows the same cycle:
//! 1. Load the whole document from storage
//! 2. Validate the inputs against it
//! 3. Apply the change in memory
//! 4. Save the whole document back
//!
//! A failed validation returns before step 4, so storage is untouched.

mod error;

pub use error::{RepositoryError, ValidationError};

use serde::Serialize;

use crate::live_status::{live_status, LiveStatus};
use crate::models::{Bus, BusStatus, Document, Route, Stop, Update, UpdateKind};
use crate::store::{DocumentStore, KeyValueStore};
use crate::timestamp::{format_timestamp, Clock, SystemClock};

/// Editable fields of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDetails {
    pub name: String,
    pub start: String,
    pub end: String,
    pub duration: u32,
}

impl RouteDetails {
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        duration: u32,
    ) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
            duration,
        }
    }

    /// Trims text fields and rejects blanks or a zero duration.
    fn validated(&self) -> Result<RouteDetails, ValidationError> {
        let details = RouteDetails {
            name: self.name.trim().to_string(),
            start: self.start.trim().to_string(),
            end: self.end.trim().to_string(),
            duration: self.duration,
        };
        if details.name.is_empty()
            || details.start.is_empty()
            || details.end.is_empty()
            || details.duration == 0
        {
            return Err(ValidationError::MissingRouteFields);
        }
        Ok(details)
    }
}

/// Direction for [`CityBusRepository::move_stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the start of the route (index − 1).
    Up,
    /// Towards the end of the route (index + 1).
    Down,
}

impl MoveDirection {
    fn target(self, index: usize) -> Option<usize> {
        match self {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        }
    }
}

/// A rider's report for [`CityBusRepository::append_update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateReport<'a> {
    pub name: Option<&'a str>,
    pub kind: Option<UpdateKind>,
    pub stop: &'a str,
    pub note: Option<&'a str>,
}

/// Totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub routes: usize,
    pub buses: usize,
    pub stops: usize,
}

/// Everything the route detail view shows.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDetail {
    pub route: Route,
    pub live_status: LiveStatus,
    pub last_updated: String,
    /// Newest first.
    pub recent_updates: Vec<Update>,
}

/// Repository over the single CityBus document.
pub struct CityBusRepository<S, C = SystemClock> {
    store: DocumentStore<S>,
    clock: C,
}

impl<S: KeyValueStore> CityBusRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> CityBusRepository<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store: DocumentStore::new(store),
            clock,
        }
    }

    /// Loads the current document, seeding it on first use.
    pub fn load(&self) -> Result<Document, RepositoryError> {
        Ok(self.store.load()?)
    }

    /// Replaces the stored document in full.
    pub fn save(&self, doc: &Document) -> Result<(), RepositoryError> {
        Ok(self.store.save(doc)?)
    }

    /// Runs one load, mutate, save cycle. `apply` returns whether the
    /// document changed; unchanged documents are not written back.
    fn mutate<F>(&self, apply: F) -> Result<bool, RepositoryError>
    where
        F: FnOnce(&mut Document) -> Result<bool, ValidationError>,
    {
        let mut doc = self.load()?;
        let changed = apply(&mut doc)?;
        if changed {
            self.save(&doc)?;
        }
        Ok(changed)
    }

    // ========== Routes ==========

    /// Adds a route with its start and end as the only stops, and an empty
    /// update list.
    pub fn add_route(&self, id: &str, details: &RouteDetails) -> Result<(), RepositoryError> {
        let id = id.trim();
        let details = details.validated();

        self.mutate(|doc| {
            if id.is_empty() {
                return Err(ValidationError::MissingRouteFields);
            }
            let details = details?;
            if doc.has_route(id) {
                return Err(ValidationError::DuplicateRouteId(id.to_string()));
            }

            doc.routes.push(Route::new(
                id,
                details.name,
                details.start,
                details.end,
                details.duration,
            ));
            doc.updates.insert(id.to_string(), Vec::new());
            Ok(true)
        })?;

        tracing::info!("Added route {}", id);
        Ok(())
    }

    /// Updates name, endpoints and duration. Stops are left as they are.
    pub fn edit_route(&self, route_id: &str, details: &RouteDetails) -> Result<(), RepositoryError> {
        let details = details.validated()?;

        self.mutate(|doc| {
            let route = doc
                .route_mut(route_id)
                .ok_or_else(|| ValidationError::RouteNotFound(route_id.to_string()))?;
            route.name = details.name;
            route.start = details.start;
            route.end = details.end;
            route.duration = details.duration;
            Ok(true)
        })?;

        tracing::info!("Edited route {}", route_id);
        Ok(())
    }

    /// Removes a route, its updates, and every bus assigned to it.
    pub fn delete_route(&self, route_id: &str) -> Result<(), RepositoryError> {
        let mut removed_buses = 0;

        let changed = self.mutate(|doc| {
            let routes_before = doc.routes.len();
            let buses_before = doc.buses.len();

            doc.routes.retain(|r| r.id != route_id);
            let had_updates = doc.updates.remove(route_id).is_some();
            doc.buses.retain(|b| b.route_id != route_id);

            removed_buses = buses_before - doc.buses.len();
            Ok(had_updates || removed_buses > 0 || doc.routes.len() != routes_before)
        })?;

        if changed {
            tracing::info!(
                "Deleted route {} ({} bus(es) removed)",
                route_id,
                removed_buses
            );
        } else {
            tracing::debug!("Delete route {}: nothing to remove", route_id);
        }
        Ok(())
    }

    // ========== Stops ==========

    pub fn add_stop(
        &self,
        route_id: &str,
        name: &str,
        eta: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let name = name.trim();
        let eta = eta.map(str::trim).unwrap_or_default();

        self.mutate(|doc| {
            if name.is_empty() {
                return Err(ValidationError::MissingStopName);
            }
            let route = doc
                .route_mut(route_id)
                .ok_or_else(|| ValidationError::RouteNotFound(route_id.to_string()))?;
            route.stops.push(Stop::new(name).with_eta(eta));
            Ok(true)
        })?;

        tracing::info!("Added stop '{}' to route {}", name, route_id);
        Ok(())
    }

    /// Swaps the stop at `index` with its neighbour. Moving past either end
    /// of the sequence is a no-op.
    pub fn move_stop(
        &self,
        route_id: &str,
        index: usize,
        direction: MoveDirection,
    ) -> Result<(), RepositoryError> {
        let moved = self.mutate(|doc| {
            let route = doc
                .route_mut(route_id)
                .ok_or_else(|| ValidationError::RouteNotFound(route_id.to_string()))?;
            let len = route.stops.len();
            match direction.target(index) {
                Some(target) if index < len && target < len => {
                    route.stops.swap(index, target);
                    Ok(true)
                }
                _ => Ok(false),
            }
        })?;

        if moved {
            tracing::info!("Moved stop {} {:?} on route {}", index, direction, route_id);
        } else {
            tracing::debug!("Stop {} on route {} cannot move {:?}", index, route_id, direction);
        }
        Ok(())
    }

    /// Removes the stop at `index`. A route may be left with no stops.
    pub fn delete_stop(&self, route_id: &str, index: usize) -> Result<(), RepositoryError> {
        self.mutate(|doc| {
            let route = doc
                .route_mut(route_id)
                .ok_or_else(|| ValidationError::RouteNotFound(route_id.to_string()))?;
            let len = route.stops.len();
            if index >= len {
                return Err(ValidationError::StopIndexOutOfRange { index, len });
            }
            route.stops.remove(index);
            Ok(true)
        })?;

        tracing::info!("Deleted stop {} from route {}", index, route_id);
        Ok(())
    }

    // ========== Buses ==========

    /// Adds a bus. The route id is stored as given; it need not exist.
    pub fn add_bus(
        &self,
        number: &str,
        route_id: &str,
        status: BusStatus,
    ) -> Result<(), RepositoryError> {
        let number = number.trim();
        let route_id = route_id.trim();

        self.mutate(|doc| {
            if number.is_empty() || route_id.is_empty() {
                return Err(ValidationError::MissingBusFields);
            }
            if doc.has_bus(number) {
                return Err(ValidationError::DuplicateBusNumber(number.to_string()));
            }
            if !doc.has_route(route_id) {
                tracing::warn!("Bus {} references unknown route {}", number, route_id);
            }
            doc.buses.push(Bus::new(number, route_id, status));
            Ok(true)
        })?;

        tracing::info!("Added bus {} on route {}", number, route_id);
        Ok(())
    }

    pub fn delete_bus(&self, number: &str) -> Result<(), RepositoryError> {
        let removed = self.mutate(|doc| {
            let before = doc.buses.len();
            doc.buses.retain(|b| b.number != number);
            Ok(doc.buses.len() != before)
        })?;

        if removed {
            tracing::info!("Deleted bus {}", number);
        } else {
            tracing::debug!("Delete bus {}: not found", number);
        }
        Ok(())
    }

    // ========== Updates ==========

    /// Records a rider's report, stamped with the current time. Only the
    /// newest [`MAX_UPDATES_PER_ROUTE`](crate::models::MAX_UPDATES_PER_ROUTE)
    /// reports per route are kept.
    pub fn append_update(
        &self,
        route_id: &str,
        report: &UpdateReport<'_>,
    ) -> Result<(), RepositoryError> {
        let kind = report.kind.ok_or(ValidationError::MissingUpdateType)?;
        let stop = report.stop.trim();
        if stop.is_empty() {
            return Err(ValidationError::MissingStop.into());
        }

        let message = kind.message(stop, report.note);
        let time = format_timestamp(&self.clock.now());
        let update = Update::new(report.name, message, time);

        self.mutate(|doc| {
            doc.push_update(route_id, update);
            Ok(true)
        })?;

        tracing::info!("Recorded '{}' update for route {}", kind, route_id);
        Ok(())
    }

    // ========== Read operations ==========

    pub fn route(&self, route_id: &str) -> Result<Option<Route>, RepositoryError> {
        Ok(self.load()?.route(route_id).cloned())
    }

    /// Routes whose id, name, start or end contain `filter`, ignoring case.
    pub fn search_routes(&self, filter: &str) -> Result<Vec<Route>, RepositoryError> {
        let doc = self.load()?;
        Ok(doc.routes.into_iter().filter(|r| r.matches(filter)).collect())
    }

    pub fn buses(&self) -> Result<Vec<Bus>, RepositoryError> {
        Ok(self.load()?.buses)
    }

    /// The newest `limit` updates for a route, newest first.
    pub fn recent_updates(
        &self,
        route_id: &str,
        limit: usize,
    ) -> Result<Vec<Update>, RepositoryError> {
        let doc = self.load()?;
        Ok(doc
            .updates_for(route_id)
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    pub fn dashboard(&self) -> Result<DashboardStats, RepositoryError> {
        let doc = self.load()?;
        Ok(DashboardStats {
            routes: doc.routes.len(),
            buses: doc.buses.len(),
            stops: doc.stop_count(),
        })
    }

    /// Simulated position of the bus on a route at the current minute.
    pub fn live_status(&self, route_id: &str) -> Result<Option<LiveStatus>, RepositoryError> {
        let minute = self.clock.minute_of_hour();
        Ok(self
            .route(route_id)?
            .map(|route| live_status(&route.stops, minute)))
    }

    /// Route, live status, timestamp and the newest `limit` updates.
    pub fn route_detail(
        &self,
        route_id: &str,
        limit: usize,
    ) -> Result<Option<RouteDetail>, RepositoryError> {
        let doc = self.load()?;
        let Some(route) = doc.route(route_id).cloned() else {
            return Ok(None);
        };

        let now = self.clock.now();
        let minute = self.clock.minute_of_hour();
        let recent_updates = doc
            .updates_for(route_id)
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect();

        Ok(Some(RouteDetail {
            live_status: live_status(&route.stops, minute),
            last_updated: format_timestamp(&now),
            recent_updates,
            route,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ANONYMOUS, MAX_UPDATES_PER_ROUTE};
    use crate::store::{FileStore, MemoryStore};
    use crate::timestamp::FixedClock;
    use tempfile::TempDir;

    fn test_repo() -> CityBusRepository<MemoryStore, FixedClock> {
        let clock = FixedClock::at(2025, 6, 9, 8, 6).unwrap();
        CityBusRepository::with_clock(MemoryStore::new(), clock)
    }

    fn details(name: &str, start: &str, end: &str, duration: u32) -> RouteDetails {
        RouteDetails::new(name, start, end, duration)
    }

    fn report<'a>(kind: UpdateKind, stop: &'a str) -> UpdateReport<'a> {
        UpdateReport {
            kind: Some(kind),
            stop,
            ..Default::default()
        }
    }

    fn stop_names(route: &Route) -> Vec<&str> {
        route.stops.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_add_route_and_update() {
        let repo = test_repo();

        repo.add_route("303", &details("X→Y", "X", "Y", 20)).unwrap();

        let doc = repo.load().unwrap();
        let route = doc.route("303").unwrap();
        assert_eq!(stop_names(route), vec!["X", "Y"]);
        assert!(route.stops.iter().all(|s| s.eta.is_empty()));
        assert_eq!(doc.updates.get("303"), Some(&Vec::new()));

        repo.append_update(
            "303",
            &UpdateReport {
                name: Some(""),
                kind: Some(UpdateKind::Arrived),
                stop: "X",
                note: None,
            },
        )
        .unwrap();

        let updates = repo.load().unwrap().updates["303"].clone();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].message, "Bus just arrived at X");
        assert_eq!(updates[0].name, ANONYMOUS);
        assert_eq!(updates[0].time, "09-06-2025 08:06");
    }

    #[test]
    fn test_add_route_duplicate_id_rejected() {
        let repo = test_repo();
        let before = repo.load().unwrap();

        let err = repo
            .add_route("101", &details("Other", "A", "B", 10))
            .unwrap_err();
        assert_eq!(
            err.validation(),
            Some(&ValidationError::DuplicateRouteId("101".into()))
        );
        assert_eq!(err.to_string(), "That Route ID exists.");
        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn test_add_route_requires_all_fields() {
        let repo = test_repo();
        let before = repo.load().unwrap();

        for (id, d) in [
            ("", details("N", "A", "B", 10)),
            ("9", details("  ", "A", "B", 10)),
            ("9", details("N", "", "B", 10)),
            ("9", details("N", "A", "", 10)),
            ("9", details("N", "A", "B", 0)),
        ] {
            let err = repo.add_route(id, &d).unwrap_err();
            assert_eq!(err.validation(), Some(&ValidationError::MissingRouteFields));
        }
        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn test_add_route_trims_inputs() {
        let repo = test_repo();
        repo.add_route(" 404 ", &details(" Loop ", " A ", " B ", 15))
            .unwrap();

        let route = repo.route("404").unwrap().unwrap();
        assert_eq!(route.name, "Loop");
        assert_eq!(stop_names(&route), vec!["A", "B"]);
    }

    #[test]
    fn test_edit_route_keeps_stops() {
        let repo = test_repo();
        let original = repo.route("101").unwrap().unwrap();

        repo.edit_route("101", &details("Renamed", "Depot", "Harbour", 50))
            .unwrap();

        let route = repo.route("101").unwrap().unwrap();
        assert_eq!(route.name, "Renamed");
        assert_eq!(route.start, "Depot");
        assert_eq!(route.end, "Harbour");
        assert_eq!(route.duration, 50);
        assert_eq!(route.stops, original.stops);
    }

    #[test]
    fn test_edit_route_validation() {
        let repo = test_repo();
        let before = repo.load().unwrap();

        let err = repo
            .edit_route("101", &details("Renamed", "A", "B", 0))
            .unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::MissingRouteFields));

        let err = repo
            .edit_route("999", &details("Renamed", "A", "B", 5))
            .unwrap_err();
        assert_eq!(
            err.validation(),
            Some(&ValidationError::RouteNotFound("999".into()))
        );
        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn test_delete_route_cascades() {
        let repo = test_repo();
        let mut doc = Document::default();
        doc.routes.push(Route::new("A", "A line", "a1", "a2", 10));
        doc.routes.push(Route::new("B", "B line", "b1", "b2", 10));
        doc.buses.push(Bus::new("x", "A", BusStatus::Active));
        doc.buses.push(Bus::new("y", "B", BusStatus::Active));
        doc.updates.insert("A".into(), Vec::new());
        doc.updates.insert("B".into(), Vec::new());
        repo.save(&doc).unwrap();

        repo.delete_route("A").unwrap();

        let doc = repo.load().unwrap();
        let ids: Vec<_> = doc.routes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B"]);
        assert_eq!(doc.buses, vec![Bus::new("y", "B", BusStatus::Active)]);
        assert!(!doc.updates.contains_key("A"));
        assert!(doc.updates.contains_key("B"));
    }

    #[test]
    fn test_delete_unknown_route_is_harmless() {
        let repo = test_repo();
        let before = repo.load().unwrap();
        repo.delete_route("nope").unwrap();
        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn test_add_stop_appends() {
        let repo = test_repo();
        repo.add_stop("202", "Harbour", Some(" 14:20 ")).unwrap();
        repo.add_stop("202", "Pier", None).unwrap();

        let route = repo.route("202").unwrap().unwrap();
        assert_eq!(route.stops.len(), 6);
        assert_eq!(route.stops[4], Stop::new("Harbour").with_eta("14:20"));
        assert_eq!(route.stops[5].eta(), None);
    }

    #[test]
    fn test_add_stop_validation() {
        let repo = test_repo();
        let err = repo.add_stop("202", "   ", None).unwrap_err();
        assert_eq!(err.to_string(), "Stop name required.");

        let err = repo.add_stop("999", "Pier", None).unwrap_err();
        assert_eq!(
            err.validation(),
            Some(&ValidationError::RouteNotFound("999".into()))
        );
    }

    #[test]
    fn test_move_stop_swaps_neighbours() {
        let repo = test_repo();
        repo.move_stop("101", 1, MoveDirection::Down).unwrap();
        let route = repo.route("101").unwrap().unwrap();
        assert_eq!(
            stop_names(&route),
            vec!["Central Station", "Green Avenue", "City Hall", "Tech Park"]
        );

        repo.move_stop("101", 1, MoveDirection::Up).unwrap();
        let route = repo.route("101").unwrap().unwrap();
        assert_eq!(
            stop_names(&route),
            vec!["Green Avenue", "Central Station", "City Hall", "Tech Park"]
        );
    }

    #[test]
    fn test_move_stop_boundaries_are_noops() {
        let repo = test_repo();
        let before = repo.load().unwrap();

        repo.move_stop("101", 0, MoveDirection::Up).unwrap();
        repo.move_stop("101", 3, MoveDirection::Down).unwrap();
        repo.move_stop("101", 42, MoveDirection::Up).unwrap();

        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn test_delete_stop_allows_empty_route() {
        let repo = test_repo();
        repo.add_route("1", &details("N", "A", "B", 5)).unwrap();
        repo.delete_stop("1", 1).unwrap();
        repo.delete_stop("1", 0).unwrap();

        let route = repo.route("1").unwrap().unwrap();
        assert!(route.stops.is_empty());
        assert_eq!(repo.live_status("1").unwrap(), Some(LiveStatus::NoStops));
    }

    #[test]
    fn test_delete_stop_out_of_range() {
        let repo = test_repo();
        let before = repo.load().unwrap();

        let err = repo.delete_stop("101", 4).unwrap_err();
        assert_eq!(
            err.validation(),
            Some(&ValidationError::StopIndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn test_add_bus_allows_dangling_route() {
        let repo = test_repo();
        repo.add_bus("N-9", "no-such-route", BusStatus::Active)
            .unwrap();

        let buses = repo.buses().unwrap();
        assert_eq!(buses.len(), 3);
        assert_eq!(buses[2], Bus::new("N-9", "no-such-route", BusStatus::Active));
    }

    #[test]
    fn test_add_bus_duplicate_number_rejected() {
        let repo = test_repo();
        let before = repo.load().unwrap();

        let err = repo
            .add_bus("C-101A", "202", BusStatus::Inactive)
            .unwrap_err();
        assert_eq!(err.to_string(), "Bus number already exists.");
        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn test_add_bus_requires_fields() {
        let repo = test_repo();
        let err = repo.add_bus(" ", "101", BusStatus::Active).unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::MissingBusFields));
        let err = repo.add_bus("Z-1", "", BusStatus::Active).unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::MissingBusFields));
    }

    #[test]
    fn test_delete_bus() {
        let repo = test_repo();
        repo.delete_bus("C-101A").unwrap();
        repo.delete_bus("missing").unwrap();

        let numbers: Vec<_> = repo
            .buses()
            .unwrap()
            .into_iter()
            .map(|b| b.number)
            .collect();
        assert_eq!(numbers, vec!["U-202B"]);
    }

    #[test]
    fn test_update_cap_keeps_newest_thirty() {
        let repo = test_repo();
        for i in 1..=35 {
            let stop = format!("Stop {}", i);
            repo.append_update("101", &report(UpdateKind::Left, &stop))
                .unwrap();
        }

        let updates = repo.load().unwrap().updates["101"].clone();
        assert_eq!(updates.len(), MAX_UPDATES_PER_ROUTE);
        let expected: Vec<String> = (6..=35).map(|i| format!("Bus just left Stop {}", i)).collect();
        let actual: Vec<String> = updates.into_iter().map(|u| u.message).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_append_update_validation() {
        let repo = test_repo();
        let before = repo.load().unwrap();

        let err = repo
            .append_update(
                "101",
                &UpdateReport {
                    stop: "City Hall",
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Select an update type.");

        let err = repo
            .append_update("101", &report(UpdateKind::Delayed, " "))
            .unwrap_err();
        assert_eq!(err.to_string(), "Choose a stop.");

        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn test_append_update_with_name_and_note() {
        let repo = test_repo();
        repo.append_update(
            "202",
            &UpdateReport {
                name: Some("Priya"),
                kind: Some(UpdateKind::Delayed),
                stop: "Lakeview",
                note: Some("flooded underpass"),
            },
        )
        .unwrap();

        let update = &repo.load().unwrap().updates["202"][0];
        assert_eq!(update.name, "Priya");
        assert_eq!(update.message, "Bus delayed at Lakeview — flooded underpass");
    }

    #[test]
    fn test_append_update_to_route_without_list() {
        let repo = test_repo();
        let mut doc = repo.load().unwrap();
        doc.routes.push(Route::new("legacy", "Old", "A", "B", 9));
        repo.save(&doc).unwrap();

        assert!(repo.recent_updates("legacy", 10).unwrap().is_empty());
        repo.append_update("legacy", &report(UpdateKind::Arrived, "A"))
            .unwrap();
        assert_eq!(repo.recent_updates("legacy", 10).unwrap().len(), 1);
    }

    #[test]
    fn test_recent_updates_newest_first() {
        let repo = test_repo();
        for stop in ["A", "B", "C"] {
            repo.append_update("101", &report(UpdateKind::Arrived, stop))
                .unwrap();
        }

        let recent: Vec<String> = repo
            .recent_updates("101", 2)
            .unwrap()
            .into_iter()
            .map(|u| u.message)
            .collect();
        assert_eq!(recent, vec!["Bus just arrived at C", "Bus just arrived at B"]);
    }

    #[test]
    fn test_search_routes() {
        let repo = test_repo();
        let ids = |routes: Vec<Route>| routes.into_iter().map(|r| r.id).collect::<Vec<_>>();

        assert_eq!(ids(repo.search_routes("").unwrap()), vec!["101", "202"]);
        assert_eq!(ids(repo.search_routes("univ").unwrap()), vec!["202"]);
        assert_eq!(ids(repo.search_routes("TECH").unwrap()), vec!["101"]);
        assert!(repo.search_routes("airport").unwrap().is_empty());
    }

    #[test]
    fn test_dashboard_counts() {
        let repo = test_repo();
        assert_eq!(
            repo.dashboard().unwrap(),
            DashboardStats {
                routes: 2,
                buses: 2,
                stops: 8
            }
        );

        repo.delete_route("202").unwrap();
        assert_eq!(
            repo.dashboard().unwrap(),
            DashboardStats {
                routes: 1,
                buses: 1,
                stops: 4
            }
        );
    }

    #[test]
    fn test_live_status_uses_clock_minute() {
        // Minute 6 on a four-stop route: 6 % 4 == 2
        let repo = test_repo();
        assert_eq!(
            repo.live_status("101").unwrap(),
            Some(LiveStatus::Between {
                index: 2,
                from: "Green Avenue".into(),
                to: "Tech Park".into()
            })
        );

        let clock = FixedClock::at(2025, 6, 9, 8, 7).unwrap();
        let repo = CityBusRepository::with_clock(MemoryStore::new(), clock);
        assert_eq!(
            repo.live_status("101").unwrap(),
            Some(LiveStatus::AtLastStop {
                index: 3,
                stop: "Tech Park".into()
            })
        );
        assert_eq!(repo.live_status("999").unwrap(), None);
    }

    #[test]
    fn test_route_detail() {
        let repo = test_repo();
        repo.append_update("202", &report(UpdateKind::Left, "Old Town"))
            .unwrap();

        let detail = repo.route_detail("202", 10).unwrap().unwrap();
        assert_eq!(detail.route.id, "202");
        assert_eq!(detail.last_updated, "09-06-2025 08:06");
        assert_eq!(detail.recent_updates.len(), 1);
        assert!(matches!(detail.live_status, LiveStatus::Between { index: 2, .. }));

        assert!(repo.route_detail("999", 10).unwrap().is_none());
    }

    #[test]
    fn test_changes_persist_across_repositories() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_path_buf();

        let repo = CityBusRepository::new(FileStore::new(data_dir.clone()));
        repo.add_bus("T-1", "101", BusStatus::Active).unwrap();

        let reopened = CityBusRepository::new(FileStore::new(data_dir));
        assert!(reopened.load().unwrap().has_bus("T-1"));
    }
}
