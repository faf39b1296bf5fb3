//! CityBus Library
//!
//! Routes, stops, buses and crowd-sourced updates for a small city bus
//! network, persisted as a single JSON document in a local key-value store.

pub mod live_status;
pub mod models;
pub mod repository;
pub mod store;
pub mod timestamp;

pub use live_status::{live_status, position_index, LiveStatus};
pub use models::{
    Bus, BusStatus, Document, Route, Stop, Update, UpdateKind, MAX_UPDATES_PER_ROUTE,
};
pub use repository::{
    CityBusRepository, DashboardStats, MoveDirection, RepositoryError, RouteDetail, RouteDetails,
    UpdateReport, ValidationError,
};
pub use store::{DocumentStore, FileStore, KeyValueStore, MemoryStore, StoreError, DATA_KEY};
pub use timestamp::{format_timestamp, Clock, FixedClock, SystemClock};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
