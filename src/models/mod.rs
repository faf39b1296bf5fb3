mod bus;
mod document;
mod route;
mod update;

pub use bus::{Bus, BusStatus};
pub use document::{Document, MAX_UPDATES_PER_ROUTE};
pub use route::{Route, Stop};
pub use update::{Update, UpdateKind, ANONYMOUS};
