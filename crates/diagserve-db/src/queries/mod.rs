//! Database query operations, one module per entity.

pub mod uploads;
pub mod users;
