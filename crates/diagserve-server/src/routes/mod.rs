//! Route handlers for the HTTP API.

pub mod tags;
pub mod uploads;
pub mod users;
