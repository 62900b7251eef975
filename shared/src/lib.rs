//! Shared types for the salon backend
//!
//! This crate holds the entity models exchanged between the API layer and
//! the database layer, plus small time/id utilities. Pure data — no I/O.

pub mod models;
pub mod util;
