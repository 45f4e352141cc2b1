//! Application services - orchestrate use cases.

pub mod update_service;

pub use update_service::{UpdateRequest, UpdateService};
