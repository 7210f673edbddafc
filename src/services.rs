// src/services.rs

pub mod scheduling;
pub mod triage;

pub use scheduling::SchedulingService;
pub use triage::{DataOrigin, PendingLoad, TriageService};
