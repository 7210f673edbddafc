pub mod clinic;
pub mod scheduling;
pub mod user;
