pub mod error;
pub use error::AppError;
pub mod gate;
pub use gate::{ConfirmationGate, Decision};
