//! Error handling types.

mod types;

pub use types::{InitializationError, InspectError};
