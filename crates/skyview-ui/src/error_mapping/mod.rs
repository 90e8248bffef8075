//! Maps UI service errors to skyview_core::AppError for consistent user-facing messages.

mod weather;

pub use weather::PositionFailure;
