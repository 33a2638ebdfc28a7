//! Neo core: the asynchronous load-state controller and UI error model.
mod controller;
mod error;
mod publisher;
mod state;

pub use controller::LoadController;
pub use error::{AppError, Symbol, UiError};
pub use publisher::{StatePublisher, StateStream, DEFAULT_STREAM_CAPACITY};
pub use state::LoadState;
