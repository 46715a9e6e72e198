//! HTTP API module for the HRMS leave engine.
//!
//! Exposes the leave preview, balance summary and evaluation report
//! rendering over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BalanceRequest, PreviewRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
