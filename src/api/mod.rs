//! HTTP API module for the Courier Engine.
//!
//! This module provides the REST API endpoints for pricing parcels and
//! summarizing rider earnings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EarningsRequest, PriceRequest};
pub use response::{ApiError, TariffResponse};
pub use state::AppState;
