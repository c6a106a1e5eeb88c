//! Web layer for the metro router.
//!
//! JSON endpoints over the current network snapshot and the user session.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
