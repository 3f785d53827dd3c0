//! # boxdarr server
//!
//! HTTP front end for [`boxdarr_core`]:
//!
//! - `GET /letterboxd/{*path}` turns a Letterboxd list page into Radarr
//!   custom-list JSON
//! - `POST /x/{service}` receives Radarr webhooks and announces them on X
//! - `GET /api/auth/twitter/{authenticate,callback}` links the X account
//! - `GET /ping` for liveness checks

pub mod handlers;
pub mod infra;
pub mod notify;
pub mod routes;

pub use infra::app_state::AppState;
