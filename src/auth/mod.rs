use crate::state::AppState;
use axum::Router;

pub mod avatar;
pub mod claims;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod service;
pub mod store;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
