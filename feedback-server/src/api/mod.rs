//! HTTP handlers for feedback-server

pub mod admin;
pub mod health;
pub mod submit;
pub mod user;

pub use admin::admin_dashboard;
pub use health::health_routes;
pub use submit::submit_feedback;
pub use user::user_dashboard;
