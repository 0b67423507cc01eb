mod health;
mod not_found;
pub(crate) mod openapi;
mod resource;

pub use health::{handle_health, HealthResponse};
pub use not_found::handle_not_found;
pub use resource::{handle_resource, handle_resource_root};
