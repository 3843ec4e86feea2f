pub mod api;
mod entry;
pub mod extract;
pub mod middleware;
pub mod route_list;
pub mod views;

pub use entry::{API_PREFIX, app, router};
pub use middleware::{catch_panic_layer, json_error_middleware};
