pub mod app;
pub mod health;
pub mod metrics;
pub mod users;

pub use app::{echo_numeric_id, handle_panic, hello_world, route_not_found};
pub use health::health_check;
pub use metrics::metrics;
pub use users::{create_user, delete_user, get_user, list_users};
