pub mod metrics;
pub mod user_store;

pub use metrics::{get_metrics, init_metrics};
pub use user_store::UserStore;
