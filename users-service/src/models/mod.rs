pub mod user;

pub use user::{User, DEFAULT_EMAIL, DEFAULT_NAME};
