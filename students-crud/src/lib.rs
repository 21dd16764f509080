pub mod crud;
pub mod models;

pub use crud::{run, CrudReport, COLLECTION};
