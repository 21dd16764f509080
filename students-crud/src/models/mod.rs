pub mod student;

pub use student::{seed_students, Student, StudentSummary};
