pub mod params;
pub mod users;

pub use params::{numeric_json, parse_number, parse_user_id};
pub use users::{
    CreateUserRequest, RemovedUserResponse, UserListResponse, UserResponse,
};
