// src/models/user.rs

use serde::Deserialize;
use validator::Validate;

/// DTO for adding a user record to the content store.
#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,

    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
}
