use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Synthetic user identifier assigned by storage
pub type UserId = i64;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned on creation, immutable afterwards
    pub id: UserId,

    /// Unique across all users, compared case-insensitively
    pub email: String,

    /// Never blank, never contains whitespace
    pub login: String,

    /// Display name, defaults to the login
    pub name: String,

    pub birthday: NaiveDate,
}

/// User fields as they arrive from a caller, before any validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<UserId>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// A validated user waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

/// Checked user update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl User {
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            email: new_user.email,
            login: new_user.login,
            name: new_user.name,
            birthday: new_user.birthday,
        }
    }
}
