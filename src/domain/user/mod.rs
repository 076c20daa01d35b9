pub mod entity;
pub mod invariants;

pub use entity::{NewUser, User, UserDraft, UserId, UserPatch};
pub use invariants::{
    emails_match, ensure_email_available, merge_user, validate_new_user, validate_user_update,
};
