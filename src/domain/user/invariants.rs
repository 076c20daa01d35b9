use chrono::NaiveDate;

use super::entity::{NewUser, User, UserDraft, UserId, UserPatch};
use crate::domain::{is_blank, DomainError, DomainResult};

/// Validates a user about to be created.
///
/// A blank display name falls back to the login. Email uniqueness is
/// enforced by storage at insert time.
pub fn validate_new_user(draft: &UserDraft, today: NaiveDate) -> DomainResult<NewUser> {
    let email = match draft.email.as_deref() {
        Some(email) if !is_blank(email) => email.trim().to_string(),
        _ => return Err(DomainError::Validation("email required".to_string())),
    };
    validate_email(&email)?;

    let login = match draft.login.as_deref() {
        Some(login) if !is_blank(login) => login.to_string(),
        _ => return Err(DomainError::Validation("login required".to_string())),
    };
    validate_login(&login)?;

    let birthday = draft
        .birthday
        .ok_or_else(|| DomainError::Validation("birthday required".to_string()))?;
    validate_birthday(birthday, today)?;

    let name = match draft.name.as_deref() {
        Some(name) if !is_blank(name) => name.to_string(),
        _ => login.clone(),
    };

    Ok(NewUser {
        email,
        login,
        name,
        birthday,
    })
}

/// Validates the supplied fields of a user update.
///
/// Blank name, email and login count as absent, as does a missing birthday.
/// A supplied birthday is checked against `today`.
pub fn validate_user_update(draft: &UserDraft, today: NaiveDate) -> DomainResult<UserPatch> {
    let email = match draft.email.as_deref() {
        Some(email) if !is_blank(email) => {
            let email = email.trim().to_string();
            validate_email(&email)?;
            Some(email)
        }
        _ => None,
    };

    let login = match draft.login.as_deref() {
        Some(login) if !is_blank(login) => {
            validate_login(login)?;
            Some(login.to_string())
        }
        _ => None,
    };

    let name = draft
        .name
        .as_deref()
        .filter(|name| !is_blank(name))
        .map(str::to_string);

    if let Some(birthday) = draft.birthday {
        validate_birthday(birthday, today)?;
    }

    Ok(UserPatch {
        email,
        login,
        name,
        birthday: draft.birthday,
    })
}

/// Apply a checked update on top of the stored user
pub fn merge_user(stored: &User, patch: UserPatch) -> User {
    User {
        id: stored.id,
        email: patch.email.unwrap_or_else(|| stored.email.clone()),
        login: patch.login.unwrap_or_else(|| stored.login.clone()),
        name: patch.name.unwrap_or_else(|| stored.name.clone()),
        birthday: patch.birthday.unwrap_or(stored.birthday),
    }
}

/// Case-insensitive email comparison
pub fn emails_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Fails with `Duplicate` when any user other than `except` owns `email`.
pub fn ensure_email_available<'a>(
    email: &str,
    users: impl IntoIterator<Item = &'a User>,
    except: Option<UserId>,
) -> DomainResult<()> {
    let taken = users
        .into_iter()
        .filter(|user| Some(user.id) != except)
        .any(|user| emails_match(&user.email, email));

    if taken {
        return Err(DomainError::Duplicate("email in use".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    if !email.contains('@') {
        return Err(DomainError::Validation("email must contain @".to_string()));
    }
    Ok(())
}

fn validate_login(login: &str) -> DomainResult<()> {
    if login.chars().any(char::is_whitespace) {
        return Err(DomainError::Validation(
            "login must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

fn validate_birthday(birthday: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if birthday > today {
        return Err(DomainError::Validation(
            "birthday cannot be in the future".to_string(),
        ));
    }
    Ok(())
}
