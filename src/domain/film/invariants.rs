use chrono::NaiveDate;

use super::entity::{FilmDraft, FilmPatch, NewFilm};
use crate::domain::catalog::{Genre, Mpa};
use crate::domain::{is_blank, DomainError, DomainResult};

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Earliest accepted release date (first public film screening)
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

/// Film fields that passed creation checks; references not yet resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedFilm {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub mpa_id: i32,
    pub genre_ids: Vec<i32>,
}

impl CheckedFilm {
    pub fn into_new_film(self, mpa: Mpa, genres: Vec<Genre>) -> NewFilm {
        NewFilm {
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            mpa,
            genres,
        }
    }
}

/// Validates a film about to be created.
///
/// Rating and genre existence are checked by the caller against the
/// reference tables once this passes.
pub fn validate_new_film(draft: &FilmDraft) -> DomainResult<CheckedFilm> {
    let name = match draft.name.as_deref() {
        Some(name) if !is_blank(name) => name.to_string(),
        _ => return Err(DomainError::Validation("name required".to_string())),
    };

    let release_date = draft
        .release_date
        .ok_or_else(|| DomainError::Validation("release date required".to_string()))?;
    validate_release_date(release_date)?;

    let duration = draft
        .duration
        .ok_or_else(|| DomainError::Validation("duration must be positive".to_string()))
        .and_then(validate_duration)?;

    let description = draft.description.clone().unwrap_or_default();
    validate_description(&description)?;

    let mpa_id = draft
        .mpa_id
        .ok_or_else(|| DomainError::Validation("rating required".to_string()))?;

    Ok(CheckedFilm {
        name,
        description,
        release_date,
        duration,
        mpa_id,
        genre_ids: draft.genre_ids.clone().unwrap_or_default(),
    })
}

/// Validates the fields supplied in an update.
///
/// Blank text and absent values become `None` so the merge keeps the stored
/// value. The release date is passed through without re-validation.
/// References are resolved by the caller.
pub fn validate_film_update(draft: &FilmDraft) -> DomainResult<FilmPatch> {
    let duration = draft.duration.map(validate_duration).transpose()?;

    let description = match draft.description.as_deref() {
        Some(text) if !is_blank(text) => {
            validate_description(text)?;
            Some(text.to_string())
        }
        _ => None,
    };

    let name = draft
        .name
        .as_deref()
        .filter(|name| !is_blank(name))
        .map(str::to_string);

    Ok(FilmPatch {
        name,
        description,
        release_date: draft.release_date,
        duration,
        mpa: None,
        genres: None,
    })
}

fn validate_release_date(date: NaiveDate) -> DomainResult<()> {
    if date < earliest_release_date() {
        return Err(DomainError::Validation("release date too early".to_string()));
    }
    Ok(())
}

fn validate_duration(minutes: i64) -> DomainResult<u32> {
    if minutes <= 0 {
        return Err(DomainError::Validation("duration must be positive".to_string()));
    }
    u32::try_from(minutes)
        .map_err(|_| DomainError::Validation(format!("duration {} is out of range", minutes)))
}

fn validate_description(description: &str) -> DomainResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::Validation(format!(
            "description exceeds {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

/// Film invariants:
///
/// 1. Name is never blank
/// 2. Release date is on or after 1895-12-28 (checked at creation only)
/// 3. Duration is a positive number of minutes
/// 4. Description holds at most 200 characters
/// 5. Rating and genres reference existing reference rows
/// 6. Id is assigned by storage and never changes
