use super::entity::{Film, FilmPatch};
use crate::domain::catalog::normalize_genres;

/// Apply an update on top of the stored film.
///
/// Every `None` in the patch keeps the stored value. Id and likes always
/// come from the stored snapshot.
pub fn merge_film(stored: &Film, patch: FilmPatch) -> Film {
    Film {
        id: stored.id,
        name: patch.name.unwrap_or_else(|| stored.name.clone()),
        description: patch
            .description
            .unwrap_or_else(|| stored.description.clone()),
        release_date: patch.release_date.unwrap_or(stored.release_date),
        duration: patch.duration.unwrap_or(stored.duration),
        mpa: patch.mpa.unwrap_or_else(|| stored.mpa.clone()),
        genres: patch
            .genres
            .map(normalize_genres)
            .unwrap_or_else(|| stored.genres.clone()),
        likes: stored.likes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Genre, Mpa};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn stored() -> Film {
        Film {
            id: 7,
            name: "A".to_string(),
            description: "first cut".to_string(),
            release_date: NaiveDate::from_ymd_opt(2001, 5, 1).unwrap(),
            duration: 100,
            mpa: Mpa::new(1, "G"),
            genres: vec![Genre::new(2, "Drama")],
            likes: BTreeSet::from([3, 5]),
        }
    }

    #[test]
    fn test_empty_patch_keeps_everything() {
        let film = stored();
        assert_eq!(merge_film(&film, FilmPatch::default()), film);
    }

    #[test]
    fn test_partial_patch_only_replaces_supplied_fields() {
        let patch = FilmPatch {
            duration: Some(50),
            ..FilmPatch::default()
        };
        let merged = merge_film(&stored(), patch);
        assert_eq!(merged.name, "A");
        assert_eq!(merged.duration, 50);
        assert_eq!(merged.description, "first cut");
    }

    #[test]
    fn test_genres_are_replaced_and_normalized() {
        let patch = FilmPatch {
            genres: Some(vec![Genre::new(6, "Action"), Genre::new(1, "Comedy")]),
            ..FilmPatch::default()
        };
        let merged = merge_film(&stored(), patch);
        assert_eq!(merged.genre_ids(), vec![1, 6]);
    }

    #[test]
    fn test_likes_survive_update() {
        let patch = FilmPatch {
            name: Some("B".to_string()),
            mpa: Some(Mpa::new(4, "R")),
            ..FilmPatch::default()
        };
        let merged = merge_film(&stored(), patch);
        assert_eq!(merged.likes, BTreeSet::from([3, 5]));
        assert_eq!(merged.mpa.id, 4);
        assert_eq!(merged.id, 7);
    }
}
