pub mod entity;
pub mod invariants;
pub mod merge;

pub use entity::{Film, FilmDraft, FilmId, FilmPatch, NewFilm};
pub use invariants::{
    earliest_release_date, validate_film_update, validate_new_film, CheckedFilm,
    MAX_DESCRIPTION_LEN,
};
pub use merge::merge_film;
