pub mod actor;
pub mod director;
pub mod director_film;
pub mod film;
pub mod film_genre;
pub mod genre;
pub mod role_film;
