//! Ordered in-memory sequence of movies.
//!
//! Insertion order is significant: pages are windows over it and updates keep
//! a record at its original position.

use pagination::PageRequest;

use super::{Movie, MovieId, MoviePatch};

/// Raised when a record would reuse an identifier already in the collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("movie id {id} is already present")]
pub struct DuplicateMovieIdError {
    pub id: MovieId,
}

/// Ordered collection of movies with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieCollection {
    movies: Vec<Movie>,
}

impl MovieCollection {
    /// Build a collection, rejecting repeated identifiers.
    pub fn try_from_movies(
        movies: impl IntoIterator<Item = Movie>,
    ) -> Result<Self, DuplicateMovieIdError> {
        let mut collection = Self::default();
        for movie in movies {
            collection.insert(movie)?;
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// All movies, or those tagged with `genre` ignoring case.
    ///
    /// An empty filter selects everything.
    pub fn list(&self, genre: Option<&str>) -> Vec<Movie> {
        match genre.filter(|filter| !filter.is_empty()) {
            Some(filter) => self
                .movies
                .iter()
                .filter(|movie| movie.has_genre(filter))
                .cloned()
                .collect(),
            None => self.movies.clone(),
        }
    }

    pub fn get(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id() == id)
    }

    /// Append a movie to the end of the sequence.
    pub fn insert(&mut self, movie: Movie) -> Result<(), DuplicateMovieIdError> {
        if self.get(movie.id()).is_some() {
            return Err(DuplicateMovieIdError {
                id: movie.id().clone(),
            });
        }
        self.movies.push(movie);
        Ok(())
    }

    /// Merge `patch` into the movie with `id` in place and return the result.
    pub fn update(&mut self, id: &MovieId, patch: &MoviePatch) -> Option<Movie> {
        let movie = self.movies.iter_mut().find(|movie| movie.id() == id)?;
        movie.apply(patch);
        Some(movie.clone())
    }

    /// Remove the movie with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &MovieId) -> Option<Movie> {
        let position = self.movies.iter().position(|movie| movie.id() == id)?;
        Some(self.movies.remove(position))
    }

    /// Movies on the requested page.
    pub fn page(&self, request: PageRequest) -> Vec<Movie> {
        request.window(&self.movies).to_vec()
    }
}
