//! In-memory movie repository.
//!
//! The collection lives for the lifetime of the process. Reads share a read
//! lock; each mutation holds the write lock for its whole find-merge-replace
//! step.

use async_trait::async_trait;
use pagination::PageRequest;
use tokio::sync::RwLock;

use crate::domain::ports::{MovieRepository, MovieRepositoryError};
use crate::domain::{Movie, MovieCollection, MovieId, MoviePatch};

/// Movie repository backed by a [`MovieCollection`] held in memory.
///
/// # Examples
/// ```
/// use backend::domain::MovieCollection;
/// use backend::outbound::memory::InMemoryMovieRepository;
///
/// let repo = InMemoryMovieRepository::new(MovieCollection::default());
/// # let _ = repo;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMovieRepository {
    movies: RwLock<MovieCollection>,
}

impl InMemoryMovieRepository {
    /// Wrap a seeded collection.
    pub fn new(movies: MovieCollection) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }

    /// Number of stored movies.
    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    /// Whether the repository holds no movies.
    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn list(&self, genre: Option<String>) -> Result<Vec<Movie>, MovieRepositoryError> {
        Ok(self.movies.read().await.list(genre.as_deref()))
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieRepositoryError> {
        Ok(self.movies.read().await.get(id).cloned())
    }

    async fn insert(&self, movie: Movie) -> Result<(), MovieRepositoryError> {
        self.movies
            .write()
            .await
            .insert(movie)
            .map_err(|err| MovieRepositoryError::duplicate_id(err.id.to_string()))
    }

    async fn update(
        &self,
        id: &MovieId,
        patch: &MoviePatch,
    ) -> Result<Option<Movie>, MovieRepositoryError> {
        Ok(self.movies.write().await.update(id, patch))
    }

    async fn remove(&self, id: &MovieId) -> Result<bool, MovieRepositoryError> {
        Ok(self.movies.write().await.remove(id).is_some())
    }

    async fn page(&self, request: PageRequest) -> Result<Vec<Movie>, MovieRepositoryError> {
        Ok(self.movies.read().await.page(request))
    }
}
