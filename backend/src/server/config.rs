//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::domain::{MovieCollection, MovieValidator};
use pagination::PageSize;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) page_size: PageSize,
    pub(crate) movies: MovieCollection,
    pub(crate) validator: MovieValidator,
}

impl ServerConfig {
    /// Construct a server configuration with an empty catalogue and the
    /// default page size.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, validator: MovieValidator) -> Self {
        Self {
            bind_addr,
            page_size: PageSize::DEFAULT,
            movies: MovieCollection::default(),
            validator,
        }
    }

    /// Serve pages of `page_size` movies.
    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Start from a seeded catalogue.
    #[must_use]
    pub fn with_movies(mut self, movies: MovieCollection) -> Self {
        self.movies = movies;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
