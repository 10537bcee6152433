//! Server settings loaded via OrthoConfig.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use pagination::PageSize;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 1234;

/// Listener and paging configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MOVIES")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Movies per page served by `/movies/page/{pag}`.
    pub page_size: Option<usize>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured page size, falling back to three.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the configured size is
    /// zero.
    pub fn page_size(&self) -> io::Result<PageSize> {
        match self.page_size {
            Some(size) => PageSize::new(size)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err)),
            None => Ok(PageSize::DEFAULT),
        }
    }

    /// Resolve the host and port into a socket address.
    ///
    /// # Errors
    /// Propagates resolution failures and rejects hosts that resolve to
    /// nothing.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("{} did not resolve to an address", self.host()),
                )
            })
    }
}
