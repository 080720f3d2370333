//! Error types for the core library.

use std::io;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the ring selector.
///
/// Every variant leaves the selector in its previous, well-defined state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lookup was made before any server list was published.
    #[error("no servers configured")]
    NoServersConfigured,

    /// A server address could not be resolved. The resolver's error is kept
    /// untouched as the source.
    #[error("failed to resolve server address {addr:?}: {source}")]
    AddressResolution {
        /// The address as it was configured.
        addr: String,
        /// The resolver's own error.
        #[source]
        source: io::Error,
    },

    /// `set_servers` was called with an empty server list.
    #[error("server list is empty")]
    EmptyServerList,
}

impl Error {
    /// True for [`Error::NoServersConfigured`].
    pub fn is_no_servers(&self) -> bool {
        matches!(self, Error::NoServersConfigured)
    }
}
