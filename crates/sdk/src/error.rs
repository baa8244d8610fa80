//! Error type for host API calls

/// Failure reported by the host when the plugin asks it to act on a
/// player, world or the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The player left before the call reached them
    #[error("Player is offline: {0}")]
    PlayerOffline(String),

    /// The world named by a location is not loaded
    #[error("World not loaded: {0}")]
    WorldNotLoaded(String),

    /// The host refused the operation (e.g. a teleport vetoed by another plugin)
    #[error("Host rejected the request: {0}")]
    Rejected(String),

    /// An outbound HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Anything else the host could not do
    #[error("{0}")]
    Other(String),
}
