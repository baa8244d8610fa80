//! Error types for capability probing

/// Why the regionized scheduler API could not be used
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// A required capability marker is not advertised by the host
    #[error("Capability not found: {0}")]
    MissingCapability(&'static str),

    /// Markers are present but the host returned no scheduler
    #[error("Host advertises regionized markers but provides no region scheduler")]
    SchedulerUnavailable,
}
