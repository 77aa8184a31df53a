/// An error that can occur in the trap monitoring subsystem.
#[derive(thiserror::Error, Debug)]
pub enum VmeError {
    /// Monitoring is already enabled for the trap class.
    #[error("Monitoring is already enabled for the trap class.")]
    AlreadyEnabled,

    /// Monitoring is already disabled for the trap class.
    #[error("Monitoring is already disabled for the trap class.")]
    AlreadyDisabled,

    /// The trap class is not supported by the architecture.
    #[error("The trap class is not supported by the architecture.")]
    Unsupported,

    /// The snapshot width does not match the vCPU's execution width.
    #[error("The snapshot width does not match the vCPU's execution width.")]
    WidthMismatch,

    /// The vCPU was not found.
    #[error("The vCPU was not found.")]
    VcpuNotFound,

    /// The vCPU is not awaiting an event response.
    #[error("The vCPU is not awaiting an event response.")]
    NoPendingEvent,

    /// The wire record carries an unsupported format version.
    #[error("Unsupported wire format version {0}.")]
    UnsupportedWireVersion(u16),

    /// The wire record is truncated or carries an unknown width tag.
    #[error("Malformed wire record.")]
    MalformedWireRecord,

    /// Out of bounds.
    #[error("Out of bounds")]
    OutOfBounds,

    /// An error occurred in the event transport.
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// Other error.
    #[error("{0}")]
    Other(&'static str),
}

impl VmeError {
    /// Creates a new transport error.
    pub fn transport(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(error))
    }
}
