/// Common error type for OCT lesion measurement operations.
///
/// Covers image input failures, invalid stage parameters, and the
/// recoverable insufficient-points condition of the manual tracing mode.
///
/// # Examples
/// ```
/// use oct_lesion_structures::OctLesionError;
///
/// fn validate_neighborhood(size: usize) -> Result<(), OctLesionError> {
///     if size % 2 == 0 {
///         return Err(OctLesionError::BadParameters("Neighborhood must be odd".into()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_neighborhood(4).is_err());
/// assert!(validate_neighborhood(35).is_ok());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum OctLesionError {
    /// Image bytes failed to decode, or the supplied scan is empty
    #[error("Image Input Error: {0}")]
    ImageInput(String),

    /// Invalid parameters provided to a stage or pipeline; rejected before any stage runs
    #[error("Bad Parameters: {0}")]
    BadParameters(String),

    /// Manual trace finished with fewer than the 3 points needed to form a polygon.
    /// The collected points stay buffered so the caller can resume or clear.
    #[error("Cannot compute area: only {collected} trace point(s) collected, at least 3 required")]
    InsufficientTracePoints { collected: usize },

    /// Failed to write an overlay artifact to disk
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    /// Overlay image could not be encoded
    #[error("Failed to encode overlay image: {0}")]
    ImageEncode(String),

    /// Internal error indicating a bug (please report)
    #[error("Internal Error, please raise an issue on Github: {0}")]
    InternalError(String),
}
