//! Error taxonomy shared by the codec, the façade and handlers

/// Errors returned by settings operations
///
/// The façade itself only originates `InvalidName`, `UnknownName` and
/// `Unsupported`. Everything else comes from the codec or from a handler
/// and is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Name is empty, only separators, or deeper than `MAX_NAME_DEPTH`
    InvalidName,
    /// No handler owns the first name segment
    UnknownName,
    /// Handler does not implement the requested operation
    Unsupported,
    /// Value text could not be parsed for the target type
    MalformedValue,
    /// Destination buffer cannot hold the result
    BufferTooSmall,
    /// Handler-specific failure code
    Handler(i32),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidName => f.write_str("invalid name"),
            Error::UnknownName => f.write_str("unknown name"),
            Error::Unsupported => f.write_str("operation not supported"),
            Error::MalformedValue => f.write_str("malformed value"),
            Error::BufferTooSmall => f.write_str("buffer too small"),
            Error::Handler(code) => write!(f, "handler error {}", code),
        }
    }
}
