use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReflectDecodeError>;

/// Rejection reasons for a reflection buffer.
///
/// The service is trusted, so any of these indicates either a truncated
/// transfer or a service-side bug. The cache responds by discarding the
/// buffer and leaving its previous state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectDecodeError {
    #[error("need {need} bytes at offset {offset}, but buffer length is {len}")]
    Truncated {
        offset: usize,
        need: usize,
        len: usize,
    },

    #[error("integer overflow while computing buffer offsets")]
    OffsetOverflow,

    #[error("descriptor {index}: {reason}")]
    BadDescriptor { index: usize, reason: &'static str },

    #[error("name bytes at {offset}..{end} are not valid UTF-8")]
    BadName { offset: usize, end: usize },

    #[error("data region cursor {cursor} exceeds buffer length {len}")]
    CursorOverrun { cursor: usize, len: usize },
}
