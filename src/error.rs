//! Error type for the splitter and its buffer utilities

use std::alloc::LayoutError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while configuring a splitter or loading input
///
/// Scanning itself is infallible; everything here happens before the
/// first window is read.
#[derive(Error, Debug)]
pub enum SplitError {
    /// A delimiter set needs at least one byte
    #[error("delimiter set is empty")]
    EmptyDelimiterSet,

    /// Padded buffers must leave room for one full window past the end
    #[error("padding of {padding} bytes is too small, at least {required} bytes are required")]
    InsufficientPadding {
        /// Padding that was requested
        padding: usize,
        /// Minimum padding (one vector width)
        required: usize,
    },

    /// The requested allocation size cannot be described by a layout
    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] LayoutError),

    /// The allocator returned null
    #[error("memory allocation failed: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested, padding included
        size: usize,
    },

    /// Reading an input file failed
    #[error("could not load '{}': {source}", path.display())]
    Load {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SplitError::EmptyDelimiterSet.to_string(),
            "delimiter set is empty"
        );
        assert_eq!(
            SplitError::InsufficientPadding {
                padding: 4,
                required: 16
            }
            .to_string(),
            "padding of 4 bytes is too small, at least 16 bytes are required"
        );
    }

    #[test]
    fn test_load_message_names_path() {
        let err = SplitError::Load {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.csv"));
        assert!(msg.contains("gone"));
    }
}
