//! # simdsplit
//!
//! A fast SIMD string splitter.
//!
//! Splits a byte buffer on a fixed set of single-byte delimiters, 16 bytes
//! per step, and returns borrowed [`StrPiece`] views into the input instead
//! of copies. Uses SSE2 on x86_64, NEON on aarch64 and a scalar loop
//! elsewhere.
//!
//! ```
//! use simdsplit::Splitter;
//!
//! let splitter = Splitter::new(b",*").unwrap();
//! let pieces = splitter.split(b"a,b*,c");
//! let tokens: Vec<String> = pieces.iter().map(|p| p.to_string()).collect();
//! assert_eq!(tokens, ["a", "b", "", "c"]);
//! ```

pub mod delimiters;
pub mod emitter;
pub mod error;
pub mod io;
pub mod memory;
pub mod piece;
pub mod portability;
pub mod scanner;
pub mod splitter;

pub use delimiters::DelimiterSet;
pub use error::{Result, SplitError};
pub use io::{get_corpus, PaddedBuffer};
pub use piece::StrPiece;
pub use splitter::{split, Splitter};

/// Bytes examined per scan step
pub const VECTOR_WIDTH: usize = 16;

/// Default padding for buffers loaded with [`get_corpus`]
pub const SPLIT_PADDING: usize = 64;
