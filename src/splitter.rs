//! Splitter: drives the block scanner over a buffer and stitches tokens

use crate::delimiters::DelimiterSet;
use crate::emitter::TokenEmitter;
use crate::error::Result;
use crate::io::PaddedBuffer;
use crate::piece::StrPiece;
use crate::portability::{hamming, lane_mask};
use crate::scanner::{scan_block, scan_window, Window};
use crate::VECTOR_WIDTH;

/// Splits byte buffers on a fixed set of single-byte delimiters
///
/// Every call produces the tokens in source order, empty tokens included,
/// followed by exactly one trailing token (the whole input when no
/// delimiter occurs). An empty input yields one empty token.
///
/// A `Splitter` is immutable once built and can be shared between threads
/// that split different buffers.
#[derive(Clone, Debug)]
pub struct Splitter {
    delimiters: DelimiterSet,
}

impl Splitter {
    /// Build a splitter for `delimiters`; fails if the set is empty
    pub fn new(delimiters: &[u8]) -> Result<Self> {
        let delimiters = DelimiterSet::new(delimiters)?;
        tracing::trace!(delimiters = ?delimiters.bytes(), "built delimiter vectors");
        Ok(Self { delimiters })
    }

    pub fn from_set(delimiters: DelimiterSet) -> Self {
        Self { delimiters }
    }

    pub fn delimiters(&self) -> &DelimiterSet {
        &self.delimiters
    }

    /// Split `buf` into a new vector of pieces
    pub fn split<'a>(&self, buf: &'a [u8]) -> Vec<StrPiece<'a>> {
        let mut out = Vec::new();
        self.split_into(buf, &mut out);
        out
    }

    /// Split `buf`, appending the pieces to `out`
    ///
    /// Full windows are read in place. A short final window is copied into a
    /// zeroed stack window and its mask is cut to the valid lanes, so no
    /// read ever leaves `buf`.
    pub fn split_into<'a>(&self, buf: &'a [u8], out: &mut Vec<StrPiece<'a>>) {
        let mut emitter = TokenEmitter::new(buf, out);
        let mut chunks = buf.chunks_exact(VECTOR_WIDTH);
        let mut window_base = 0;

        for chunk in chunks.by_ref() {
            if let Ok(window) = <&[u8; VECTOR_WIDTH]>::try_from(chunk) {
                emitter.emit(window_base, scan_window(window, &self.delimiters));
            }
            window_base += VECTOR_WIDTH;
        }

        let tail = chunks.remainder();
        if !tail.is_empty() {
            let window = Window::partial(tail);
            let mask = scan_window(&window.0, &self.delimiters) & lane_mask(tail.len());
            emitter.emit(window_base, mask);
        }

        emitter.finish();
    }

    /// Split the data of a padded buffer
    ///
    /// Same output as [`Splitter::split`] on `buf.data()`, but every window,
    /// the last one included, is loaded straight from the buffer: the final
    /// read may run into the padding, never past it.
    pub fn split_padded<'a>(&self, buf: &'a PaddedBuffer) -> Vec<StrPiece<'a>> {
        let data = buf.data();
        let len = data.len();
        let mut out = Vec::new();
        let mut emitter = TokenEmitter::new(data, &mut out);
        let mut window_base = 0;

        while window_base < len {
            // SAFETY: window_base < len and the buffer keeps at least
            // VECTOR_WIDTH readable bytes after len.
            let mask = unsafe { scan_block(buf.as_ptr().add(window_base), &self.delimiters) };
            emitter.emit(window_base, mask & lane_mask(len - window_base));
            window_base += VECTOR_WIDTH;
        }

        emitter.finish();
        out
    }

    /// Number of tokens `buf` splits into, without building pieces
    pub fn count(&self, buf: &[u8]) -> usize {
        let mut chunks = buf.chunks_exact(VECTOR_WIDTH);
        let mut delimiters = 0;

        for chunk in chunks.by_ref() {
            if let Ok(window) = <&[u8; VECTOR_WIDTH]>::try_from(chunk) {
                delimiters += hamming(scan_window(window, &self.delimiters)) as usize;
            }
        }

        let tail = chunks.remainder();
        if !tail.is_empty() {
            let window = Window::partial(tail);
            let mask = scan_window(&window.0, &self.delimiters) & lane_mask(tail.len());
            delimiters += hamming(mask) as usize;
        }

        delimiters + 1
    }
}

/// Split `buf` on `delimiters` in one call
///
/// Builds the delimiter vectors on every call; keep a [`Splitter`] around
/// when splitting many buffers with the same set.
pub fn split<'a>(buf: &'a [u8], delimiters: &[u8]) -> Result<Vec<StrPiece<'a>>> {
    Ok(Splitter::new(delimiters)?.split(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitError;

    fn texts(pieces: &[StrPiece<'_>]) -> Vec<String> {
        pieces.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_simple_split() {
        let pieces = split(b"a,b,,c", b",").unwrap();
        assert_eq!(texts(&pieces), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_demo_string() {
        let input = b"this,is,a,string,separated,,,,,,by*stars*and,commas";
        let pieces = split(input, b",*").unwrap();
        assert_eq!(
            texts(&pieces),
            vec![
                "this", "is", "a", "string", "separated", "", "", "", "", "", "by", "stars",
                "and", "commas"
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let pieces = split(b"", b",").unwrap();
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].is_empty());
        assert_eq!(pieces[0].range(), 0..0);
    }

    #[test]
    fn test_no_delimiters() {
        let input = vec![b'a'; 100];
        let pieces = split(&input, b",").unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].as_bytes(), &input[..]);
    }

    #[test]
    fn test_empty_delimiter_set() {
        assert!(matches!(split(b"abc", b""), Err(SplitError::EmptyDelimiterSet)));
    }

    #[test]
    fn test_window_boundaries() {
        for pos in [0, 14, 15, 16, 17, 31, 32, 33, 47] {
            let mut input = vec![b'x'; 48];
            input[pos] = b',';
            let pieces = split(&input, b",").unwrap();
            assert_eq!(pieces.len(), 2, "delimiter at {}", pos);
            assert_eq!(pieces[0].range(), 0..pos);
            assert_eq!(pieces[1].range(), pos + 1..48);
        }
    }

    #[test]
    fn test_exact_multiple_of_window() {
        let input = b"0123456789abcde,";
        assert_eq!(input.len(), VECTOR_WIDTH);
        let pieces = split(input, b",").unwrap();
        assert_eq!(texts(&pieces), vec!["0123456789abcde", ""]);

        let input = [b'y'; 32];
        let pieces = split(&input, b",").unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].range(), 0..32);
    }

    #[test]
    fn test_nul_delimiter_ignores_tail_lanes() {
        let input = b"ab\0cd";
        let pieces = split(input, b"\0").unwrap();
        assert_eq!(texts(&pieces), vec!["ab", "cd"]);
    }

    #[test]
    fn test_split_into_appends() {
        let splitter = Splitter::new(b";").unwrap();
        let first = b"a;b";
        let second = b"c";
        let mut out = Vec::new();
        splitter.split_into(first, &mut out);
        splitter.split_into(second, &mut out);
        assert_eq!(texts(&out), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_padded_matches_split() {
        let splitter = Splitter::new(b",\n").unwrap();
        for len in [0, 1, 15, 16, 17, 31, 32, 33, 100] {
            let input: Vec<u8> = (0..len)
                .map(|i| if i % 7 == 3 { b',' } else if i % 11 == 5 { b'\n' } else { b'z' })
                .collect();
            let padded = PaddedBuffer::from_bytes(&input, 16).unwrap();
            let expected: Vec<_> = splitter.split(&input).iter().map(|p| p.range()).collect();
            let actual: Vec<_> = splitter.split_padded(&padded).iter().map(|p| p.range()).collect();
            assert_eq!(actual, expected, "length {}", len);
        }
    }

    #[test]
    fn test_split_padded_nul_delimiter() {
        let splitter = Splitter::new(b"\0").unwrap();
        let padded = PaddedBuffer::from_bytes(b"a\0b", 64).unwrap();
        let pieces = splitter.split_padded(&padded);
        assert_eq!(texts(&pieces), vec!["a", "b"]);
    }

    #[test]
    fn test_from_prebuilt_set() {
        let set = DelimiterSet::new(b"|").unwrap();
        let splitter = Splitter::from_set(set.clone());
        assert_eq!(splitter.delimiters().bytes(), set.bytes());
        assert_eq!(texts(&splitter.split(b"x|y")), vec!["x", "y"]);
    }

    #[test]
    fn test_count_matches_split() {
        let splitter = Splitter::new(b",*").unwrap();
        let input = b"this,is,a,string,separated,,,,,,by*stars*and,commas";
        assert_eq!(splitter.count(input), splitter.split(input).len());
        assert_eq!(splitter.count(b""), 1);
    }

    #[test]
    fn test_pieces_tile_the_input() {
        let input = b",,lead,mid,,trail,,";
        let pieces = split(input, b",").unwrap();
        let mut expected_start = 0;
        for piece in &pieces {
            assert_eq!(piece.start(), expected_start);
            expected_start = piece.end() + 1;
        }
        assert_eq!(pieces.last().unwrap().end(), input.len());
    }
}
