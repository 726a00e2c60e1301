//! Token emitter: turns window masks into pieces

use crate::piece::StrPiece;
use crate::portability::{clear_lowest_bit, hamming, trailing_zeros};

/// Walks match masks and appends one piece per delimiter
///
/// `token_start` is the only state carried between windows. It starts at 0
/// and only moves forward, to one past each delimiter consumed.
pub struct TokenEmitter<'a, 'o> {
    buf: &'a [u8],
    out: &'o mut Vec<StrPiece<'a>>,
    token_start: usize,
}

impl<'a, 'o> TokenEmitter<'a, 'o> {
    pub fn new(buf: &'a [u8], out: &'o mut Vec<StrPiece<'a>>) -> Self {
        Self {
            buf,
            out,
            token_start: 0,
        }
    }

    /// Offset where the next token begins
    #[inline(always)]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Emit the tokens ending at each set bit of `mask`, lowest bit first
    ///
    /// `window_base` is the absolute offset of lane 0. Every bit must refer
    /// to a byte inside the buffer; callers mask off lanes past the end.
    #[inline(always)]
    pub fn emit(&mut self, window_base: usize, mut mask: u16) {
        if mask == 0 {
            return;
        }

        self.out.reserve(hamming(mask) as usize);
        while mask != 0 {
            let stop = window_base + trailing_zeros(mask) as usize;
            self.out.push(StrPiece::new(self.buf, self.token_start..stop));
            self.token_start = stop + 1;
            mask = clear_lowest_bit(mask);
        }
    }

    /// Emit the trailing token, from the last delimiter to the end of the buffer
    #[inline(always)]
    pub fn finish(self) {
        self.out
            .push(StrPiece::new(self.buf, self.token_start..self.buf.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(pieces: &[StrPiece<'_>]) -> Vec<String> {
        pieces.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_zero_mask_emits_nothing() {
        let buf = b"abcdef";
        let mut out = Vec::new();
        let mut emitter = TokenEmitter::new(buf, &mut out);
        emitter.emit(0, 0);
        assert_eq!(emitter.token_start(), 0);
        emitter.finish();
        assert_eq!(texts(&out), vec!["abcdef"]);
    }

    #[test]
    fn test_bits_consumed_in_ascending_order() {
        let buf = b"a,b,,c";
        let mut out = Vec::new();
        let mut emitter = TokenEmitter::new(buf, &mut out);
        emitter.emit(0, (1 << 1) | (1 << 3) | (1 << 4));
        assert_eq!(emitter.token_start(), 5);
        emitter.finish();
        assert_eq!(texts(&out), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_leading_delimiter_gives_empty_token() {
        let buf = b",x";
        let mut out = Vec::new();
        let mut emitter = TokenEmitter::new(buf, &mut out);
        emitter.emit(0, 1);
        emitter.finish();
        assert_eq!(texts(&out), vec!["", "x"]);
        assert_eq!(out[1].start(), 1);
    }

    #[test]
    fn test_window_base_offsets_tokens() {
        let mut buf = vec![b'x'; 20];
        buf[17] = b',';
        let mut out = Vec::new();
        let mut emitter = TokenEmitter::new(&buf, &mut out);
        emitter.emit(0, 0);
        emitter.emit(16, 1 << 1);
        emitter.finish();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].range(), 0..17);
        assert_eq!(out[1].range(), 18..20);
    }

    #[test]
    fn test_trailing_delimiter_gives_empty_tail() {
        let buf = b"ab;";
        let mut out = Vec::new();
        let mut emitter = TokenEmitter::new(buf, &mut out);
        emitter.emit(0, 1 << 2);
        emitter.finish();
        assert_eq!(texts(&out), vec!["ab", ""]);
        assert_eq!(out[1].range(), 3..3);
    }
}
