use serde::Serialize;
use tracing::warn;

use crate::decoder::{DecodeError, Decoder, Insn};

/// A non-fatal problem found while decoding, resolving or rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Position of the offending word in the input, counting every word.
    /// `None` for problems found after decoding.
    pub word_index: Option<usize>,
    pub error: DecodeError,
}

impl Diagnostic {
    pub fn at_word(word_index: usize, error: DecodeError) -> Self {
        Self { word_index: Some(word_index), error }
    }
}

impl From<DecodeError> for Diagnostic {
    fn from(error: DecodeError) -> Self {
        Self { word_index: None, error }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.word_index {
            Some(i) => write!(f, "word {i}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Decoded instructions in program order. An instruction's index in
/// `insns` is its position among successfully decoded words; skipped
/// words take no index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stream {
    pub insns: Vec<Insn>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn build_stream<D, I>(dec: &D, words: I) -> Stream
where
    D: Decoder,
    I: IntoIterator<Item = u32>,
{
    let mut stream = Stream::default();
    for (word_index, raw) in words.into_iter().enumerate() {
        match dec.decode(raw) {
            Ok(insn) => stream.insns.push(insn),
            Err(error) => {
                warn!(word_index, "{error}");
                stream.diagnostics.push(Diagnostic::at_word(word_index, error));
            }
        }
    }
    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Op;
    use crate::isa::legv8::Legv8Decoder;

    #[test]
    fn unknown_words_take_no_index() {
        let dec = Legv8Decoder::new();
        let s = build_stream(&dec, [0x8B03_0041, 0x0000_0000, 0xFFE0_0000, 0x8B02_0021]);
        assert_eq!(s.insns.len(), 3);
        assert_eq!(s.insns[1].op(), Op::Halt);
        assert_eq!(s.diagnostics.len(), 1);
        assert_eq!(s.diagnostics[0].word_index, Some(1));
        assert_eq!(s.diagnostics[0].error, DecodeError::UnknownOpcode { raw: 0 });
    }

    #[test]
    fn empty_input_is_empty_stream() {
        let s = build_stream(&Legv8Decoder::new(), Vec::new());
        assert!(s.insns.is_empty());
        assert!(s.diagnostics.is_empty());
    }
}
