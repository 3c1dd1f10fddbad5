pub mod config;
pub mod decoder;
pub mod disasm;
pub mod instructions;
pub mod labels;
pub mod memory;
pub mod stream;

pub mod isa {
    pub mod legv8; // LEGv8 teaching subset of ARMv8
}

pub use config::DisasmConfig;
pub use decoder::{DecodeError, Decoder, Entry, Format, Insn, Label, Op};
pub use isa::legv8::Legv8Decoder;
pub use stream::Diagnostic;

use serde::Serialize;

/// Result of running the whole pipeline over a word sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disassembly {
    pub lines: Vec<String>,
    pub entries: Vec<Entry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode, resolve labels, and render `words` with the given decoder.
///
/// `diagnostics` collects unknown words first, then branch targets outside
/// the program, then rendering problems.
pub fn disassemble_with<I>(dec: &Legv8Decoder, cfg: &DisasmConfig, words: I) -> Disassembly
where
    I: IntoIterator<Item = u32>,
{
    let stream = stream::build_stream(dec, words);
    let resolved = labels::resolve_labels(stream.insns, cfg);
    let rendered = disasm::render(dec.table(), &resolved.entries);

    let mut diagnostics = stream.diagnostics;
    diagnostics.extend(resolved.dangling.into_iter().map(|l| {
        Diagnostic::from(DecodeError::TargetOutOfRange { name: l.name, target: l.target })
    }));
    diagnostics.extend(rendered.errors.into_iter().map(Diagnostic::from));

    Disassembly { lines: rendered.lines, entries: resolved.entries, diagnostics }
}

/// [`disassemble_with`] using the built-in opcode table and default config.
pub fn disassemble<I>(words: I) -> Disassembly
where
    I: IntoIterator<Item = u32>,
{
    disassemble_with(&Legv8Decoder::new(), &DisasmConfig::default(), words)
}
