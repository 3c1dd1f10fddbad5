use tracing::debug;

use crate::decoder::{
    bits, sign_ext, BType, CbType, DType, DecodeError, Decoder, Format, IType, Insn, Op, RType,
};
use crate::instructions::{condition_name, InstrDesc, OpcodeTable};

/// LEGv8 decoder over an immutable opcode table.
///
/// The formats' opcode fields are prefixes of one another, so a word is
/// tried against the widest fields first:
///
/// | order | field    | table |
/// |-------|----------|-------|
/// | 1     | [31:21]  | R     |
/// | 2     | [31:21]  | D     |
/// | 3     | [31:22]  | I     |
/// | 4     | [31:24]  | CB    |
/// | 5     | [31:26]  | B     |
#[derive(Debug, Clone, Default)]
pub struct Legv8Decoder {
    table: OpcodeTable,
}

impl Legv8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder over a custom descriptor slice.
    pub fn with_table(descs: &'static [InstrDesc]) -> Self {
        Self { table: OpcodeTable::new(descs) }
    }

    pub fn table(&self) -> &OpcodeTable {
        &self.table
    }

    fn match_word(&self, raw32: u32) -> Option<&'static InstrDesc> {
        let op11 = bits(raw32, 31, 21) as u16;
        let op10 = bits(raw32, 31, 22) as u16;
        let op8 = bits(raw32, 31, 24) as u16;
        let op6 = bits(raw32, 31, 26) as u16;
        self.table
            .lookup(Format::R, op11)
            .or_else(|| self.table.lookup(Format::D, op11))
            .or_else(|| self.table.lookup(Format::I, op10))
            .or_else(|| self.table.lookup(Format::CB, op8))
            .or_else(|| self.table.lookup(Format::B, op6))
    }
}

impl Decoder for Legv8Decoder {
    fn classify(&self, raw32: u32) -> Option<Format> {
        self.match_word(raw32).map(|d| d.format)
    }

    fn decode(&self, raw32: u32) -> Result<Insn, DecodeError> {
        let desc = self.match_word(raw32).ok_or(DecodeError::UnknownOpcode { raw: raw32 })?;
        let insn = match desc.format {
            Format::R => Insn::R(RType {
                op: desc.op,
                opcode: bits(raw32, 31, 21) as u16,
                rm: bits(raw32, 20, 16) as u8,
                shamt: bits(raw32, 15, 10) as u8,
                rn: bits(raw32, 9, 5) as u8,
                rd: bits(raw32, 4, 0) as u8,
            }),
            Format::I => Insn::I(IType {
                op: desc.op,
                opcode: bits(raw32, 31, 22) as u16,
                imm: sign_ext(bits(raw32, 21, 10), 12),
                rn: bits(raw32, 9, 5) as u8,
                rd: bits(raw32, 4, 0) as u8,
            }),
            Format::D => Insn::D(DType {
                op: desc.op,
                opcode: bits(raw32, 31, 21) as u16,
                address: bits(raw32, 20, 12) as u16,
                mode: bits(raw32, 11, 10) as u8,
                rn: bits(raw32, 9, 5) as u8,
                rt: bits(raw32, 4, 0) as u8,
            }),
            Format::B => Insn::B(BType {
                op: desc.op,
                opcode: bits(raw32, 31, 26) as u8,
                offset: sign_ext(bits(raw32, 25, 0), 26),
                label: None,
            }),
            Format::CB => {
                let rt = bits(raw32, 4, 0) as u8;
                // B.cond reuses Rt as the condition index
                let cond = if desc.op == Op::BCond { condition_name(rt) } else { None };
                Insn::CB(CbType {
                    op: desc.op,
                    opcode: bits(raw32, 31, 24) as u8,
                    offset: sign_ext(bits(raw32, 23, 5), 19),
                    rt,
                    cond,
                    label: None,
                })
            }
        };
        debug!("decoded {raw32:#010x} as {} ({}-format)", desc.mnemonic, desc.format);
        Ok(insn)
    }
}
