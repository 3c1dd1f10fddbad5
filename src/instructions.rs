use std::collections::HashMap;

use crate::decoder::{Format, Op};

/// Operand layout used when rendering a mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `HALT`
    Bare,
    /// `BR X<n>`
    Single,
    /// `LSL Xd, Xn, #shamt`
    Shift,
    /// `ADD Xd, Xn, Xm`
    Reg3,
    /// `ADDI Xd, Xn, #imm`
    Imm,
    /// `LDUR Xt, [Xn, #addr]`
    Mem,
    /// `B label`
    Branch,
    /// `B.EQ label`
    CondBranch,
    /// `CBZ Xt, label`
    CompareBranch,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub format: Format,
    pub opcode: u16,
    pub layout: Layout,
}

const fn desc(
    op: Op,
    mnemonic: &'static str,
    format: Format,
    opcode: u16,
    layout: Layout,
) -> InstrDesc {
    InstrDesc { op, mnemonic, format, opcode, layout }
}

/// Supported LEGv8 subset. Float, byte/half/word loads and stores, the
/// flag-setting ADDS/ANDS family and the divide/high-multiply ops are not
/// part of it.
pub const TABLE: &[InstrDesc] = &[
    desc(Op::Add, "ADD", Format::R, 0b100_0101_1000, Layout::Reg3),
    desc(Op::Addi, "ADDI", Format::I, 0b10_0100_0100, Layout::Imm),
    desc(Op::And, "AND", Format::R, 0b100_0101_0000, Layout::Reg3),
    desc(Op::Andi, "ANDI", Format::I, 0b10_0100_1000, Layout::Imm),
    desc(Op::B, "B", Format::B, 0b00_0101, Layout::Branch),
    desc(Op::BCond, "B", Format::CB, 0b0101_0100, Layout::CondBranch),
    desc(Op::Bl, "BL", Format::B, 0b10_0101, Layout::Branch),
    desc(Op::Br, "BR", Format::R, 0b110_1011_0000, Layout::Single),
    desc(Op::Cbnz, "CBNZ", Format::CB, 0b1011_0101, Layout::CompareBranch),
    desc(Op::Cbz, "CBZ", Format::CB, 0b1011_0100, Layout::CompareBranch),
    desc(Op::Dump, "DUMP", Format::R, 0b111_1111_1110, Layout::Bare),
    desc(Op::Eor, "EOR", Format::R, 0b110_0101_0000, Layout::Reg3),
    desc(Op::Eori, "EORI", Format::I, 0b11_0100_1000, Layout::Imm),
    desc(Op::Halt, "HALT", Format::R, 0b111_1111_1111, Layout::Bare),
    desc(Op::Ldur, "LDUR", Format::D, 0b111_1100_0010, Layout::Mem),
    desc(Op::Lsl, "LSL", Format::R, 0b110_1001_1011, Layout::Shift),
    desc(Op::Lsr, "LSR", Format::R, 0b110_1001_1010, Layout::Shift),
    desc(Op::Mul, "MUL", Format::R, 0b100_1101_1000, Layout::Reg3),
    desc(Op::Orr, "ORR", Format::R, 0b101_0101_0000, Layout::Reg3),
    desc(Op::Orri, "ORRI", Format::I, 0b10_1100_1000, Layout::Imm),
    desc(Op::Prnl, "PRNL", Format::R, 0b111_1111_1100, Layout::Bare),
    desc(Op::Prnt, "PRNT", Format::R, 0b111_1111_1101, Layout::Single),
    desc(Op::Stur, "STUR", Format::D, 0b111_1100_0000, Layout::Mem),
    desc(Op::Sub, "SUB", Format::R, 0b110_0101_1000, Layout::Reg3),
    desc(Op::Subi, "SUBI", Format::I, 0b11_0100_0100, Layout::Imm),
    desc(Op::Subis, "SUBIS", Format::I, 0b11_1100_0100, Layout::Imm),
    desc(Op::Subs, "SUBS", Format::R, 0b111_0101_1000, Layout::Reg3),
];

/// B.cond condition names indexed by the 5-bit Rt field. Indices 14..=31
/// have no name.
pub const CONDITIONS: [&str; 14] = [
    "EQ", "NE", "HS", "LO", "MI", "PL", "VS", "VC", "HI", "LS", "GE", "LT", "GT", "LE",
];

pub fn condition_name(index: u8) -> Option<&'static str> {
    CONDITIONS.get(index as usize).copied()
}

/// Per-format opcode maps built once from a descriptor slice. Read-only
/// after construction.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    maps: HashMap<Format, HashMap<u16, &'static InstrDesc>>,
}

impl OpcodeTable {
    pub fn new(descs: &'static [InstrDesc]) -> Self {
        let mut maps: HashMap<Format, HashMap<u16, &'static InstrDesc>> = HashMap::new();
        for d in descs {
            maps.entry(d.format).or_default().insert(d.opcode, d);
        }
        Self { maps }
    }

    pub fn lookup(&self, format: Format, opcode: u16) -> Option<&'static InstrDesc> {
        self.maps.get(&format)?.get(&opcode).copied()
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new(TABLE)
    }
}
