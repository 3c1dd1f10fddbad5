use serde::Serialize;

/// The five LEGv8 encoding formats. Their opcode fields overlap at
/// different widths, see [`crate::isa::legv8::Legv8Decoder::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    R,
    I,
    D,
    B,
    CB,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Format::R => "R",
            Format::I => "I",
            Format::D => "D",
            Format::B => "B",
            Format::CB => "CB",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Op {
    Add,
    Addi,
    And,
    Andi,
    B,
    BCond,
    Bl,
    Br,
    Cbnz,
    Cbz,
    Dump,
    Eor,
    Eori,
    Halt,
    Ldur,
    Lsl,
    Lsr,
    Mul,
    Orr,
    Orri,
    Prnl,
    Prnt,
    Stur,
    Sub,
    Subi,
    Subis,
    Subs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RType {
    pub op: Op,
    pub opcode: u16, // bits 31..21
    pub rm: u8,
    pub shamt: u8,
    pub rn: u8,
    pub rd: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IType {
    pub op: Op,
    pub opcode: u16, // bits 31..22
    pub imm: i32,
    pub rn: u8,
    pub rd: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DType {
    pub op: Op,
    pub opcode: u16, // bits 31..21
    pub address: u16,
    pub mode: u8,
    pub rn: u8,
    pub rt: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BType {
    pub op: Op,
    pub opcode: u8, // bits 31..26
    /// Signed instruction-count delta, not a byte offset.
    pub offset: i32,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CbType {
    pub op: Op,
    pub opcode: u8, // bits 31..24
    pub offset: i32,
    /// Register for CBZ/CBNZ, condition index for B.cond.
    pub rt: u8,
    /// Only set for B.cond when the condition index is known.
    pub cond: Option<&'static str>,
    pub label: Option<String>,
}

/// One decoded instruction word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format")]
pub enum Insn {
    R(RType),
    I(IType),
    D(DType),
    B(BType),
    CB(CbType),
}

impl Insn {
    pub fn op(&self) -> Op {
        match self {
            Insn::R(r) => r.op,
            Insn::I(i) => i.op,
            Insn::D(d) => d.op,
            Insn::B(b) => b.op,
            Insn::CB(cb) => cb.op,
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Insn::R(_) => Format::R,
            Insn::I(_) => Format::I,
            Insn::D(_) => Format::D,
            Insn::B(_) => Format::B,
            Insn::CB(_) => Format::CB,
        }
    }

    pub fn opcode(&self) -> u16 {
        match self {
            Insn::R(r) => r.opcode,
            Insn::I(i) => i.opcode,
            Insn::D(d) => d.opcode,
            Insn::B(b) => b.opcode as u16,
            Insn::CB(cb) => cb.opcode as u16,
        }
    }

    /// Relative branch offset for branch-class instructions.
    pub fn branch_offset(&self) -> Option<i32> {
        match self {
            Insn::B(b) => Some(b.offset),
            Insn::CB(cb) => Some(cb.offset),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Insn::B(b) => b.label.as_deref(),
            Insn::CB(cb) => cb.label.as_deref(),
            _ => None,
        }
    }
}

/// A named branch target inserted into the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub name: String,
    /// Index into the decoded instruction stream.
    pub target: i64,
}

/// An element of the resolved stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Entry {
    Insn(Insn),
    Label(Label),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DecodeError {
    #[error("Unknown instruction: {raw:032b} ({raw:#010x})")]
    UnknownOpcode { raw: u32 },
    #[error("No mnemonic for {format}-format opcode {opcode:#b}")]
    MissingMnemonic { format: Format, opcode: u16 },
    #[error("Unrecognized condition {cond}")]
    MissingCondition { cond: u8 },
    #[error("Branch target {target} of {name} is outside the program")]
    TargetOutOfRange { name: String, target: i64 },
}

/// Sign-extend the low `bits` bits of `v`.
#[inline]
pub fn sign_ext(v: u32, bits: u32) -> i32 {
    let s = 32 - bits;
    ((v << s) as i32) >> s
}

/// Extract bits `hi..=lo` of `word`, right-aligned.
#[inline]
pub fn bits(word: u32, hi: u32, lo: u32) -> u32 {
    let width = hi - lo + 1;
    if width == 32 {
        word
    } else {
        (word >> lo) & ((1u32 << width) - 1)
    }
}

pub trait Decoder {
    fn classify(&self, raw32: u32) -> Option<Format>;
    fn decode(&self, raw32: u32) -> Result<Insn, DecodeError>;
}
