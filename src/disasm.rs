use tracing::warn;

use crate::decoder::{DecodeError, Entry, Format, Insn};
use crate::instructions::{Layout, OpcodeTable};

/// Render one instruction. The operand layout comes from the instruction's
/// descriptor in `table`.
pub fn fmt_insn(table: &OpcodeTable, insn: &Insn) -> Result<String, DecodeError> {
    let format = insn.format();
    let opcode = insn.opcode();
    let desc = table
        .lookup(format, opcode)
        .ok_or(DecodeError::MissingMnemonic { format, opcode })?;
    let mn = desc.mnemonic;

    let s = match (insn, desc.layout) {
        (Insn::R(_), Layout::Bare) => mn.to_string(),
        (Insn::R(r), Layout::Single) => format!("{mn} X{}", r.rn),
        (Insn::R(r), Layout::Shift) => format!("{mn} X{}, X{}, #{}", r.rd, r.rn, r.shamt),
        (Insn::R(r), _) => format!("{mn} X{}, X{}, X{}", r.rd, r.rn, r.rm),
        (Insn::I(i), _) => format!("{mn} X{}, X{}, #{}", i.rd, i.rn, i.imm),
        (Insn::D(d), _) => format!("{mn} X{}, [X{}, #{}]", d.rt, d.rn, d.address),
        (Insn::B(b), _) => format!("{mn} {}", target(b.label.as_deref(), b.offset)),
        (Insn::CB(cb), Layout::CondBranch) => {
            let cond = match cb.cond {
                Some(c) => c.to_string(),
                None => format!("<unrecognized cond {}>", cb.rt),
            };
            format!("{mn}.{cond} {}", target(cb.label.as_deref(), cb.offset))
        }
        (Insn::CB(cb), _) => {
            format!("{mn} X{}, {}", cb.rt, target(cb.label.as_deref(), cb.offset))
        }
    };
    Ok(s)
}

fn target(label: Option<&str>, offset: i32) -> String {
    match label {
        Some(l) => l.to_string(),
        None => format!("{offset:+}"),
    }
}

pub fn fmt_entry(table: &OpcodeTable, entry: &Entry) -> Result<String, DecodeError> {
    match entry {
        Entry::Insn(insn) => fmt_insn(table, insn),
        Entry::Label(l) => Ok(format!("{}:", l.name)),
    }
}

/// Rendered listing plus the problems met while rendering it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub lines: Vec<String>,
    pub errors: Vec<DecodeError>,
}

/// One line per entry. Entries that cannot be rendered are left out; they
/// and B.cond lines rendered with a placeholder condition are reported in
/// `errors`.
pub fn render(table: &OpcodeTable, entries: &[Entry]) -> Rendered {
    let mut out = Rendered::default();
    for e in entries {
        match fmt_entry(table, e) {
            Ok(line) => {
                if let Entry::Insn(Insn::CB(cb)) = e {
                    let is_cond = table
                        .lookup(Format::CB, u16::from(cb.opcode))
                        .is_some_and(|d| d.layout == Layout::CondBranch);
                    if is_cond && cb.cond.is_none() {
                        let err = DecodeError::MissingCondition { cond: cb.rt };
                        warn!(line = %line, "{err}");
                        out.errors.push(err);
                    }
                }
                out.lines.push(line);
            }
            Err(err) => {
                warn!("{err}");
                out.errors.push(err);
            }
        }
    }
    out
}
