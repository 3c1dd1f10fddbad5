use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DisasmConfig;
use crate::decoder::{Entry, Insn, Label};

/// Instruction stream with label markers merged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub entries: Vec<Entry>,
    /// Every allocated label, ascending by target.
    pub labels: Vec<Label>,
    /// Labels whose target lies outside `0..=insns.len()`. Their branches
    /// are named but no marker is placed.
    pub dangling: Vec<Label>,
}

/// Name every branch target and merge the label markers into the stream.
///
/// Targets are `index + offset` where `index` is the branch's position in
/// `insns`. Names are allocated in order of first use; branches sharing a
/// target share the name.
pub fn resolve_labels(mut insns: Vec<Insn>, cfg: &DisasmConfig) -> Resolved {
    let mut by_target: HashMap<i64, usize> = HashMap::new();
    let mut labels: Vec<Label> = Vec::new();

    for (index, insn) in insns.iter_mut().enumerate() {
        let (offset, label) = match insn {
            Insn::B(b) => (b.offset, &mut b.label),
            Insn::CB(cb) => (cb.offset, &mut cb.label),
            _ => continue,
        };
        let target = index as i64 + i64::from(offset);
        let id = *by_target.entry(target).or_insert_with(|| {
            let name = cfg.label_name(labels.len());
            debug!(index, target, name = %name, "new label");
            labels.push(Label { name, target });
            labels.len() - 1
        });
        *label = Some(labels[id].name.clone());
    }

    labels.sort_by_key(|l| l.target);

    let len = insns.len() as i64;
    let (placed, dangling): (Vec<Label>, Vec<Label>) =
        labels.iter().cloned().partition(|l| (0..=len).contains(&l.target));
    for l in &dangling {
        warn!(target = l.target, name = %l.name, "branch target outside program");
    }

    let mut entries = Vec::with_capacity(insns.len() + placed.len());
    let mut pending = placed.into_iter().peekable();
    for (index, insn) in insns.into_iter().enumerate() {
        while let Some(l) = pending.next_if(|l| l.target == index as i64) {
            entries.push(Entry::Label(l));
        }
        entries.push(Entry::Insn(insn));
    }
    // only the end-of-program target can remain
    entries.extend(pending.map(Entry::Label));

    Resolved { entries, labels, dangling }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{BType, CbType, Op, RType};

    fn nop() -> Insn {
        Insn::R(RType { op: Op::Add, opcode: 0b100_0101_1000, rm: 0, shamt: 0, rn: 0, rd: 0 })
    }

    fn b(offset: i32) -> Insn {
        Insn::B(BType { op: Op::B, opcode: 0b00_0101, offset, label: None })
    }

    fn cbz(offset: i32) -> Insn {
        let op = Op::Cbz;
        Insn::CB(CbType { op, opcode: 0b1011_0100, offset, rt: 0, cond: None, label: None })
    }

    fn shape(entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                Entry::Label(l) => format!("{}:", l.name),
                Entry::Insn(i) => match i.label() {
                    Some(l) => format!("-> {l}"),
                    None => "insn".into(),
                },
            })
            .collect()
    }

    #[test]
    fn shared_target_shares_one_label() {
        // 0: b +2, 1: cbz +1, 2: nop
        let r = resolve_labels(vec![b(2), cbz(1), nop()], &DisasmConfig::default());
        assert_eq!(shape(&r.entries), ["-> label1", "-> label1", "label1:", "insn"]);
        assert_eq!(r.labels.len(), 1);
    }

    #[test]
    fn names_follow_first_use_order_and_markers_follow_targets() {
        // 0: nop, 1: b +2 (->3), 2: b -2 (->0), 3: nop
        let r = resolve_labels(vec![nop(), b(2), b(-2), nop()], &DisasmConfig::default());
        assert_eq!(
            shape(&r.entries),
            ["label2:", "insn", "-> label1", "-> label2", "label1:", "insn"]
        );
        let targets: Vec<i64> = r.labels.iter().map(|l| l.target).collect();
        assert_eq!(targets, [0, 3]);
    }

    #[test]
    fn self_loop_precedes_itself() {
        let r = resolve_labels(vec![nop(), b(0)], &DisasmConfig::default());
        assert_eq!(shape(&r.entries), ["insn", "label1:", "-> label1"]);
    }

    #[test]
    fn out_of_range_targets_dangle() {
        let r = resolve_labels(vec![b(-1), b(5)], &DisasmConfig::default());
        assert_eq!(shape(&r.entries), ["-> label1", "-> label2"]);
        assert_eq!(r.dangling.len(), 2);
        assert_eq!(r.dangling[0].target, -1);
        assert_eq!(r.dangling[1].target, 6);
    }

    #[test]
    fn prefix_and_start_are_configurable() {
        let cfg = DisasmConfig { label_prefix: "L".into(), first_label: 0 };
        let r = resolve_labels(vec![b(1), b(1), nop()], &cfg);
        assert_eq!(shape(&r.entries), ["-> L0", "L0:", "-> L1", "L1:", "insn"]);
    }

    #[test]
    fn numbering_past_u32_max_does_not_wrap() {
        let cfg = DisasmConfig { label_prefix: "L".into(), first_label: u32::MAX };
        let r = resolve_labels(vec![b(1), b(1), nop()], &cfg);
        assert_eq!(
            shape(&r.entries),
            ["-> L4294967295", "L4294967295:", "-> L4294967296", "L4294967296:", "insn"]
        );
    }
}
