use legv8_rs::instructions::{InstrDesc, Layout};
use legv8_rs::{Decoder, Format, Insn, Legv8Decoder, Op};

// 11-bit pattern shared by every format at its own width
const X: u16 = 0b100_0101_1000;

const fn d(op: Op, format: Format, opcode: u16, layout: Layout) -> InstrDesc {
    InstrDesc { op, mnemonic: "T", format, opcode, layout }
}

static ALL: [InstrDesc; 5] = [
    d(Op::B, Format::B, X >> 5, Layout::Branch),
    d(Op::Cbz, Format::CB, X >> 3, Layout::CompareBranch),
    d(Op::Addi, Format::I, X >> 1, Layout::Imm),
    d(Op::Ldur, Format::D, X, Layout::Mem),
    d(Op::Add, Format::R, X, Layout::Reg3),
];

fn word() -> u32 {
    (u32::from(X) << 21) | 0x0001_2345
}

#[test]
fn widest_format_wins() {
    let cases: [(&'static [InstrDesc], Format); 5] = [
        (&ALL, Format::R),
        (&ALL[..4], Format::D),
        (&ALL[..3], Format::I),
        (&ALL[..2], Format::CB),
        (&ALL[..1], Format::B),
    ];
    for (table, want) in cases {
        let dec = Legv8Decoder::with_table(table);
        assert_eq!(dec.classify(word()), Some(want), "table of {}", table.len());
        assert_eq!(dec.decode(word()).unwrap().format(), want);
    }
}

#[test]
fn empty_table_classifies_nothing() {
    let dec = Legv8Decoder::with_table(&[]);
    assert_eq!(dec.classify(word()), None);
    assert!(dec.decode(word()).is_err());
}

#[test]
fn builtin_table_classifies_each_format() {
    let dec = Legv8Decoder::new();
    assert_eq!(dec.classify(0x8B03_0041), Some(Format::R));
    assert_eq!(dec.classify(0x9100_0421), Some(Format::I)); // ADDI X1, X1, #1
    assert_eq!(dec.classify(0xF840_0020), Some(Format::D)); // LDUR X0, [X1, #0]
    assert_eq!(dec.classify(0x1400_0000), Some(Format::B));
    assert_eq!(dec.classify(0x5400_0000), Some(Format::CB));
    assert_eq!(dec.classify(0xB500_0000), Some(Format::CB));
}

#[test]
fn b_cond_and_cbz_decode_distinctly() {
    let dec = Legv8Decoder::new();
    let Insn::CB(cb) = dec.decode(0x5400_0020).unwrap() else { panic!("not CB") };
    assert_eq!((cb.op, cb.cond, cb.offset), (Op::BCond, Some("EQ"), 1));
    let Insn::CB(cb) = dec.decode(0xB400_0020).unwrap() else { panic!("not CB") };
    assert_eq!((cb.op, cb.cond, cb.offset), (Op::Cbz, None, 1));
}
