use crate::addressing::AddressingMode;

/// Every mnemonic the NMOS 6502 recognizes, official and unofficial. The
/// unofficial "multi-byte NOP" forms historically called `DOP`/`TOP` are
/// folded into `NOP` here — they differ only in addressing mode (and so in
/// how many operand bytes they consume), not in effect.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Mnemonic {
    // Loads / stores
    LDA, LDX, LDY, STA, STX, STY,
    // Transfers
    TAX, TAY, TXA, TYA, TSX, TXS,
    // Stack
    PHA, PHP, PLA, PLP,
    // Bitwise
    AND, EOR, ORA, BIT,
    // Arithmetic
    ADC, SBC, CMP, CPX, CPY,
    // Increment / decrement
    INC, INX, INY, DEC, DEX, DEY,
    // Shifts
    ASL, LSR, ROL, ROR,
    // Control flow
    JMP, JSR, RTS, RTI, BRK,
    // Branches
    BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS,
    // Flag ops
    CLC, CLD, CLI, CLV, SEC, SED, SEI,
    NOP,

    // Unofficial / undocumented opcodes. See src/cpu.rs for the handler
    // formula behind each one.
    LAX, SAX, DCP, ISC, SLO, RLA, SRE, RRA,
    ANC, ALR, ARR, AXS, LAS, TAS, SHX, SHY, AHX, XAA,
    /// Halts instruction processing (`KIL`/`JAM`). This core treats it as a
    /// no-op rather than wedging the run loop, since nothing here models
    /// a real halted bus state.
    KIL,
}

/// A fully decoded instruction: everything the run loop needs to fetch
/// operands, dispatch the handler, and advance `PC`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub bytes: u8,
    pub cycles: u8,
}

impl Instruction {
    const fn new(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Instruction {
        let bytes = match mode {
            AddressingMode::Implied | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed => 2,
            AddressingMode::Absolute | AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::Indirect => 3,
        };
        Instruction { mnemonic, mode, bytes, cycles }
    }

    /// Look up the instruction descriptor for `opcode`. Total over all 256
    /// byte values — every one of them is a legal (if sometimes unofficial
    /// and undefined-behavior-flavored) instruction.
    pub fn decode(opcode: u8) -> &'static Instruction {
        &INSTRUCTIONS[opcode as usize]
    }
}

use AddressingMode::*;
use Mnemonic::*;

#[rustfmt::skip]
static INSTRUCTIONS: [Instruction; 256] = [
    /*0x00*/ Instruction::new(BRK, Implied, 7),
    /*0x01*/ Instruction::new(ORA, IndexedIndirect, 6),
    /*0x02*/ Instruction::new(KIL, Implied, 0),
    /*0x03*/ Instruction::new(SLO, IndexedIndirect, 8),
    /*0x04*/ Instruction::new(NOP, ZeroPage, 3),
    /*0x05*/ Instruction::new(ORA, ZeroPage, 3),
    /*0x06*/ Instruction::new(ASL, ZeroPage, 5),
    /*0x07*/ Instruction::new(SLO, ZeroPage, 5),
    /*0x08*/ Instruction::new(PHP, Implied, 3),
    /*0x09*/ Instruction::new(ORA, Immediate, 2),
    /*0x0A*/ Instruction::new(ASL, Accumulator, 2),
    /*0x0B*/ Instruction::new(ANC, Immediate, 2),
    /*0x0C*/ Instruction::new(NOP, Absolute, 4),
    /*0x0D*/ Instruction::new(ORA, Absolute, 4),
    /*0x0E*/ Instruction::new(ASL, Absolute, 6),
    /*0x0F*/ Instruction::new(SLO, Absolute, 6),

    /*0x10*/ Instruction::new(BPL, Relative, 2),
    /*0x11*/ Instruction::new(ORA, IndirectIndexed, 5),
    /*0x12*/ Instruction::new(KIL, Implied, 0),
    /*0x13*/ Instruction::new(SLO, IndirectIndexed, 8),
    /*0x14*/ Instruction::new(NOP, ZeroPageX, 4),
    /*0x15*/ Instruction::new(ORA, ZeroPageX, 4),
    /*0x16*/ Instruction::new(ASL, ZeroPageX, 6),
    /*0x17*/ Instruction::new(SLO, ZeroPageX, 6),
    /*0x18*/ Instruction::new(CLC, Implied, 2),
    /*0x19*/ Instruction::new(ORA, AbsoluteY, 4),
    /*0x1A*/ Instruction::new(NOP, Implied, 2),
    /*0x1B*/ Instruction::new(SLO, AbsoluteY, 7),
    /*0x1C*/ Instruction::new(NOP, AbsoluteX, 4),
    /*0x1D*/ Instruction::new(ORA, AbsoluteX, 4),
    /*0x1E*/ Instruction::new(ASL, AbsoluteX, 7),
    /*0x1F*/ Instruction::new(SLO, AbsoluteX, 7),

    /*0x20*/ Instruction::new(JSR, Absolute, 6),
    /*0x21*/ Instruction::new(AND, IndexedIndirect, 6),
    /*0x22*/ Instruction::new(KIL, Implied, 0),
    /*0x23*/ Instruction::new(RLA, IndexedIndirect, 8),
    /*0x24*/ Instruction::new(BIT, ZeroPage, 3),
    /*0x25*/ Instruction::new(AND, ZeroPage, 3),
    /*0x26*/ Instruction::new(ROL, ZeroPage, 5),
    /*0x27*/ Instruction::new(RLA, ZeroPage, 5),
    /*0x28*/ Instruction::new(PLP, Implied, 4),
    /*0x29*/ Instruction::new(AND, Immediate, 2),
    /*0x2A*/ Instruction::new(ROL, Accumulator, 2),
    /*0x2B*/ Instruction::new(ANC, Immediate, 2),
    /*0x2C*/ Instruction::new(BIT, Absolute, 4),
    /*0x2D*/ Instruction::new(AND, Absolute, 4),
    /*0x2E*/ Instruction::new(ROL, Absolute, 6),
    /*0x2F*/ Instruction::new(RLA, Absolute, 6),

    /*0x30*/ Instruction::new(BMI, Relative, 2),
    /*0x31*/ Instruction::new(AND, IndirectIndexed, 5),
    /*0x32*/ Instruction::new(KIL, Implied, 0),
    /*0x33*/ Instruction::new(RLA, IndirectIndexed, 8),
    /*0x34*/ Instruction::new(NOP, ZeroPageX, 4),
    /*0x35*/ Instruction::new(AND, ZeroPageX, 4),
    /*0x36*/ Instruction::new(ROL, ZeroPageX, 6),
    /*0x37*/ Instruction::new(RLA, ZeroPageX, 6),
    /*0x38*/ Instruction::new(SEC, Implied, 2),
    /*0x39*/ Instruction::new(AND, AbsoluteY, 4),
    /*0x3A*/ Instruction::new(NOP, Implied, 2),
    /*0x3B*/ Instruction::new(RLA, AbsoluteY, 7),
    /*0x3C*/ Instruction::new(NOP, AbsoluteX, 4),
    /*0x3D*/ Instruction::new(AND, AbsoluteX, 4),
    /*0x3E*/ Instruction::new(ROL, AbsoluteX, 7),
    /*0x3F*/ Instruction::new(RLA, AbsoluteX, 7),

    /*0x40*/ Instruction::new(RTI, Implied, 6),
    /*0x41*/ Instruction::new(EOR, IndexedIndirect, 6),
    /*0x42*/ Instruction::new(KIL, Implied, 0),
    /*0x43*/ Instruction::new(SRE, IndexedIndirect, 8),
    /*0x44*/ Instruction::new(NOP, ZeroPage, 3),
    /*0x45*/ Instruction::new(EOR, ZeroPage, 3),
    /*0x46*/ Instruction::new(LSR, ZeroPage, 5),
    /*0x47*/ Instruction::new(SRE, ZeroPage, 5),
    /*0x48*/ Instruction::new(PHA, Implied, 3),
    /*0x49*/ Instruction::new(EOR, Immediate, 2),
    /*0x4A*/ Instruction::new(LSR, Accumulator, 2),
    /*0x4B*/ Instruction::new(ALR, Immediate, 2),
    /*0x4C*/ Instruction::new(JMP, Absolute, 3),
    /*0x4D*/ Instruction::new(EOR, Absolute, 4),
    /*0x4E*/ Instruction::new(LSR, Absolute, 6),
    /*0x4F*/ Instruction::new(SRE, Absolute, 6),

    /*0x50*/ Instruction::new(BVC, Relative, 2),
    /*0x51*/ Instruction::new(EOR, IndirectIndexed, 5),
    /*0x52*/ Instruction::new(KIL, Implied, 0),
    /*0x53*/ Instruction::new(SRE, IndirectIndexed, 8),
    /*0x54*/ Instruction::new(NOP, ZeroPageX, 4),
    /*0x55*/ Instruction::new(EOR, ZeroPageX, 4),
    /*0x56*/ Instruction::new(LSR, ZeroPageX, 6),
    /*0x57*/ Instruction::new(SRE, ZeroPageX, 6),
    /*0x58*/ Instruction::new(CLI, Implied, 2),
    /*0x59*/ Instruction::new(EOR, AbsoluteY, 4),
    /*0x5A*/ Instruction::new(NOP, Implied, 2),
    /*0x5B*/ Instruction::new(SRE, AbsoluteY, 7),
    /*0x5C*/ Instruction::new(NOP, AbsoluteX, 4),
    /*0x5D*/ Instruction::new(EOR, AbsoluteX, 4),
    /*0x5E*/ Instruction::new(LSR, AbsoluteX, 7),
    /*0x5F*/ Instruction::new(SRE, AbsoluteX, 7),

    /*0x60*/ Instruction::new(RTS, Implied, 6),
    /*0x61*/ Instruction::new(ADC, IndexedIndirect, 6),
    /*0x62*/ Instruction::new(KIL, Implied, 0),
    /*0x63*/ Instruction::new(RRA, IndexedIndirect, 8),
    /*0x64*/ Instruction::new(NOP, ZeroPage, 3),
    /*0x65*/ Instruction::new(ADC, ZeroPage, 3),
    /*0x66*/ Instruction::new(ROR, ZeroPage, 5),
    /*0x67*/ Instruction::new(RRA, ZeroPage, 5),
    /*0x68*/ Instruction::new(PLA, Implied, 4),
    /*0x69*/ Instruction::new(ADC, Immediate, 2),
    /*0x6A*/ Instruction::new(ROR, Accumulator, 2),
    /*0x6B*/ Instruction::new(ARR, Immediate, 2),
    /*0x6C*/ Instruction::new(JMP, Indirect, 5),
    /*0x6D*/ Instruction::new(ADC, Absolute, 4),
    /*0x6E*/ Instruction::new(ROR, Absolute, 6),
    /*0x6F*/ Instruction::new(RRA, Absolute, 6),

    /*0x70*/ Instruction::new(BVS, Relative, 2),
    /*0x71*/ Instruction::new(ADC, IndirectIndexed, 5),
    /*0x72*/ Instruction::new(KIL, Implied, 0),
    /*0x73*/ Instruction::new(RRA, IndirectIndexed, 8),
    /*0x74*/ Instruction::new(NOP, ZeroPageX, 4),
    /*0x75*/ Instruction::new(ADC, ZeroPageX, 4),
    /*0x76*/ Instruction::new(ROR, ZeroPageX, 6),
    /*0x77*/ Instruction::new(RRA, ZeroPageX, 6),
    /*0x78*/ Instruction::new(SEI, Implied, 2),
    /*0x79*/ Instruction::new(ADC, AbsoluteY, 4),
    /*0x7A*/ Instruction::new(NOP, Implied, 2),
    /*0x7B*/ Instruction::new(RRA, AbsoluteY, 7),
    /*0x7C*/ Instruction::new(NOP, AbsoluteX, 4),
    /*0x7D*/ Instruction::new(ADC, AbsoluteX, 4),
    /*0x7E*/ Instruction::new(ROR, AbsoluteX, 7),
    /*0x7F*/ Instruction::new(RRA, AbsoluteX, 7),

    /*0x80*/ Instruction::new(NOP, Immediate, 2),
    /*0x81*/ Instruction::new(STA, IndexedIndirect, 6),
    /*0x82*/ Instruction::new(NOP, Immediate, 2),
    /*0x83*/ Instruction::new(SAX, IndexedIndirect, 6),
    /*0x84*/ Instruction::new(STY, ZeroPage, 3),
    /*0x85*/ Instruction::new(STA, ZeroPage, 3),
    /*0x86*/ Instruction::new(STX, ZeroPage, 3),
    /*0x87*/ Instruction::new(SAX, ZeroPage, 3),
    /*0x88*/ Instruction::new(DEY, Implied, 2),
    /*0x89*/ Instruction::new(NOP, Immediate, 2),
    /*0x8A*/ Instruction::new(TXA, Implied, 2),
    /*0x8B*/ Instruction::new(XAA, Immediate, 2),
    /*0x8C*/ Instruction::new(STY, Absolute, 4),
    /*0x8D*/ Instruction::new(STA, Absolute, 4),
    /*0x8E*/ Instruction::new(STX, Absolute, 4),
    /*0x8F*/ Instruction::new(SAX, Absolute, 4),

    /*0x90*/ Instruction::new(BCC, Relative, 2),
    /*0x91*/ Instruction::new(STA, IndirectIndexed, 6),
    /*0x92*/ Instruction::new(KIL, Implied, 0),
    /*0x93*/ Instruction::new(AHX, IndirectIndexed, 6),
    /*0x94*/ Instruction::new(STY, ZeroPageX, 4),
    /*0x95*/ Instruction::new(STA, ZeroPageX, 4),
    /*0x96*/ Instruction::new(STX, ZeroPageY, 4),
    /*0x97*/ Instruction::new(SAX, ZeroPageY, 4),
    /*0x98*/ Instruction::new(TYA, Implied, 2),
    /*0x99*/ Instruction::new(STA, AbsoluteY, 5),
    /*0x9A*/ Instruction::new(TXS, Implied, 2),
    /*0x9B*/ Instruction::new(TAS, AbsoluteY, 5),
    /*0x9C*/ Instruction::new(SHY, AbsoluteX, 5),
    /*0x9D*/ Instruction::new(STA, AbsoluteX, 5),
    /*0x9E*/ Instruction::new(SHX, AbsoluteY, 5),
    /*0x9F*/ Instruction::new(AHX, AbsoluteY, 5),

    /*0xA0*/ Instruction::new(LDY, Immediate, 2),
    /*0xA1*/ Instruction::new(LDA, IndexedIndirect, 6),
    /*0xA2*/ Instruction::new(LDX, Immediate, 2),
    /*0xA3*/ Instruction::new(LAX, IndexedIndirect, 6),
    /*0xA4*/ Instruction::new(LDY, ZeroPage, 3),
    /*0xA5*/ Instruction::new(LDA, ZeroPage, 3),
    /*0xA6*/ Instruction::new(LDX, ZeroPage, 3),
    /*0xA7*/ Instruction::new(LAX, ZeroPage, 3),
    /*0xA8*/ Instruction::new(TAY, Implied, 2),
    /*0xA9*/ Instruction::new(LDA, Immediate, 2),
    /*0xAA*/ Instruction::new(TAX, Implied, 2),
    /*0xAB*/ Instruction::new(LAX, Immediate, 2),
    /*0xAC*/ Instruction::new(LDY, Absolute, 4),
    /*0xAD*/ Instruction::new(LDA, Absolute, 4),
    /*0xAE*/ Instruction::new(LDX, Absolute, 4),
    /*0xAF*/ Instruction::new(LAX, Absolute, 4),

    /*0xB0*/ Instruction::new(BCS, Relative, 2),
    /*0xB1*/ Instruction::new(LDA, IndirectIndexed, 5),
    /*0xB2*/ Instruction::new(KIL, Implied, 0),
    /*0xB3*/ Instruction::new(LAX, IndirectIndexed, 5),
    /*0xB4*/ Instruction::new(LDY, ZeroPageX, 4),
    /*0xB5*/ Instruction::new(LDA, ZeroPageX, 4),
    /*0xB6*/ Instruction::new(LDX, ZeroPageY, 4),
    /*0xB7*/ Instruction::new(LAX, ZeroPageY, 4),
    /*0xB8*/ Instruction::new(CLV, Implied, 2),
    /*0xB9*/ Instruction::new(LDA, AbsoluteY, 4),
    /*0xBA*/ Instruction::new(TSX, Implied, 2),
    /*0xBB*/ Instruction::new(LAS, AbsoluteY, 4),
    /*0xBC*/ Instruction::new(LDY, AbsoluteX, 4),
    /*0xBD*/ Instruction::new(LDA, AbsoluteX, 4),
    /*0xBE*/ Instruction::new(LDX, AbsoluteY, 4),
    /*0xBF*/ Instruction::new(LAX, AbsoluteY, 4),

    /*0xC0*/ Instruction::new(CPY, Immediate, 2),
    /*0xC1*/ Instruction::new(CMP, IndexedIndirect, 6),
    /*0xC2*/ Instruction::new(NOP, Immediate, 2),
    /*0xC3*/ Instruction::new(DCP, IndexedIndirect, 8),
    /*0xC4*/ Instruction::new(CPY, ZeroPage, 3),
    /*0xC5*/ Instruction::new(CMP, ZeroPage, 3),
    /*0xC6*/ Instruction::new(DEC, ZeroPage, 5),
    /*0xC7*/ Instruction::new(DCP, ZeroPage, 5),
    /*0xC8*/ Instruction::new(INY, Implied, 2),
    /*0xC9*/ Instruction::new(CMP, Immediate, 2),
    /*0xCA*/ Instruction::new(DEX, Implied, 2),
    /*0xCB*/ Instruction::new(AXS, Immediate, 2),
    /*0xCC*/ Instruction::new(CPY, Absolute, 4),
    /*0xCD*/ Instruction::new(CMP, Absolute, 4),
    /*0xCE*/ Instruction::new(DEC, Absolute, 6),
    /*0xCF*/ Instruction::new(DCP, Absolute, 6),

    /*0xD0*/ Instruction::new(BNE, Relative, 2),
    /*0xD1*/ Instruction::new(CMP, IndirectIndexed, 5),
    /*0xD2*/ Instruction::new(KIL, Implied, 0),
    /*0xD3*/ Instruction::new(DCP, IndirectIndexed, 8),
    /*0xD4*/ Instruction::new(NOP, ZeroPageX, 4),
    /*0xD5*/ Instruction::new(CMP, ZeroPageX, 4),
    /*0xD6*/ Instruction::new(DEC, ZeroPageX, 6),
    /*0xD7*/ Instruction::new(DCP, ZeroPageX, 6),
    /*0xD8*/ Instruction::new(CLD, Implied, 2),
    /*0xD9*/ Instruction::new(CMP, AbsoluteY, 4),
    /*0xDA*/ Instruction::new(NOP, Implied, 2),
    /*0xDB*/ Instruction::new(DCP, AbsoluteY, 7),
    /*0xDC*/ Instruction::new(NOP, AbsoluteX, 4),
    /*0xDD*/ Instruction::new(CMP, AbsoluteX, 4),
    /*0xDE*/ Instruction::new(DEC, AbsoluteX, 7),
    /*0xDF*/ Instruction::new(DCP, AbsoluteX, 7),

    /*0xE0*/ Instruction::new(CPX, Immediate, 2),
    /*0xE1*/ Instruction::new(SBC, IndexedIndirect, 6),
    /*0xE2*/ Instruction::new(NOP, Immediate, 2),
    /*0xE3*/ Instruction::new(ISC, IndexedIndirect, 8),
    /*0xE4*/ Instruction::new(CPX, ZeroPage, 3),
    /*0xE5*/ Instruction::new(SBC, ZeroPage, 3),
    /*0xE6*/ Instruction::new(INC, ZeroPage, 5),
    /*0xE7*/ Instruction::new(ISC, ZeroPage, 5),
    /*0xE8*/ Instruction::new(INX, Implied, 2),
    /*0xE9*/ Instruction::new(SBC, Immediate, 2),
    /*0xEA*/ Instruction::new(NOP, Implied, 2),
    /*0xEB*/ Instruction::new(SBC, Immediate, 2),
    /*0xEC*/ Instruction::new(CPX, Absolute, 4),
    /*0xED*/ Instruction::new(SBC, Absolute, 4),
    /*0xEE*/ Instruction::new(INC, Absolute, 6),
    /*0xEF*/ Instruction::new(ISC, Absolute, 6),

    /*0xF0*/ Instruction::new(BEQ, Relative, 2),
    /*0xF1*/ Instruction::new(SBC, IndirectIndexed, 5),
    /*0xF2*/ Instruction::new(KIL, Implied, 0),
    /*0xF3*/ Instruction::new(ISC, IndirectIndexed, 8),
    /*0xF4*/ Instruction::new(NOP, ZeroPageX, 4),
    /*0xF5*/ Instruction::new(SBC, ZeroPageX, 4),
    /*0xF6*/ Instruction::new(INC, ZeroPageX, 6),
    /*0xF7*/ Instruction::new(ISC, ZeroPageX, 6),
    /*0xF8*/ Instruction::new(SED, Implied, 2),
    /*0xF9*/ Instruction::new(SBC, AbsoluteY, 4),
    /*0xFA*/ Instruction::new(NOP, Implied, 2),
    /*0xFB*/ Instruction::new(ISC, AbsoluteY, 7),
    /*0xFC*/ Instruction::new(NOP, AbsoluteX, 4),
    /*0xFD*/ Instruction::new(SBC, AbsoluteX, 4),
    /*0xFE*/ Instruction::new(INC, AbsoluteX, 7),
    /*0xFF*/ Instruction::new(ISC, AbsoluteX, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total_and_every_byte_length_is_valid() {
        for opcode in 0..=255u8 {
            let instruction = Instruction::decode(opcode);
            assert!((1..=3).contains(&instruction.bytes), "opcode {opcode:#04X} has bytes={}", instruction.bytes);
        }
    }

    #[test]
    fn opcode_0x50_is_bvc_not_bcs() {
        let instruction = Instruction::decode(0x50);
        assert_eq!(instruction.mnemonic, Mnemonic::BVC);
        assert_eq!(instruction.mode, AddressingMode::Relative);
    }

    #[test]
    fn brk_is_implied_single_byte() {
        let instruction = Instruction::decode(0x00);
        assert_eq!(instruction.mnemonic, Mnemonic::BRK);
        assert_eq!(instruction.bytes, 1);
    }

    #[test]
    fn jsr_is_three_byte_absolute() {
        let instruction = Instruction::decode(0x20);
        assert_eq!(instruction.mnemonic, Mnemonic::JSR);
        assert_eq!(instruction.mode, AddressingMode::Absolute);
        assert_eq!(instruction.bytes, 3);
    }

    #[test]
    fn unofficial_opcodes_fill_every_gap_in_the_official_map() {
        // Spot-check a representative sample of unofficial slots rather than
        // every one of them — the full map is exercised by `table_is_total_and_every_byte_length_is_valid`.
        assert_eq!(Instruction::decode(0x02).mnemonic, Mnemonic::KIL);
        assert_eq!(Instruction::decode(0xA3).mnemonic, Mnemonic::LAX);
        assert_eq!(Instruction::decode(0xEB).mnemonic, Mnemonic::SBC);
        assert_eq!(Instruction::decode(0x0B).mnemonic, Mnemonic::ANC);
        assert_eq!(Instruction::decode(0xCB).mnemonic, Mnemonic::AXS);
    }
}
