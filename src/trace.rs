use crate::addressing::AddressingMode;
use crate::cpu::Cpu;
use crate::opcode::{Instruction, Mnemonic};
use crate::status::{Status, StatusFlag};

const FLAG_ORDER: [(StatusFlag, char); 8] = [
    (StatusFlag::Negative, 'N'),
    (StatusFlag::Overflow, 'V'),
    (StatusFlag::Unused, 'U'),
    (StatusFlag::Break, 'B'),
    (StatusFlag::DecimalMode, 'D'),
    (StatusFlag::InterruptDisable, 'I'),
    (StatusFlag::Zero, 'Z'),
    (StatusFlag::Carry, 'C'),
];

/// Renders `P` as eight flag letters, each replaced with `.` when clear,
/// in `NVUBDIZC` order.
fn format_flags(status: Status) -> String {
    FLAG_ORDER
        .iter()
        .map(|(flag, letter)| if status.get(*flag) { *letter } else { '.' })
        .collect()
}

/// Builds one trace line for an instruction that just executed, in the form
/// `XXXX: [MNEM] 0xOO, {A: 0xNN X: 0xNN Y: 0xNN SP: 0xNN PC: 0xNNNN P: ........}`.
fn format_line(opcode_address: u16, instruction: &Instruction, opcode: u8, cpu: &Cpu) -> String {
    format!(
        "{:04X}: [{:?}] {:#04X}, {{A: {:#04X} X: {:#04X} Y: {:#04X} SP: {:#04X} PC: {:#06X} P: {}}}",
        opcode_address,
        instruction.mnemonic,
        opcode,
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.sp,
        cpu.pc,
        format_flags(cpu.p),
    )
}

/// Emits one trace line for an instruction that just executed.
///
/// This is a `log::trace!` call, not a `println!` — a CPU core has no
/// business writing to stdout, so whether this line goes anywhere at all is
/// entirely up to whatever logger the embedding binary installs.
pub fn emit(opcode_address: u16, instruction: &Instruction, opcode: u8, cpu: &Cpu) {
    log::trace!("{}", format_line(opcode_address, instruction, opcode, cpu));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_flags_uses_dots_for_clear_bits() {
        let status = Status::from_byte(0);
        assert_eq!(format_flags(status), "........");
    }

    #[test]
    fn format_flags_marks_set_bits_with_their_letter() {
        let mut status = Status::from_byte(0);
        status.set(StatusFlag::Carry, true);
        status.set(StatusFlag::Negative, true);

        assert_eq!(format_flags(status), "N......C");
    }

    #[test]
    fn format_line_wraps_the_mnemonic_in_brackets() {
        let cpu = Cpu::new();
        // 0xA9 is LDA Immediate, decoded purely to get a real instruction
        // without reaching into opcode.rs's private constructor.
        let instruction = Instruction::decode(0xA9);
        assert_eq!(instruction.mnemonic, Mnemonic::LDA);
        assert_eq!(instruction.mode, AddressingMode::Immediate);

        let line = format_line(0x8000, instruction, 0xA9, &cpu);

        assert!(line.starts_with("8000: [LDA] 0xA9, {"), "{line}");
    }
}
