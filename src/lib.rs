//! `nestalgic_core` emulates the MOS Technology 6502 microprocessor found in
//! the Famicom/NES, plus the abstract memory bus it reads and writes
//! through.
//!
//! This crate is deliberately narrow: it has no opinion about pixels,
//! audio, controllers, mappers, or ROM files. Anything that needs a 6502
//! with NES-accurate timing and an NES-shaped memory map builds that on top
//! of [`Cpu`] and [`Bus`]; this crate just gets the instruction set right.

mod addressing;
mod bus;
mod cpu;
mod opcode;
mod status;
mod trace;

pub use addressing::AddressingMode;
pub use bus::{Bus, WorkRamBus};
pub use cpu::Cpu;
pub use opcode::{Instruction, Mnemonic};
pub use status::{Status, StatusFlag};
