//! Instruction-execution core of the Nesium emulator: a 6502 with a flat
//! 64KB address space.
//!
//! ```
//! use nesium_core::cpu::{Cpu, FLAG_Z};
//!
//! let mut cpu = Cpu::new();
//! cpu.load_and_run(&[0xA9, 0x05, 0x00]).unwrap(); // LDA #$05; BRK
//! assert_eq!(cpu.a, 0x05);
//! assert!(!cpu.flag(FLAG_Z));
//! ```

pub mod arith;
pub mod cpu;
pub mod memory;
pub mod opcodes;
pub mod trace;

#[cfg(feature = "cli")]
pub mod config;
