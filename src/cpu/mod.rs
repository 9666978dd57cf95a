use log::{debug, trace, warn};
use thiserror::Error;

use crate::memory::{CpuBus, Memory, RESET_VECTOR};
use crate::opcodes::{self, OpCode};

mod addressing;
mod execute;
mod stack;


// Status flags
pub const FLAG_C: u8 = 0x01; // Carry
pub const FLAG_Z: u8 = 0x02; // Zero
pub const FLAG_I: u8 = 0x04; // Interrupt Disable
pub const FLAG_D: u8 = 0x08; // Decimal Mode (tracked, never applied)
pub const FLAG_B: u8 = 0x10; // Break
pub const FLAG_B2: u8 = 0x20; // Break2
pub const FLAG_V: u8 = 0x40; // Overflow
pub const FLAG_N: u8 = 0x80; // Negative

/// Bits a status byte may carry.
pub const FLAG_MASK: u8 = FLAG_C | FLAG_Z | FLAG_I | FLAG_D | FLAG_B | FLAG_B2 | FLAG_V | FLAG_N;

const STACK_RESET: u8 = 0xFD;
const POWER_ON_STATUS: u8 = FLAG_I | FLAG_B2;

/// Error type observer hooks may fail with.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum CpuError {
    #[error("Unmapped opcode ${opcode:02X} at ${pc:04X}")]
    UnmappedOpcode { opcode: u8, pc: u16 },
    #[error("Observer hook failed: {0}")]
    Hook(#[source] HookError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    Running,
    Halted,
}

/// A 6502 core together with the 64KB it exclusively owns.
#[derive(Debug, Clone)]
pub struct Cpu {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    status: u8,
    memory: Memory,
    state: ExecState,
}

impl Cpu {
    /// Power-on state. The core stays halted until `reset`.
    pub fn new() -> Self {
        Self {
            pc: 0,
            a: 0,
            x: 0,
            y: 0,
            sp: STACK_RESET,
            status: POWER_ON_STATUS,
            memory: Memory::new(),
            state: ExecState::Halted,
        }
    }

    /// Copy a program to the load origin and aim the reset vector at it.
    /// Registers and flags are left alone.
    pub fn load(&mut self, program: &[u8]) {
        self.memory.load_program(program);
    }

    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.status = POWER_ON_STATUS;
        self.sp = STACK_RESET;
        self.pc = self.memory.read_u16(RESET_VECTOR);
        self.state = ExecState::Running;
        debug!("Reset: PC=${:04X}", self.pc);
    }

    pub fn load_and_run(&mut self, program: &[u8]) -> Result<(), CpuError> {
        self.load(program);
        self.reset();
        self.run()
    }

    /// Run until BRK or an unmapped opcode.
    pub fn run(&mut self) -> Result<(), CpuError> {
        self.run_with_callback(|_, _, _| Ok(()))
    }

    /// Run until halted, calling `callback` before each instruction with the
    /// opcode about to execute. The callback may `halt()` the core, in which
    /// case that instruction is not executed. There is no built-in step
    /// limit; callers bound runaway programs from the callback.
    ///
    /// Opcodes are looked up before the callback runs, so an unmapped byte
    /// fails with `CpuError::UnmappedOpcode` without the callback seeing it.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<(), CpuError>
    where
        F: FnMut(&mut Cpu, u8, &'static OpCode) -> Result<(), HookError>,
    {
        while self.state == ExecState::Running {
            let op = self.decode()?;
            callback(self, op.code, op).map_err(CpuError::Hook)?;
            if self.state == ExecState::Halted {
                break;
            }
            self.execute_decoded(op);
        }
        Ok(())
    }

    /// Execute a single instruction without a hook.
    pub fn step(&mut self) -> Result<ExecState, CpuError> {
        if self.state == ExecState::Running {
            let op = self.decode()?;
            self.execute_decoded(op);
        }
        Ok(self.state)
    }

    /// Stop at the next instruction boundary.
    pub fn halt(&mut self) {
        self.state = ExecState::Halted;
    }

    pub fn state(&self) -> ExecState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == ExecState::Halted
    }

    // Peek at PC and look the opcode up. PC is left on an unmapped byte.
    fn decode(&mut self) -> Result<&'static OpCode, CpuError> {
        let code = self.memory.read(self.pc);
        match opcodes::lookup(code) {
            Some(op) => Ok(op),
            None => {
                warn!("Unmapped opcode: 0x{:02X} at PC 0x{:04X}", code, self.pc);
                self.state = ExecState::Halted;
                Err(CpuError::UnmappedOpcode {
                    opcode: code,
                    pc: self.pc,
                })
            }
        }
    }

    fn execute_decoded(&mut self, op: &'static OpCode) {
        trace!(
            "{:04X} {:02X} {} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            self.pc,
            op.code,
            op.mnemonic,
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp
        );

        self.pc = self.pc.wrapping_add(1);
        if self.execute(op) == execute::PcUpdate::Advance {
            self.pc = self.pc.wrapping_add(op.len as u16 - 1);
        }
    }

    // Flag operations
    pub fn status(&self) -> u8 {
        self.status
    }

    pub fn set_status(&mut self, bits: u8) {
        self.status = bits & FLAG_MASK;
    }

    pub fn flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    pub fn set_flag(&mut self, flag: u8, value: bool) {
        if value {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    fn update_zero_negative(&mut self, value: u8) {
        self.set_flag(FLAG_Z, value == 0);
        self.set_flag(FLAG_N, (value & FLAG_N) != 0);
    }

    // Host-side memory access
    pub fn mem_read(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    pub fn mem_write(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    pub fn mem_read_u16(&self, addr: u16) -> u16 {
        self.memory.read_u16(addr)
    }

    pub fn mem_write_u16(&mut self, addr: u16, value: u16) {
        self.memory.write_u16(addr, value);
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
