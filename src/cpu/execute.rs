use log::info;

use super::{Cpu, ExecState, FLAG_C, FLAG_D, FLAG_I, FLAG_N, FLAG_V, FLAG_Z};
use crate::arith::{self, wrapping_add, wrapping_sub};
use crate::memory::CpuBus;
use crate::opcodes::{AddressingMode, OpCode, Operation};

/// Whether an instruction left PC for the executor to advance past its
/// operands, or set PC itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PcUpdate {
    Advance,
    Jumped,
}

impl Cpu {
    /// Run the semantics for `op`. PC points just past the opcode byte.
    pub(super) fn execute(&mut self, op: &OpCode) -> PcUpdate {
        let mode = op.mode;
        match op.op {
            Operation::Brk => {
                self.state = ExecState::Halted;
                info!("BRK at ${:04X}, halting", self.pc.wrapping_sub(1));
            }
            Operation::Nop => {}

            // Loads and stores
            Operation::Lda => {
                self.a = self.read_operand(mode);
                self.update_zero_negative(self.a);
            }
            Operation::Ldx => {
                self.x = self.read_operand(mode);
                self.update_zero_negative(self.x);
            }
            Operation::Ldy => {
                self.y = self.read_operand(mode);
                self.update_zero_negative(self.y);
            }
            Operation::Sta => self.store(mode, self.a),
            Operation::Stx => self.store(mode, self.x),
            Operation::Sty => self.store(mode, self.y),

            // Arithmetic and logic
            Operation::Adc => {
                let value = self.read_operand(mode);
                self.adc(value);
            }
            Operation::Sbc => {
                let value = self.read_operand(mode);
                self.sbc(value);
            }
            Operation::And => {
                self.a &= self.read_operand(mode);
                self.update_zero_negative(self.a);
            }
            Operation::Eor => {
                self.a ^= self.read_operand(mode);
                self.update_zero_negative(self.a);
            }
            Operation::Ora => {
                self.a |= self.read_operand(mode);
                self.update_zero_negative(self.a);
            }
            Operation::Bit => {
                let value = self.read_operand(mode);
                self.bit(value);
            }
            Operation::Cmp => self.compare(mode, self.a),
            Operation::Cpx => self.compare(mode, self.x),
            Operation::Cpy => self.compare(mode, self.y),

            // Shifts, rotates, increments
            Operation::Asl => self.read_modify_write(mode, Cpu::asl),
            Operation::Lsr => self.read_modify_write(mode, Cpu::lsr),
            Operation::Rol => self.read_modify_write(mode, Cpu::rol),
            Operation::Ror => self.read_modify_write(mode, Cpu::ror),
            Operation::Inc => self.read_modify_write(mode, Cpu::increment),
            Operation::Dec => self.read_modify_write(mode, Cpu::decrement),
            Operation::Inx => self.x = self.increment(self.x),
            Operation::Iny => self.y = self.increment(self.y),
            Operation::Dex => self.x = self.decrement(self.x),
            Operation::Dey => self.y = self.decrement(self.y),

            // Branches
            Operation::Bpl => return self.branch(!self.flag(FLAG_N)),
            Operation::Bmi => return self.branch(self.flag(FLAG_N)),
            Operation::Bvc => return self.branch(!self.flag(FLAG_V)),
            Operation::Bvs => return self.branch(self.flag(FLAG_V)),
            Operation::Bcc => return self.branch(!self.flag(FLAG_C)),
            Operation::Bcs => return self.branch(self.flag(FLAG_C)),
            Operation::Bne => return self.branch(!self.flag(FLAG_Z)),
            Operation::Beq => return self.branch(self.flag(FLAG_Z)),

            // Jumps, calls, returns
            Operation::Jmp => {
                self.pc = self.operand_address(mode);
                return PcUpdate::Jumped;
            }
            Operation::Jsr => {
                let target = self.operand_address(mode);
                // Return address minus one: the call's last operand byte.
                self.push_u16(wrapping_add(self.pc, 1));
                self.pc = target;
                return PcUpdate::Jumped;
            }
            Operation::Rts => {
                self.pc = wrapping_add(self.pop_u16(), 1);
                return PcUpdate::Jumped;
            }
            Operation::Rti => {
                self.pull_status_from_interrupt();
                self.pc = self.pop_u16();
                return PcUpdate::Jumped;
            }

            // Stack
            Operation::Pha => self.push(self.a),
            Operation::Pla => {
                self.a = self.pop();
                self.update_zero_negative(self.a);
            }
            Operation::Php => self.push_status(),
            Operation::Plp => self.pull_status(),

            // Flags
            Operation::Clc => self.set_flag(FLAG_C, false),
            Operation::Cld => self.set_flag(FLAG_D, false),
            Operation::Cli => self.set_flag(FLAG_I, false),
            Operation::Clv => self.set_flag(FLAG_V, false),
            Operation::Sec => self.set_flag(FLAG_C, true),
            Operation::Sed => self.set_flag(FLAG_D, true),
            Operation::Sei => self.set_flag(FLAG_I, true),

            // Transfers
            Operation::Tax => {
                self.x = self.a;
                self.update_zero_negative(self.x);
            }
            Operation::Tay => {
                self.y = self.a;
                self.update_zero_negative(self.y);
            }
            Operation::Tsx => {
                self.x = self.sp;
                self.update_zero_negative(self.x);
            }
            Operation::Txa => {
                self.a = self.x;
                self.update_zero_negative(self.a);
            }
            Operation::Tya => {
                self.a = self.y;
                self.update_zero_negative(self.a);
            }
            Operation::Txs => self.sp = self.x,
        }
        PcUpdate::Advance
    }

    fn read_operand(&self, mode: AddressingMode) -> u8 {
        self.memory.read(self.operand_address(mode))
    }

    fn store(&mut self, mode: AddressingMode, value: u8) {
        let addr = self.operand_address(mode);
        self.memory.write(addr, value);
    }

    // Accumulator forms work on A; everything else goes through memory.
    fn read_modify_write(&mut self, mode: AddressingMode, f: fn(&mut Cpu, u8) -> u8) {
        if mode == AddressingMode::Accumulator {
            let a = self.a;
            self.a = f(self, a);
        } else {
            let addr = self.operand_address(mode);
            let value = self.memory.read(addr);
            let result = f(self, value);
            self.memory.write(addr, result);
        }
    }

    fn branch(&mut self, condition: bool) -> PcUpdate {
        if !condition {
            return PcUpdate::Advance;
        }
        let offset = self.memory.read(self.pc) as i8;
        let next = wrapping_add(self.pc, 1);
        self.pc = wrapping_add(next, offset as u16);
        PcUpdate::Jumped
    }

    // ALU operations
    fn adc(&mut self, value: u8) {
        let out = arith::add_with_carry(self.a, value, self.flag(FLAG_C));
        self.apply_sum(out);
    }

    fn sbc(&mut self, value: u8) {
        let out = arith::subtract_with_carry(self.a, value, self.flag(FLAG_C));
        self.apply_sum(out);
    }

    fn apply_sum(&mut self, out: arith::AdcOutcome) {
        self.set_flag(FLAG_C, out.carry);
        self.set_flag(FLAG_V, out.overflow);
        self.a = out.result;
        self.update_zero_negative(self.a);
    }

    fn compare(&mut self, mode: AddressingMode, register: u8) {
        let value = self.read_operand(mode);
        self.set_flag(FLAG_C, register >= value);
        self.update_zero_negative(wrapping_sub(register, value));
    }

    fn bit(&mut self, value: u8) {
        self.set_flag(FLAG_Z, (self.a & value) == 0);
        self.set_flag(FLAG_N, (value & FLAG_N) != 0);
        self.set_flag(FLAG_V, (value & FLAG_V) != 0);
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.set_flag(FLAG_C, (value & 0x80) != 0);
        let result = value << 1;
        self.update_zero_negative(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.set_flag(FLAG_C, (value & 0x01) != 0);
        let result = value >> 1;
        self.update_zero_negative(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry = self.flag(FLAG_C) as u8;
        self.set_flag(FLAG_C, (value & 0x80) != 0);
        let result = (value << 1) | carry;
        self.update_zero_negative(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry = if self.flag(FLAG_C) { 0x80 } else { 0 };
        self.set_flag(FLAG_C, (value & 0x01) != 0);
        let result = (value >> 1) | carry;
        self.update_zero_negative(result);
        result
    }

    fn increment(&mut self, value: u8) -> u8 {
        let result = wrapping_add(value, 1);
        self.update_zero_negative(result);
        result
    }

    fn decrement(&mut self, value: u8) -> u8 {
        let result = wrapping_sub(value, 1);
        self.update_zero_negative(result);
        result
    }
}
