use super::Cpu;
use crate::arith::wrapping_add;
use crate::memory::CpuBus;
use crate::opcodes::AddressingMode;

impl Cpu {
    /// Effective address for `mode`, with PC on the first operand byte.
    ///
    /// Immediate and Relative resolve to the operand byte itself so callers
    /// read it like any other operand. Implied and Accumulator have no
    /// operand; they resolve to PC and are never dereferenced.
    pub fn operand_address(&self, mode: AddressingMode) -> u16 {
        let mem = &self.memory;
        match mode {
            AddressingMode::Immediate | AddressingMode::Relative => self.pc,
            AddressingMode::Implied | AddressingMode::Accumulator => self.pc,

            AddressingMode::ZeroPage => mem.read(self.pc) as u16,
            AddressingMode::ZeroPageX => wrapping_add(mem.read(self.pc), self.x) as u16,
            AddressingMode::ZeroPageY => wrapping_add(mem.read(self.pc), self.y) as u16,

            AddressingMode::Absolute => mem.read_u16(self.pc),
            AddressingMode::AbsoluteX => wrapping_add(mem.read_u16(self.pc), self.x as u16),
            AddressingMode::AbsoluteY => wrapping_add(mem.read_u16(self.pc), self.y as u16),

            AddressingMode::Indirect => self.indirect_jump_target(mem.read_u16(self.pc)),

            AddressingMode::IndirectX => {
                let ptr = wrapping_add(mem.read(self.pc), self.x);
                self.read_zero_page_u16(ptr)
            }
            AddressingMode::IndirectY => {
                let base = self.read_zero_page_u16(mem.read(self.pc));
                wrapping_add(base, self.y as u16)
            }
        }
    }

    // Pointer fetch that never leaves page zero.
    fn read_zero_page_u16(&self, ptr: u8) -> u16 {
        let low = self.memory.read(ptr as u16) as u16;
        let high = self.memory.read(wrapping_add(ptr, 1) as u16) as u16;
        (high << 8) | low
    }

    fn indirect_jump_target(&self, ptr: u16) -> u16 {
        // 6502 bug: the high byte comes from the start of the same page
        // when the pointer sits on a page's last byte.
        if (ptr & 0x00FF) == 0x00FF {
            let low = self.memory.read(ptr) as u16;
            let high = self.memory.read(ptr & 0xFF00) as u16;
            (high << 8) | low
        } else {
            self.memory.read_u16(ptr)
        }
    }
}
