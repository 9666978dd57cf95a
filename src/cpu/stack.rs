use super::{Cpu, FLAG_B, FLAG_B2};
use crate::arith::{wrapping_add, wrapping_sub};
use crate::memory::CpuBus;

/// The stack lives in page one, indexed by SP.
const STACK_BASE: u16 = 0x0100;

impl Cpu {
    pub fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE + self.sp as u16, value);
        self.sp = wrapping_sub(self.sp, 1);
    }

    pub fn pop(&mut self) -> u8 {
        self.sp = wrapping_add(self.sp, 1);
        self.memory.read(STACK_BASE + self.sp as u16)
    }

    /// High byte first, so the low byte pops first.
    pub fn push_u16(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub fn pop_u16(&mut self) -> u16 {
        let low = self.pop() as u16;
        let high = self.pop() as u16;
        (high << 8) | low
    }

    /// PHP/BRK image: both break bits set, live flags untouched.
    pub(super) fn push_status(&mut self) {
        self.push(self.status | FLAG_B | FLAG_B2);
    }

    /// PLP: break bits are never latched.
    pub(super) fn pull_status(&mut self) {
        let bits = self.pop();
        self.set_status(bits);
        self.set_flag(FLAG_B, false);
        self.set_flag(FLAG_B2, false);
    }

    /// RTI: Break cleared, Break2 forced on.
    pub(super) fn pull_status_from_interrupt(&mut self) {
        let bits = self.pop();
        self.set_status(bits);
        self.set_flag(FLAG_B, false);
        self.set_flag(FLAG_B2, true);
    }
}
