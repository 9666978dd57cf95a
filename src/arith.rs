//! Fixed-width arithmetic and the ADC/SBC flag rules.
//!
//! Registers, the stack pointer and addresses all overflow silently on the
//! 6502, so everything here wraps at the declared width instead of faulting.

/// An unsigned register width the CPU does modular arithmetic in.
pub trait RegisterWidth: Copy + Eq + std::fmt::Debug {
    fn add_wrapped(self, rhs: Self) -> Self;
    fn sub_wrapped(self, rhs: Self) -> Self;
}

impl RegisterWidth for u8 {
    fn add_wrapped(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    fn sub_wrapped(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl RegisterWidth for u16 {
    fn add_wrapped(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    fn sub_wrapped(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

/// `a + b`, wrapping at the width of `T`.
pub fn wrapping_add<T: RegisterWidth>(a: T, b: T) -> T {
    a.add_wrapped(b)
}

/// `a - b`, wrapping at the width of `T`.
pub fn wrapping_sub<T: RegisterWidth>(a: T, b: T) -> T {
    a.sub_wrapped(b)
}

/// Result of adding an operand and the carry into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcOutcome {
    pub result: u8,
    pub carry: bool,
    pub overflow: bool,
}

/// Binary add-with-carry. Decimal mode is not honoured.
pub fn add_with_carry(a: u8, operand: u8, carry_in: bool) -> AdcOutcome {
    let sum = a as u16 + operand as u16 + carry_in as u16;
    let result = sum as u8;
    // Both inputs share a sign and the result does not.
    let overflow = (operand ^ result) & (result ^ a) & 0x80 != 0;
    AdcOutcome {
        result,
        carry: sum > 0xFF,
        overflow,
    }
}

/// Operand to feed through `add_with_carry` to get subtract-with-borrow:
/// one less than the two's-complement negation.
pub fn sbc_operand(operand: u8) -> u8 {
    wrapping_sub(0u8.wrapping_sub(operand), 1)
}

/// Subtract-with-borrow as the 6502 does it: ADC of the transformed operand.
pub fn subtract_with_carry(a: u8, operand: u8, carry_in: bool) -> AdcOutcome {
    add_with_carry(a, sbc_operand(operand), carry_in)
}
