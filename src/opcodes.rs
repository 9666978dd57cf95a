//! Legal 6502 opcodes: length, base cycles, addressing mode and the
//! operation each one dispatches to.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// `JMP ($nnnn)` only.
    Indirect,
    IndirectX,
    IndirectY,
    /// Branch offset byte.
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Semantic routine an opcode dispatches to. Opcodes that differ only in
/// addressing mode share a tag.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Operation {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Operation::Adc => "ADC",
            Operation::And => "AND",
            Operation::Asl => "ASL",
            Operation::Bcc => "BCC",
            Operation::Bcs => "BCS",
            Operation::Beq => "BEQ",
            Operation::Bit => "BIT",
            Operation::Bmi => "BMI",
            Operation::Bne => "BNE",
            Operation::Bpl => "BPL",
            Operation::Brk => "BRK",
            Operation::Bvc => "BVC",
            Operation::Bvs => "BVS",
            Operation::Clc => "CLC",
            Operation::Cld => "CLD",
            Operation::Cli => "CLI",
            Operation::Clv => "CLV",
            Operation::Cmp => "CMP",
            Operation::Cpx => "CPX",
            Operation::Cpy => "CPY",
            Operation::Dec => "DEC",
            Operation::Dex => "DEX",
            Operation::Dey => "DEY",
            Operation::Eor => "EOR",
            Operation::Inc => "INC",
            Operation::Inx => "INX",
            Operation::Iny => "INY",
            Operation::Jmp => "JMP",
            Operation::Jsr => "JSR",
            Operation::Lda => "LDA",
            Operation::Ldx => "LDX",
            Operation::Ldy => "LDY",
            Operation::Lsr => "LSR",
            Operation::Nop => "NOP",
            Operation::Ora => "ORA",
            Operation::Pha => "PHA",
            Operation::Php => "PHP",
            Operation::Pla => "PLA",
            Operation::Plp => "PLP",
            Operation::Rol => "ROL",
            Operation::Ror => "ROR",
            Operation::Rti => "RTI",
            Operation::Rts => "RTS",
            Operation::Sbc => "SBC",
            Operation::Sec => "SEC",
            Operation::Sed => "SED",
            Operation::Sei => "SEI",
            Operation::Sta => "STA",
            Operation::Stx => "STX",
            Operation::Sty => "STY",
            Operation::Tax => "TAX",
            Operation::Tay => "TAY",
            Operation::Tsx => "TSX",
            Operation::Txa => "TXA",
            Operation::Txs => "TXS",
            Operation::Tya => "TYA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCode {
    pub code: u8,
    /// For traces and error messages only.
    pub mnemonic: &'static str,
    /// Bytes including the opcode.
    pub len: u8,
    /// Base cycles, without page-cross or branch penalties. Not enforced.
    pub cycles: u8,
    pub mode: AddressingMode,
    pub op: Operation,
}

impl OpCode {
    const fn new(code: u8, op: Operation, len: u8, cycles: u8, mode: AddressingMode) -> Self {
        Self {
            code,
            mnemonic: op.mnemonic(),
            len,
            cycles,
            mode,
            op,
        }
    }
}

/// Every legal opcode, in table order.
pub fn all() -> &'static [OpCode] {
    &table::OPCODES
}

/// Descriptor for `code`, or `None` for undocumented opcodes.
pub fn lookup(code: u8) -> Option<&'static OpCode> {
    static INDEX: OnceLock<[Option<&'static OpCode>; 256]> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut index = [None; 256];
        for op in table::OPCODES.iter() {
            index[op.code as usize] = Some(op);
        }
        index
    })[code as usize]
}

mod table {
    use super::AddressingMode::*;
    use super::OpCode;
    use super::Operation::*;

    #[rustfmt::skip]
    pub(super) static OPCODES: [OpCode; 151] = [
        OpCode::new(0x00, Brk, 1, 7, Implied),
        OpCode::new(0xEA, Nop, 1, 2, Implied),

        // Arithmetic
        OpCode::new(0x69, Adc, 2, 2, Immediate),
        OpCode::new(0x65, Adc, 2, 3, ZeroPage),
        OpCode::new(0x75, Adc, 2, 4, ZeroPageX),
        OpCode::new(0x6D, Adc, 3, 4, Absolute),
        OpCode::new(0x7D, Adc, 3, 4, AbsoluteX),
        OpCode::new(0x79, Adc, 3, 4, AbsoluteY),
        OpCode::new(0x61, Adc, 2, 6, IndirectX),
        OpCode::new(0x71, Adc, 2, 5, IndirectY),

        OpCode::new(0xE9, Sbc, 2, 2, Immediate),
        OpCode::new(0xE5, Sbc, 2, 3, ZeroPage),
        OpCode::new(0xF5, Sbc, 2, 4, ZeroPageX),
        OpCode::new(0xED, Sbc, 3, 4, Absolute),
        OpCode::new(0xFD, Sbc, 3, 4, AbsoluteX),
        OpCode::new(0xF9, Sbc, 3, 4, AbsoluteY),
        OpCode::new(0xE1, Sbc, 2, 6, IndirectX),
        OpCode::new(0xF1, Sbc, 2, 5, IndirectY),

        // Logical
        OpCode::new(0x29, And, 2, 2, Immediate),
        OpCode::new(0x25, And, 2, 3, ZeroPage),
        OpCode::new(0x35, And, 2, 4, ZeroPageX),
        OpCode::new(0x2D, And, 3, 4, Absolute),
        OpCode::new(0x3D, And, 3, 4, AbsoluteX),
        OpCode::new(0x39, And, 3, 4, AbsoluteY),
        OpCode::new(0x21, And, 2, 6, IndirectX),
        OpCode::new(0x31, And, 2, 5, IndirectY),

        OpCode::new(0x49, Eor, 2, 2, Immediate),
        OpCode::new(0x45, Eor, 2, 3, ZeroPage),
        OpCode::new(0x55, Eor, 2, 4, ZeroPageX),
        OpCode::new(0x4D, Eor, 3, 4, Absolute),
        OpCode::new(0x5D, Eor, 3, 4, AbsoluteX),
        OpCode::new(0x59, Eor, 3, 4, AbsoluteY),
        OpCode::new(0x41, Eor, 2, 6, IndirectX),
        OpCode::new(0x51, Eor, 2, 5, IndirectY),

        OpCode::new(0x09, Ora, 2, 2, Immediate),
        OpCode::new(0x05, Ora, 2, 3, ZeroPage),
        OpCode::new(0x15, Ora, 2, 4, ZeroPageX),
        OpCode::new(0x0D, Ora, 3, 4, Absolute),
        OpCode::new(0x1D, Ora, 3, 4, AbsoluteX),
        OpCode::new(0x19, Ora, 3, 4, AbsoluteY),
        OpCode::new(0x01, Ora, 2, 6, IndirectX),
        OpCode::new(0x11, Ora, 2, 5, IndirectY),

        OpCode::new(0x24, Bit, 2, 3, ZeroPage),
        OpCode::new(0x2C, Bit, 3, 4, Absolute),

        // Shifts and rotates
        OpCode::new(0x0A, Asl, 1, 2, Accumulator),
        OpCode::new(0x06, Asl, 2, 5, ZeroPage),
        OpCode::new(0x16, Asl, 2, 6, ZeroPageX),
        OpCode::new(0x0E, Asl, 3, 6, Absolute),
        OpCode::new(0x1E, Asl, 3, 7, AbsoluteX),

        OpCode::new(0x4A, Lsr, 1, 2, Accumulator),
        OpCode::new(0x46, Lsr, 2, 5, ZeroPage),
        OpCode::new(0x56, Lsr, 2, 6, ZeroPageX),
        OpCode::new(0x4E, Lsr, 3, 6, Absolute),
        OpCode::new(0x5E, Lsr, 3, 7, AbsoluteX),

        OpCode::new(0x2A, Rol, 1, 2, Accumulator),
        OpCode::new(0x26, Rol, 2, 5, ZeroPage),
        OpCode::new(0x36, Rol, 2, 6, ZeroPageX),
        OpCode::new(0x2E, Rol, 3, 6, Absolute),
        OpCode::new(0x3E, Rol, 3, 7, AbsoluteX),

        OpCode::new(0x6A, Ror, 1, 2, Accumulator),
        OpCode::new(0x66, Ror, 2, 5, ZeroPage),
        OpCode::new(0x76, Ror, 2, 6, ZeroPageX),
        OpCode::new(0x6E, Ror, 3, 6, Absolute),
        OpCode::new(0x7E, Ror, 3, 7, AbsoluteX),

        // Increments and decrements
        OpCode::new(0xE6, Inc, 2, 5, ZeroPage),
        OpCode::new(0xF6, Inc, 2, 6, ZeroPageX),
        OpCode::new(0xEE, Inc, 3, 6, Absolute),
        OpCode::new(0xFE, Inc, 3, 7, AbsoluteX),
        OpCode::new(0xE8, Inx, 1, 2, Implied),
        OpCode::new(0xC8, Iny, 1, 2, Implied),

        OpCode::new(0xC6, Dec, 2, 5, ZeroPage),
        OpCode::new(0xD6, Dec, 2, 6, ZeroPageX),
        OpCode::new(0xCE, Dec, 3, 6, Absolute),
        OpCode::new(0xDE, Dec, 3, 7, AbsoluteX),
        OpCode::new(0xCA, Dex, 1, 2, Implied),
        OpCode::new(0x88, Dey, 1, 2, Implied),

        // Compares
        OpCode::new(0xC9, Cmp, 2, 2, Immediate),
        OpCode::new(0xC5, Cmp, 2, 3, ZeroPage),
        OpCode::new(0xD5, Cmp, 2, 4, ZeroPageX),
        OpCode::new(0xCD, Cmp, 3, 4, Absolute),
        OpCode::new(0xDD, Cmp, 3, 4, AbsoluteX),
        OpCode::new(0xD9, Cmp, 3, 4, AbsoluteY),
        OpCode::new(0xC1, Cmp, 2, 6, IndirectX),
        OpCode::new(0xD1, Cmp, 2, 5, IndirectY),

        OpCode::new(0xE0, Cpx, 2, 2, Immediate),
        OpCode::new(0xE4, Cpx, 2, 3, ZeroPage),
        OpCode::new(0xEC, Cpx, 3, 4, Absolute),

        OpCode::new(0xC0, Cpy, 2, 2, Immediate),
        OpCode::new(0xC4, Cpy, 2, 3, ZeroPage),
        OpCode::new(0xCC, Cpy, 3, 4, Absolute),

        // Branches
        OpCode::new(0x10, Bpl, 2, 2, Relative),
        OpCode::new(0x30, Bmi, 2, 2, Relative),
        OpCode::new(0x50, Bvc, 2, 2, Relative),
        OpCode::new(0x70, Bvs, 2, 2, Relative),
        OpCode::new(0x90, Bcc, 2, 2, Relative),
        OpCode::new(0xB0, Bcs, 2, 2, Relative),
        OpCode::new(0xD0, Bne, 2, 2, Relative),
        OpCode::new(0xF0, Beq, 2, 2, Relative),

        // Jumps, calls, returns
        OpCode::new(0x4C, Jmp, 3, 3, Absolute),
        OpCode::new(0x6C, Jmp, 3, 5, Indirect),
        OpCode::new(0x20, Jsr, 3, 6, Absolute),
        OpCode::new(0x60, Rts, 1, 6, Implied),
        OpCode::new(0x40, Rti, 1, 6, Implied),

        // Flags
        OpCode::new(0x18, Clc, 1, 2, Implied),
        OpCode::new(0xD8, Cld, 1, 2, Implied),
        OpCode::new(0x58, Cli, 1, 2, Implied),
        OpCode::new(0xB8, Clv, 1, 2, Implied),
        OpCode::new(0x38, Sec, 1, 2, Implied),
        OpCode::new(0xF8, Sed, 1, 2, Implied),
        OpCode::new(0x78, Sei, 1, 2, Implied),

        // Loads
        OpCode::new(0xA9, Lda, 2, 2, Immediate),
        OpCode::new(0xA5, Lda, 2, 3, ZeroPage),
        OpCode::new(0xB5, Lda, 2, 4, ZeroPageX),
        OpCode::new(0xAD, Lda, 3, 4, Absolute),
        OpCode::new(0xBD, Lda, 3, 4, AbsoluteX),
        OpCode::new(0xB9, Lda, 3, 4, AbsoluteY),
        OpCode::new(0xA1, Lda, 2, 6, IndirectX),
        OpCode::new(0xB1, Lda, 2, 5, IndirectY),

        OpCode::new(0xA2, Ldx, 2, 2, Immediate),
        OpCode::new(0xA6, Ldx, 2, 3, ZeroPage),
        OpCode::new(0xB6, Ldx, 2, 4, ZeroPageY),
        OpCode::new(0xAE, Ldx, 3, 4, Absolute),
        OpCode::new(0xBE, Ldx, 3, 4, AbsoluteY),

        OpCode::new(0xA0, Ldy, 2, 2, Immediate),
        OpCode::new(0xA4, Ldy, 2, 3, ZeroPage),
        OpCode::new(0xB4, Ldy, 2, 4, ZeroPageX),
        OpCode::new(0xAC, Ldy, 3, 4, Absolute),
        OpCode::new(0xBC, Ldy, 3, 4, AbsoluteX),

        // Stores
        OpCode::new(0x85, Sta, 2, 3, ZeroPage),
        OpCode::new(0x95, Sta, 2, 4, ZeroPageX),
        OpCode::new(0x8D, Sta, 3, 4, Absolute),
        OpCode::new(0x9D, Sta, 3, 5, AbsoluteX),
        OpCode::new(0x99, Sta, 3, 5, AbsoluteY),
        OpCode::new(0x81, Sta, 2, 6, IndirectX),
        OpCode::new(0x91, Sta, 2, 6, IndirectY),

        OpCode::new(0x86, Stx, 2, 3, ZeroPage),
        OpCode::new(0x96, Stx, 2, 4, ZeroPageY),
        OpCode::new(0x8E, Stx, 3, 4, Absolute),

        OpCode::new(0x84, Sty, 2, 3, ZeroPage),
        OpCode::new(0x94, Sty, 2, 4, ZeroPageX),
        OpCode::new(0x8C, Sty, 3, 4, Absolute),

        // Register transfers
        OpCode::new(0xAA, Tax, 1, 2, Implied),
        OpCode::new(0xA8, Tay, 1, 2, Implied),
        OpCode::new(0xBA, Tsx, 1, 2, Implied),
        OpCode::new(0x8A, Txa, 1, 2, Implied),
        OpCode::new(0x9A, Txs, 1, 2, Implied),
        OpCode::new(0x98, Tya, 1, 2, Implied),

        // Stack
        OpCode::new(0x48, Pha, 1, 3, Implied),
        OpCode::new(0x08, Php, 1, 3, Implied),
        OpCode::new(0x68, Pla, 1, 4, Implied),
        OpCode::new(0x28, Plp, 1, 4, Implied),
    ];
}
