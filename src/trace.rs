// Instruction disassembly and nestest-style trace lines

use crate::cpu::Cpu;
use crate::opcodes::{AddressingMode, OpCode};

/// Render `op` in assembler syntax. `pc` is the address of the opcode byte
/// and is only used to turn branch offsets into absolute targets. Missing
/// operand bytes print as `??`.
pub fn disassemble(pc: u16, op: &OpCode, operand1: Option<u8>, operand2: Option<u8>) -> String {
    let mnemonic = op.mnemonic;
    let word = match (operand1, operand2) {
        (Some(lo), Some(hi)) => Some((hi as u16) << 8 | lo as u16),
        _ => None,
    };
    let byte = |b: Option<u8>| b.map_or_else(|| "??".to_string(), |b| format!("{:02X}", b));
    let addr = |w: Option<u16>| w.map_or_else(|| "????".to_string(), |w| format!("{:04X}", w));

    match op.mode {
        AddressingMode::Implied => mnemonic.to_string(),
        AddressingMode::Accumulator => format!("{} A", mnemonic),
        AddressingMode::Immediate => format!("{} #${}", mnemonic, byte(operand1)),
        AddressingMode::ZeroPage => format!("{} ${}", mnemonic, byte(operand1)),
        AddressingMode::ZeroPageX => format!("{} ${},X", mnemonic, byte(operand1)),
        AddressingMode::ZeroPageY => format!("{} ${},Y", mnemonic, byte(operand1)),
        AddressingMode::Absolute => format!("{} ${}", mnemonic, addr(word)),
        AddressingMode::AbsoluteX => format!("{} ${},X", mnemonic, addr(word)),
        AddressingMode::AbsoluteY => format!("{} ${},Y", mnemonic, addr(word)),
        AddressingMode::Indirect => format!("{} (${})", mnemonic, addr(word)),
        AddressingMode::IndirectX => format!("{} (${},X)", mnemonic, byte(operand1)),
        AddressingMode::IndirectY => format!("{} (${}),Y", mnemonic, byte(operand1)),
        AddressingMode::Relative => {
            let target =
                operand1.map(|offset| pc.wrapping_add(2).wrapping_add(offset as i8 as u16));
            format!("{} ${}", mnemonic, addr(target))
        }
    }
}

/// One trace line for the instruction at `cpu.pc`:
/// `PC  bytes  disassembly  A:.. X:.. Y:.. P:.. SP:..`.
/// Reads operand bytes without touching CPU state.
pub fn trace_line(cpu: &Cpu, op: &OpCode) -> String {
    let pc = cpu.pc;
    let operand1 = (op.len > 1).then(|| cpu.mem_read(pc.wrapping_add(1)));
    let operand2 = (op.len > 2).then(|| cpu.mem_read(pc.wrapping_add(2)));

    let opcode_bytes = match (operand1, operand2) {
        (Some(b1), Some(b2)) => format!("{:02X} {:02X} {:02X}", op.code, b1, b2),
        (Some(b1), None) => format!("{:02X} {:02X}   ", op.code, b1),
        _ => format!("{:02X}      ", op.code),
    };

    format!(
        "{:04X}  {}  {:<14} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        pc,
        opcode_bytes,
        disassemble(pc, op, operand1, operand2),
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status(),
        cpu.sp
    )
}
