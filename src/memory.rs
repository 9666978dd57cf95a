/// Where the loader places a program image.
pub const PROGRAM_ORIGIN: u16 = 0x0600;
/// Little-endian address the CPU starts from after reset.
pub const RESET_VECTOR: u16 = 0xFFFC;

const MEMORY_SIZE: usize = 0x10000;

/// Byte-level access used by the addressing and stack helpers.
pub trait CpuBus {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);

    fn read_u16(&self, addr: u16) -> u16 {
        let low = self.read(addr) as u16;
        let high = self.read(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    fn write_u16(&mut self, addr: u16, value: u16) {
        self.write(addr, value as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }
}

/// Flat 64KB address space. Every `u16` is a valid index, so there is no
/// mirroring and no device decoding: regions a host treats specially
/// (screen buffers, input bytes) are plain RAM here.
#[derive(Clone)]
pub struct Memory {
    ram: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Copy `program` to `PROGRAM_ORIGIN` and point the reset vector at it.
    /// Bytes that would run past 0xFFFF wrap to the bottom of memory.
    pub fn load_program(&mut self, program: &[u8]) {
        let mut addr = PROGRAM_ORIGIN;
        for &byte in program {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
        self.write_u16(RESET_VECTOR, PROGRAM_ORIGIN);
        log::debug!("Loaded {} bytes at ${:04X}", program.len(), PROGRAM_ORIGIN);
    }

    /// Borrow `len` bytes starting at `start`, clamped to the end of memory.
    pub fn slice(&self, start: u16, len: usize) -> &[u8] {
        let start = start as usize;
        let end = (start + len).min(MEMORY_SIZE);
        &self.ram[start..end]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vector = self.read_u16(RESET_VECTOR);
        f.debug_struct("Memory")
            .field("reset_vector", &format_args!("${:04X}", vector))
            .finish_non_exhaustive()
    }
}

impl CpuBus for Memory {
    fn read(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_little_endian() {
        let mut mem = Memory::new();
        mem.write_u16(0x1234, 0xBEEF);
        assert_eq!(mem.read(0x1234), 0xEF);
        assert_eq!(mem.read(0x1235), 0xBE);
        assert_eq!(mem.read_u16(0x1234), 0xBEEF);
    }

    #[test]
    fn word_read_wraps_at_top_of_memory() {
        let mut mem = Memory::new();
        mem.write(0xFFFF, 0x34);
        mem.write(0x0000, 0x12);
        assert_eq!(mem.read_u16(0xFFFF), 0x1234);
    }

    #[test]
    fn load_program_sets_reset_vector() {
        let mut mem = Memory::new();
        mem.load_program(&[0xA9, 0x05, 0x00]);
        assert_eq!(mem.slice(PROGRAM_ORIGIN, 3), &[0xA9, 0x05, 0x00]);
        assert_eq!(mem.read(0xFFFC), 0x00);
        assert_eq!(mem.read(0xFFFD), 0x06);
    }

    #[test]
    fn slice_is_clamped() {
        let mem = Memory::new();
        assert_eq!(mem.slice(0xFFF0, 0x100).len(), 0x10);
    }
}
