use log::warn;

use crate::constants::{ADDRESS_MASK, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Fault;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - 0x000 - 0x050 holds the font sprite sheet, written once at creation
/// - 0x200 onwards is where ROMs are loaded
///
/// Every address is reduced modulo 4096 before use, so callers never need to
/// validate one first.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.load_font();
        memory
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[Self::wrap(addr)]
    }

    /// Writes into the font sprite sheet are dropped; it is read-only to programs.
    pub fn write(&mut self, addr: u16, value: u8) {
        let addr = Self::wrap(addr);
        if addr < SPRITE_SHEET.len() {
            warn!("ignoring write of {:#04X} into font table at {:#05X}", value, addr);
            return;
        }
        self.bytes[addr] = value;
    }

    /// Reads the big-endian word at `addr` and `addr + 1`
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from(self.read(addr)) << 8 | u16::from(self.read(addr.wrapping_add(1)))
    }

    /// Reads `len` consecutive bytes starting at `addr`, wrapping at the top of memory
    pub fn read_range(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.read(addr.wrapping_add(offset as u16)))
            .collect()
    }

    pub fn load_font(&mut self) {
        self.bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    /// Copies a ROM verbatim into memory starting at 0x200
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Fault> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Fault::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn wrap(addr: u16) -> usize {
        (addr & ADDRESS_MASK) as usize
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_loaded_at_creation() {
        let memory = Memory::new();
        assert_eq!(memory.as_slice()[..80], SPRITE_SHEET[..]);
        assert!(memory.as_slice()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_addresses_wrap() {
        let mut memory = Memory::new();
        memory.write(0x1300, 0xAB);
        assert_eq!(memory.read(0x0300), 0xAB);
        assert_eq!(memory.read(0xF300), 0xAB);
    }

    #[test]
    fn test_read_word() {
        let mut memory = Memory::new();
        memory.write(0x200, 0xAA);
        memory.write(0x201, 0xBB);
        assert_eq!(memory.read_word(0x200), 0xAABB);
    }

    #[test]
    fn test_read_word_wraps_at_top_of_memory() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0x12);
        assert_eq!(memory.read_word(0xFFF), 0x12F0);
    }

    #[test]
    fn test_font_is_write_protected() {
        let mut memory = Memory::new();
        memory.write(0x000, 0x00);
        memory.write(0x04F, 0x00);
        assert_eq!(memory.read(0x000), 0xF0);
        assert_eq!(memory.read(0x04F), 0x80);
    }

    #[test]
    fn test_load_rom() {
        let mut memory = Memory::new();
        memory.load_rom(&[0x00, 0xE0]).unwrap();
        assert_eq!(memory.read_range(0x200, 2), vec![0x00, 0xE0]);
    }

    #[test]
    fn test_load_rom_fills_memory() {
        let mut memory = Memory::new();
        let rom = vec![0x11; MAX_ROM_SIZE];
        memory.load_rom(&rom).unwrap();
        assert_eq!(memory.read(0xFFF), 0x11);
    }

    #[test]
    fn test_load_rom_too_large() {
        let mut memory = Memory::new();
        let rom = vec![0; MAX_ROM_SIZE + 1];
        assert_eq!(
            memory.load_rom(&rom),
            Err(Fault::RomTooLarge {
                size: 3585,
                max: 3584
            })
        );
    }
}
