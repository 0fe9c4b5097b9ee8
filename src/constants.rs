/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Every address is reduced into the 12-bit space before use
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// ROMs are loaded at (and execution starts from) this address
pub const PROGRAM_START: u16 = 0x200;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry / borrow / collision flag
pub const FLAG_REGISTER: u8 = 0xF;

pub const STACK_SIZE: usize = 16;

pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Sprites drawn by DRW are at most this many rows tall
pub const MAX_SPRITE_ROWS: usize = 15;

/// The font sprite table starts at the bottom of memory
pub const FONT_BASE: u16 = 0x000;

/// Bytes per glyph in the font sprite table
pub const GLYPH_SIZE: u16 = 5;

/// Instructions executed per second of wall-clock time
pub const CLOCK_HZ: u32 = 700;

/// Fastest rate either clock runs at; higher settings are capped to it
pub const MAX_CLOCK_HZ: u32 = 1_000_000;

/// Delay and sound timer ticks per second of wall-clock time
pub const TIMER_HZ: u32 = 60;

/// # Sprite sheet
/// Glyphs 0..F, each 8 pixels wide and 5 rows tall.
/// Only the high nibble of each byte is used, e.g. `0`:
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
