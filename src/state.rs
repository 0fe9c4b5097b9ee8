use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::framebuffer::FrameBuffer;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timers::Timers;

/// The machine's internal state
///
/// ## CPU
/// - (registers) V0..VF, I, PC and the call stack
/// - (timers) delay & sound, both 8-bit
///
/// ## Memory
/// - 4096 bytes of addressable memory with the font sheet at the bottom
/// - 64x32 frame buffer holding the contents of the next frame to be drawn
///
/// ## Randomness
/// - the source of `Cxkk` random bytes; seedable for reproducible runs
///
/// Everything is created together and lives as long as the emulation session.
#[derive(Clone)]
pub struct State {
    pub registers: Registers,
    pub memory: Memory,
    pub timers: Timers,
    pub frame_buffer: FrameBuffer,
    rng: StdRng,
}

impl State {
    pub fn new() -> Self {
        State {
            registers: Registers::new(),
            memory: Memory::new(),
            timers: Timers::new(),
            frame_buffer: FrameBuffer::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        self.memory.read_word(self.registers.pc)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
