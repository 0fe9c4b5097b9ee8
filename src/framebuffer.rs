use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_SPRITE_ROWS};

/// # Frame buffer
/// The display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively and
/// indexed as [y][x].
///
/// Only CLS and DRW mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs a sprite onto the frame buffer at (x, y).
    ///
    /// Each row is one byte, most significant bit leftmost. Every target pixel
    /// wraps around the edges independently. Returns true if any pixel that was
    /// set got erased.
    pub fn blit(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collided = false;
        for (row, byte) in rows.iter().take(MAX_SPRITE_ROWS).enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if (byte >> (7 - bit)) & 0x1 == 0 {
                    continue;
                }
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                collided |= self.pixels[py][px] == 1;
                self.pixels[py][px] ^= 1;
            }
        }
        collided
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn rows(&self) -> &[[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
