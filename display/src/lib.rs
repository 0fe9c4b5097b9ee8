use log::error;
use sdl2::pixels::PixelFormatEnum;

use chipvm::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chipvm::{FrameBuffer, Renderer};

/// # Display
/// An SDL2 window showing the 64x32 frame buffer, each pixel scaled up.
///
/// `present` only stages a frame; `flush` pushes the latest staged frame to the
/// window so the engine can draw many times between two screen refreshes.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    staged: Option<FrameBuffer>,
}

impl Display {
    /// Opens a window on `sdl` sized `scale` screen pixels per frame buffer pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "chipvm",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        canvas.clear();
        canvas.present();

        Ok(Display {
            canvas,
            staged: None,
        })
    }

    /// Expands the frame into RGB24 bytes, row after row: each pixel becomes
    /// three equal channel values, 0 for off and 255 for on.
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| std::iter::repeat(pixel).take(3))
            .map(|pixel| pixel * 255)
            .collect()
    }

    /// Renders the most recently staged frame, if there is one
    pub fn flush(&mut self) {
        if let Some(frame) = self.staged.take() {
            if let Err(e) = self.render(&frame) {
                error!("unable to render frame: {}", e);
            }
        }
    }

    fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, line) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl Renderer for Display {
    fn present(&mut self, frame: &FrameBuffer) {
        self.staged = Some(*frame);
    }
}
