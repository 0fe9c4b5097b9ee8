use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chipvm::{Chip8, Io, Keypad, Mute};
use chipvm_display::Display;

use crate::keymap::keymap;

/// How much faster wall-clock time runs while Space is held
const FAST_FORWARD: u32 = 4;

pub fn run(mut chip8: Chip8, scale: u32) -> Result<()> {
    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, scale).map_err(anyhow::Error::msg)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    let mut keypad = Keypad::new();
    let mut buzzer = Mute;

    // Space held
    let mut fast_forward = false;
    let mut last_frame = Instant::now();

    while !chip8.is_halted() {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => keypad.quit(),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keypad.press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => keypad.quit(),
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keypad.release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        let now = Instant::now();
        let mut elapsed = now - last_frame;
        last_frame = now;
        if fast_forward {
            elapsed *= FAST_FORWARD;
        }
        let mut io = Io::new(&mut display, &mut keypad, &mut buzzer);
        if let Err(fault) = chip8.advance(elapsed, &mut io) {
            if let Some(report) = chip8.crash_report() {
                eprintln!("{}", report);
            }
            return Err(anyhow!(fault));
        }

        display.flush();
        std::thread::sleep(Duration::from_millis(1));
    }

    info!("exiting");
    Ok(())
}
