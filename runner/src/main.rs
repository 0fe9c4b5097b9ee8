use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chipvm::constants::MAX_CLOCK_HZ;
use chipvm::{Chip8, Config};

mod keymap;
mod run;

/// Runs a Chip-8 rom in an SDL2 window
///
/// Keys 1-4, Q-R, A-F and Z-V form the hex keypad. Hold Space to fast
/// forward, press Escape to quit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the rom file
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(
        long,
        default_value_t = 700,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CLOCK_HZ as i64)
    )]
    clock_hz: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print a listing of the rom instead of running it
    #[arg(long)]
    disassemble: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let rom = fs::read(&args.rom)
        .with_context(|| format!("unable to read rom {}", args.rom.display()))?;

    let mut chip8 = Chip8::with_config(Config {
        clock_hz: args.clock_hz,
        ..Config::default()
    });
    if let Some(seed) = args.seed {
        chip8.reseed(seed);
    }
    chip8
        .load_rom(&rom)
        .with_context(|| format!("unable to load rom {}", args.rom.display()))?;

    if args.disassemble {
        for line in chip8.disassemble() {
            println!("{}", line);
        }
        return Ok(());
    }

    run::run(chip8, args.scale)
}
