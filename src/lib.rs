pub use chip8::{Chip8, Config, RunState};
pub use diagnostics::{disassemble, Line, Snapshot};
pub use error::Fault;
pub use framebuffer::FrameBuffer;
pub use instruction::Instruction;
pub use io::{Buzzer, Input, Io, Keypad, Mute, NullRenderer, Renderer};
pub use timers::Timers;

mod chip8;
pub mod constants;
mod diagnostics;
mod error;
mod framebuffer;
mod instruction;
mod io;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
pub mod state;
mod timers;
