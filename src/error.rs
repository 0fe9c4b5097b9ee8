use thiserror::Error;

/// Conditions that stop the emulated program.
///
/// None of these are retried: the engine captures a snapshot, reports it and
/// halts, the same way a real CPU would fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unsupported opcode {opcode:#06X} at {address:#05X}")]
    UnsupportedOpcode { opcode: u16, address: u16 },

    #[error("stack overflow: call nested deeper than 16 levels")]
    StackOverflow,

    #[error("stack underflow: pop from an empty stack")]
    StackUnderflow,

    #[error("return with an empty call stack")]
    ReturnWithEmptyStack,

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("invalid register V{0:X}")]
    InvalidRegister(u8),
}
