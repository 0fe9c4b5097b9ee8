use crate::constants::{ADDRESS_MASK, PROGRAM_START, REGISTER_COUNT, STACK_SIZE};
use crate::error::Fault;

/// # Register file
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry / borrow / collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, kept within the 12-bit address space
///
/// Stack
/// - 16 return addresses and a stack pointer in 0..=16
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    sp: u8,
    stack: [u16; STACK_SIZE],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
        }
    }

    pub fn get(&self, reg: u8) -> Result<u8, Fault> {
        self.v
            .get(reg as usize)
            .copied()
            .ok_or(Fault::InvalidRegister(reg))
    }

    pub fn set(&mut self, reg: u8, value: u8) -> Result<(), Fault> {
        let slot = self
            .v
            .get_mut(reg as usize)
            .ok_or(Fault::InvalidRegister(reg))?;
        *slot = value;
        Ok(())
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        if self.sp as usize == STACK_SIZE {
            return Err(Fault::StackOverflow);
        }
        self.sp += 1;
        self.stack[self.sp as usize - 1] = addr;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Moves PC on by `by` bytes, wrapping within the address space
    pub fn advance_pc(&mut self, by: u16) {
        self.pc = self.pc.wrapping_add(by) & ADDRESS_MASK;
    }

    pub fn jump(&mut self, addr: u16) {
        self.pc = addr & ADDRESS_MASK;
    }

    pub fn v(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// The return addresses currently on the stack, oldest first
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp as usize]
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
