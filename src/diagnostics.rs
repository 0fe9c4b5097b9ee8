use std::fmt;

use crate::constants::{ADDRESS_MASK, PROGRAM_START};
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::state::State;

/// Bytes of memory shown around the PC in a snapshot
const WINDOW_SIZE: u16 = 16;

/// A read-only copy of the machine state taken for a human to look at,
/// either on request or when a fault halts the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub pc: u16,
    pub sp: u8,
    pub stack: Vec<u16>,
    pub v: [u8; 16],
    pub i: u16,
    pub delay: u8,
    pub sound: u8,
    pub opcode: u16,
    /// Address of the first byte in `window`
    pub window_start: u16,
    pub window: Vec<u8>,
}

impl Snapshot {
    pub fn capture(state: &State) -> Self {
        let pc = state.registers.pc;
        let window_start = pc.wrapping_sub(WINDOW_SIZE / 2) & ADDRESS_MASK;
        Snapshot {
            pc,
            sp: state.registers.sp(),
            stack: state.registers.stack().to_vec(),
            v: *state.registers.v(),
            i: state.registers.i,
            delay: state.timers.delay,
            sound: state.timers.sound,
            opcode: state.fetch(),
            window_start,
            window: state.memory.read_range(window_start, WINDOW_SIZE as usize),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mnemonic = match Instruction::decode(self.opcode) {
            Some(instruction) => instruction.to_string(),
            None => "???".to_string(),
        };
        writeln!(f, "PC {:#05X}  op {:04X}  {}", self.pc, self.opcode, mnemonic)?;
        writeln!(f, "I  {:#05X}  DT {:02X}  ST {:02X}", self.i, self.delay, self.sound)?;
        for (row, chunk) in self.v.chunks(4).enumerate() {
            let cells: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, value)| format!("V{:X} {:02X}", row * 4 + col, value))
                .collect();
            writeln!(f, "{}", cells.join("  "))?;
        }
        let stack: Vec<String> = self.stack.iter().map(|a| format!("{:03X}", a)).collect();
        writeln!(f, "SP {:X}  stack [{}]", self.sp, stack.join(" "))?;
        write!(f, "{:03X}:", self.window_start)?;
        for (offset, byte) in self.window.iter().enumerate() {
            let addr = (self.window_start + offset as u16) & ADDRESS_MASK;
            if addr == self.pc {
                write!(f, " >{:02X}", byte)?;
            } else {
                write!(f, "  {:02X}", byte)?;
            }
        }
        Ok(())
    }
}

/// One word of program memory in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub address: u16,
    pub word: u16,
    pub instruction: Option<Instruction>,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.instruction {
            Some(instruction) => write!(
                f,
                "{:03X}: {:04X}  {}",
                self.address, self.word, instruction
            ),
            None => write!(
                f,
                "{:03X}: {:04X}  DW {:#06X}",
                self.address, self.word, self.word
            ),
        }
    }
}

/// Lists program memory word by word.
///
/// Data mixed into the code decodes as whatever it happens to look like, or
/// as `None` when it matches no instruction. An odd trailing byte is paired
/// with the byte after it.
pub fn disassemble(memory: &Memory, rom_len: usize) -> Vec<Line> {
    (0..rom_len)
        .step_by(2)
        .map(|offset| {
            let address = (PROGRAM_START + offset as u16) & ADDRESS_MASK;
            let word = memory.read_word(address);
            Line {
                address,
                word,
                instruction: Instruction::decode(word),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_captures_registers() {
        let mut state = State::new();
        state.memory.load_rom(&[0x60, 0x0A]).unwrap();
        state.registers.set(0x3, 0x42).unwrap();
        state.registers.push(0x0204).unwrap();
        state.registers.i = 0x300;
        state.timers.delay = 0x9;

        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.pc, 0x200);
        assert_eq!(snapshot.sp, 1);
        assert_eq!(snapshot.stack, vec![0x0204]);
        assert_eq!(snapshot.v[0x3], 0x42);
        assert_eq!(snapshot.i, 0x300);
        assert_eq!(snapshot.delay, 0x9);
        assert_eq!(snapshot.opcode, 0x600A);
    }

    #[test]
    fn test_snapshot_window_centres_on_pc() {
        let mut state = State::new();
        state.memory.load_rom(&[0x60, 0x0A]).unwrap();
        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.window_start, 0x1F8);
        assert_eq!(snapshot.window.len(), 16);
        assert_eq!(snapshot.window[8..10], [0x60, 0x0A]);
    }

    #[test]
    fn test_snapshot_window_wraps() {
        let mut state = State::new();
        state.registers.jump(0x002);
        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.window_start, 0xFFA);
    }

    #[test]
    fn test_snapshot_display_marks_pc() {
        let mut state = State::new();
        state.memory.load_rom(&[0x60, 0x0A]).unwrap();
        let report = Snapshot::capture(&state).to_string();
        assert!(report.contains("PC 0x200"));
        assert!(report.contains("LD V0, 0x0A"));
        assert!(report.contains(">60"));
        assert!(report.contains("VF 00"));
    }

    #[test]
    fn test_disassemble_lists_rom_words() {
        let mut memory = Memory::new();
        memory.load_rom(&[0x00, 0xE0, 0x12, 0x00, 0x5F, 0xF1]).unwrap();
        let lines = disassemble(&memory, 6);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].instruction, Some(Instruction::Clear));
        assert_eq!(lines[1].address, 0x202);
        assert_eq!(lines[1].instruction, Some(Instruction::Jump { nnn: 0x200 }));
        assert_eq!(lines[2].instruction, None);
        assert_eq!(lines[2].to_string(), "204: 5FF1  DW 0x5FF1");
    }
}
