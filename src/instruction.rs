use std::fmt;

use crate::opcode::Opcode;

/// A decoded instruction with its operands already pulled out of the opcode.
///
/// `x` and `y` are register indices, `kk` an immediate byte, `n` a nibble and
/// `nnn` a 12-bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the frame buffer
    Clear,
    /// `00EE` PC = STACK.pop()
    Return,
    /// `0nnn` machine code routine; ignored
    System { nnn: u16 },
    /// `1nnn` PC = nnn
    Jump { nnn: u16 },
    /// `2nnn` STACK.push(PC); PC = nnn
    Call { nnn: u16 },
    /// `3xkk` if Vx == kk then skip
    SkipEqual { x: u8, kk: u8 },
    /// `4xkk` if Vx != kk then skip
    SkipNotEqual { x: u8, kk: u8 },
    /// `5xy0` if Vx == Vy then skip
    SkipRegistersEqual { x: u8, y: u8 },
    /// `6xkk` Vx = kk
    Load { x: u8, kk: u8 },
    /// `7xkk` Vx += kk; VF = carry
    Add { x: u8, kk: u8 },
    /// `8xy0` Vx = Vy
    Move { x: u8, y: u8 },
    /// `8xy1` Vx |= Vy
    Or { x: u8, y: u8 },
    /// `8xy2` Vx &= Vy
    And { x: u8, y: u8 },
    /// `8xy3` Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// `8xy4` Vx += Vy; VF = carry
    AddRegisters { x: u8, y: u8 },
    /// `8xy5` Vx -= Vy; VF = !borrow
    Sub { x: u8, y: u8 },
    /// `8xy6` Vx >>= 1; VF = lsb
    ShiftRight { x: u8, y: u8 },
    /// `8xy7` Vx = Vy - Vx; VF = !borrow
    SubNegated { x: u8, y: u8 },
    /// `8xyE` Vx <<= 1; VF = msb
    ShiftLeft { x: u8, y: u8 },
    /// `9xy0` if Vx != Vy then skip
    SkipRegistersNotEqual { x: u8, y: u8 },
    /// `Annn` I = nnn
    LoadIndex { nnn: u16 },
    /// `Bnnn` PC = nnn + V0
    JumpOffset { nnn: u16 },
    /// `Cxkk` Vx = random & kk
    Random { x: u8, kk: u8 },
    /// `Dxyn` draw n rows from mem[I..] at (Vx, Vy); VF = collision
    Draw { x: u8, y: u8, n: u8 },
    /// `Ex9E` if key Vx is down then skip
    SkipKeyDown { x: u8 },
    /// `ExA1` if key Vx is up then skip
    SkipKeyUp { x: u8 },
    /// `Fx07` Vx = DT
    LoadDelay { x: u8 },
    /// `Fx0A` Vx = next key press
    AwaitKey { x: u8 },
    /// `Fx15` DT = Vx
    SetDelay { x: u8 },
    /// `Fx18` ST = Vx
    SetSound { x: u8 },
    /// `Fx1E` I += Vx
    AddIndex { x: u8 },
    /// `Fx29` I = address of glyph Vx
    LoadGlyph { x: u8 },
    /// `Fx33` mem[I..I+3] = bcd(Vx)
    StoreBcd { x: u8 },
    /// `Fx55` mem[I..=I+x] = V0..=Vx
    StoreRegisters { x: u8 },
    /// `Fx65` V0..=Vx = mem[I..=I+x]
    LoadRegisters { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for a given opcode.
    /// Returns `None` for bit patterns that don't name an instruction.
    pub fn decode(op: u16) -> Option<Self> {
        let (x, y, n, kk, nnn) = (op.x(), op.y(), op.n(), op.kk(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x0, ..) => Instruction::System { nnn },
            (0x1, ..) => Instruction::Jump { nnn },
            (0x2, ..) => Instruction::Call { nnn },
            (0x3, ..) => Instruction::SkipEqual { x, kk },
            (0x4, ..) => Instruction::SkipNotEqual { x, kk },
            (0x5, .., 0x0) => Instruction::SkipRegistersEqual { x, y },
            (0x6, ..) => Instruction::Load { x, kk },
            (0x7, ..) => Instruction::Add { x, kk },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddRegisters { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::ShiftRight { x, y },
            (0x8, .., 0x7) => Instruction::SubNegated { x, y },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x, y },
            (0x9, .., 0x0) => Instruction::SkipRegistersNotEqual { x, y },
            (0xA, ..) => Instruction::LoadIndex { nnn },
            (0xB, ..) => Instruction::JumpOffset { nnn },
            (0xC, ..) => Instruction::Random { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::SkipKeyDown { x },
            (0xE, _, 0xA, 0x1) => Instruction::SkipKeyUp { x },
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xF, _, 0x0, 0xA) => Instruction::AwaitKey { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex { x },
            (0xF, _, 0x2, 0x9) => Instruction::LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => Instruction::LoadRegisters { x },
            _ => return None,
        };
        Some(instruction)
    }
}

/// Assembler-style mnemonics, e.g. `LD V1, 0x0A` or `DRW V0, V1, 5`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            System { nnn } => write!(f, "SYS {:#05X}", nnn),
            Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            SkipEqual { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNotEqual { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipRegistersEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Add { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddRegisters { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubNegated { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipRegistersNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            JumpOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKeyDown { x } => write!(f, "SKP V{:X}", x),
            SkipKeyUp { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            AwaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
