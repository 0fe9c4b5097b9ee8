use log::debug;

use crate::constants::{ADDRESS_MASK, FLAG_REGISTER, FONT_BASE, GLYPH_SIZE};
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::io::Input;
use crate::state::State;

/// What the engine has to do once an instruction has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The frame buffer changed and should be presented
    Redraw,
    /// Execution suspends until a key press is stored in the register
    AwaitKey(u8),
}

/// Applies a decoded instruction to the state.
///
/// PC has already been moved past the instruction, so jumps, calls and
/// returns overwrite it and skips add another 2.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    input: &dyn Input,
) -> Result<Flow, Fault> {
    use Instruction::*;
    match instruction {
        Clear => clr(state),
        Return => rts(state),
        System { nnn } => sys(nnn),
        Jump { nnn } => jump(state, nnn),
        Call { nnn } => call(state, nnn),
        SkipEqual { x, kk } => ske(state, x, kk),
        SkipNotEqual { x, kk } => skne(state, x, kk),
        SkipRegistersEqual { x, y } => skre(state, x, y),
        Load { x, kk } => load(state, x, kk),
        Add { x, kk } => add(state, x, kk),
        Move { x, y } => mv(state, x, y),
        Or { x, y } => or(state, x, y),
        And { x, y } => and(state, x, y),
        Xor { x, y } => xor(state, x, y),
        AddRegisters { x, y } => addr(state, x, y),
        Sub { x, y } => sub(state, x, y),
        ShiftRight { x, .. } => shr(state, x),
        SubNegated { x, y } => subn(state, x, y),
        ShiftLeft { x, .. } => shl(state, x),
        SkipRegistersNotEqual { x, y } => skrne(state, x, y),
        LoadIndex { nnn } => loadi(state, nnn),
        JumpOffset { nnn } => jumpi(state, nnn),
        Random { x, kk } => rand(state, x, kk),
        Draw { x, y, n } => draw(state, x, y, n),
        SkipKeyDown { x } => skpr(state, x, input),
        SkipKeyUp { x } => skup(state, x, input),
        LoadDelay { x } => moved(state, x),
        AwaitKey { x } => Ok(Flow::AwaitKey(x)),
        SetDelay { x } => loads(state, x),
        SetSound { x } => ld(state, x),
        AddIndex { x } => addi(state, x),
        LoadGlyph { x } => ldspr(state, x),
        StoreBcd { x } => bcd(state, x),
        StoreRegisters { x } => stor(state, x),
        LoadRegisters { x } => read(state, x),
    }
}

fn skip_if(state: &mut State, condition: bool) -> Result<Flow, Fault> {
    if condition {
        state.registers.advance_pc(0x2);
    }
    Ok(Flow::Continue)
}

/// Machine code routines don't exist here
fn sys(nnn: u16) -> Result<Flow, Fault> {
    debug!("ignoring SYS {:#05X}", nnn);
    Ok(Flow::Continue)
}

/// clear
fn clr(state: &mut State) -> Result<Flow, Fault> {
    state.frame_buffer.clear();
    Ok(Flow::Redraw)
}

/// PC = STACK.pop()
/// The popped address already points past the call
fn rts(state: &mut State) -> Result<Flow, Fault> {
    let addr = state.registers.pop().map_err(|fault| match fault {
        Fault::StackUnderflow => Fault::ReturnWithEmptyStack,
        other => other,
    })?;
    state.registers.jump(addr);
    Ok(Flow::Continue)
}

/// PC = nnn
fn jump(state: &mut State, nnn: u16) -> Result<Flow, Fault> {
    state.registers.jump(nnn);
    Ok(Flow::Continue)
}

/// STACK.push(PC); PC = nnn
fn call(state: &mut State, nnn: u16) -> Result<Flow, Fault> {
    let pc = state.registers.pc;
    state.registers.push(pc)?;
    state.registers.jump(nnn);
    Ok(Flow::Continue)
}

/// if Vx == kk then pc += 2
fn ske(state: &mut State, x: u8, kk: u8) -> Result<Flow, Fault> {
    let vx = state.registers.get(x)?;
    skip_if(state, vx == kk)
}

/// if Vx != kk then pc += 2
fn skne(state: &mut State, x: u8, kk: u8) -> Result<Flow, Fault> {
    let vx = state.registers.get(x)?;
    skip_if(state, vx != kk)
}

/// if Vx == Vy then pc += 2
fn skre(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let (vx, vy) = (state.registers.get(x)?, state.registers.get(y)?);
    skip_if(state, vx == vy)
}

/// Vx = kk
fn load(state: &mut State, x: u8, kk: u8) -> Result<Flow, Fault> {
    state.registers.set(x, kk)?;
    Ok(Flow::Continue)
}

/// Vx += kk; VF = overflow
fn add(state: &mut State, x: u8, kk: u8) -> Result<Flow, Fault> {
    let (res, over) = state.registers.get(x)?.overflowing_add(kk);
    state.registers.set(x, res)?;
    state.registers.set(FLAG_REGISTER, over as u8)?;
    Ok(Flow::Continue)
}

/// Vx = Vy
fn mv(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let vy = state.registers.get(y)?;
    state.registers.set(x, vy)?;
    Ok(Flow::Continue)
}

/// Vx |= Vy
fn or(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let res = state.registers.get(x)? | state.registers.get(y)?;
    state.registers.set(x, res)?;
    Ok(Flow::Continue)
}

/// Vx &= Vy
fn and(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let res = state.registers.get(x)? & state.registers.get(y)?;
    state.registers.set(x, res)?;
    Ok(Flow::Continue)
}

/// Vx ^= Vy
fn xor(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let res = state.registers.get(x)? ^ state.registers.get(y)?;
    state.registers.set(x, res)?;
    Ok(Flow::Continue)
}

/// Vx += Vy; VF = overflow
fn addr(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let (res, over) = state
        .registers
        .get(x)?
        .overflowing_add(state.registers.get(y)?);
    state.registers.set(x, res)?;
    state.registers.set(FLAG_REGISTER, over as u8)?;
    Ok(Flow::Continue)
}

/// Vx -= Vy; VF = !underflow
fn sub(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let (vx, vy) = (state.registers.get(x)?, state.registers.get(y)?);
    state.registers.set(x, vx.wrapping_sub(vy))?;
    state.registers.set(FLAG_REGISTER, (vx >= vy) as u8)?;
    Ok(Flow::Continue)
}

/// VF = lsb; Vx >>= 1
fn shr(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let vx = state.registers.get(x)?;
    state.registers.set(FLAG_REGISTER, vx & 0x1)?;
    state.registers.set(x, vx >> 1)?;
    Ok(Flow::Continue)
}

/// Vx = Vy - Vx; VF = !underflow
fn subn(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let (vx, vy) = (state.registers.get(x)?, state.registers.get(y)?);
    state.registers.set(x, vy.wrapping_sub(vx))?;
    state.registers.set(FLAG_REGISTER, (vy >= vx) as u8)?;
    Ok(Flow::Continue)
}

/// VF = msb; Vx <<= 1
fn shl(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let vx = state.registers.get(x)?;
    state.registers.set(FLAG_REGISTER, (vx >> 7) & 0x1)?;
    state.registers.set(x, vx << 1)?;
    Ok(Flow::Continue)
}

/// if Vx != Vy then pc += 2
fn skrne(state: &mut State, x: u8, y: u8) -> Result<Flow, Fault> {
    let (vx, vy) = (state.registers.get(x)?, state.registers.get(y)?);
    skip_if(state, vx != vy)
}

/// I = nnn
fn loadi(state: &mut State, nnn: u16) -> Result<Flow, Fault> {
    state.registers.i = nnn;
    Ok(Flow::Continue)
}

/// PC = V0 + nnn, wrapped into memory
fn jumpi(state: &mut State, nnn: u16) -> Result<Flow, Fault> {
    let v0 = state.registers.get(0x0)?;
    state.registers.jump(nnn + u16::from(v0));
    Ok(Flow::Continue)
}

/// Vx = rand_byte & kk
fn rand(state: &mut State, x: u8, kk: u8) -> Result<Flow, Fault> {
    let rand_byte = state.random_byte();
    state.registers.set(x, rand_byte & kk)?;
    Ok(Flow::Continue)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<Flow, Fault> {
    let (vx, vy) = (state.registers.get(x)?, state.registers.get(y)?);
    let rows = state.memory.read_range(state.registers.i, n as usize);
    let collided = state.frame_buffer.blit(vx, vy, &rows);
    state.registers.set(FLAG_REGISTER, collided as u8)?;
    Ok(Flow::Redraw)
}

/// if Vx.pressed then pc += 2
fn skpr(state: &mut State, x: u8, input: &dyn Input) -> Result<Flow, Fault> {
    let key = state.registers.get(x)? & 0xF;
    skip_if(state, input.is_key_down(key))
}

/// if !Vx.pressed then pc += 2
fn skup(state: &mut State, x: u8, input: &dyn Input) -> Result<Flow, Fault> {
    let key = state.registers.get(x)? & 0xF;
    skip_if(state, !input.is_key_down(key))
}

/// Vx = DT
fn moved(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let delay = state.timers.delay;
    state.registers.set(x, delay)?;
    Ok(Flow::Continue)
}

/// DT = Vx
fn loads(state: &mut State, x: u8) -> Result<Flow, Fault> {
    state.timers.delay = state.registers.get(x)?;
    Ok(Flow::Continue)
}

/// ST = Vx
fn ld(state: &mut State, x: u8) -> Result<Flow, Fault> {
    state.timers.sound = state.registers.get(x)?;
    Ok(Flow::Continue)
}

/// I += Vx, wrapped into memory
fn addi(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let vx = state.registers.get(x)?;
    state.registers.i = state.registers.i.wrapping_add(u16::from(vx)) & ADDRESS_MASK;
    Ok(Flow::Continue)
}

/// I = FONT_BASE + Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
fn ldspr(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let vx = state.registers.get(x)?;
    state.registers.i = (FONT_BASE + u16::from(vx) * GLYPH_SIZE) & ADDRESS_MASK;
    Ok(Flow::Continue)
}

/// mem[I], mem[I+1], mem[I+2] = bcd(Vx)
/// Store the hundreds, tens and ones of Vx starting at address I
fn bcd(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let vx = state.registers.get(x)?;
    let i = state.registers.i;
    state.memory.write(i, vx / 100 % 10);
    state.memory.write(i.wrapping_add(1), vx / 10 % 10);
    state.memory.write(i.wrapping_add(2), vx % 10);
    Ok(Flow::Continue)
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let i = state.registers.i;
    for reg in 0..=x {
        let value = state.registers.get(reg)?;
        state.memory.write(i.wrapping_add(u16::from(reg)), value);
    }
    Ok(Flow::Continue)
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let i = state.registers.i;
    for reg in 0..=x {
        let value = state.memory.read(i.wrapping_add(u16::from(reg)));
        state.registers.set(reg, value)?;
    }
    Ok(Flow::Continue)
}
