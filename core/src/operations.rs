use std::time::Instant;

use log::debug;

use crate::config::Config;
use crate::constants::{GLYPH_SIZE, VBLANK_INTERVAL};
use crate::error::Result;
use crate::framebuffer::Resolution;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::state::{Dialect, State};

/// What the host loop should do after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The instruction is blocked (on a key release or the next vblank) and will be retried.
    Waiting,
    PowerOff,
}

/// Inputs an instruction may read besides the machine state.
pub struct Cycle<'a> {
    pub keypad: &'a Keypad,
    pub config: &'a Config,
    pub now: Instant,
}

/// Executes a decoded instruction.
///
/// The program counter must already point past the instruction; jumps overwrite it and
/// blocked instructions rewind it.
pub fn execute(instruction: Instruction, state: &mut State, cycle: &Cycle) -> Result<Flow> {
    use Instruction::*;

    match instruction {
        Clear => clr(state),
        Return => rts(state)?,
        Exit => return Ok(exit(state)),
        LowResolution => resolution(state, Resolution::Low),
        HighResolution => resolution(state, Resolution::High),
        Jump(nnn) => jump(state, nnn),
        Call(nnn) => call(state, nnn)?,
        SkipEqual(x, nn) => ske(state, x, nn),
        SkipNotEqual(x, nn) => skne(state, x, nn),
        SkipRegistersEqual(x, y) => skre(state, x, y),
        Load(x, nn) => load(state, x, nn),
        Add(x, nn) => add(state, x, nn),
        Move(x, y) => mv(state, x, y),
        Or(x, y) => or(state, x, y),
        And(x, y) => and(state, x, y),
        Xor(x, y) => xor(state, x, y),
        AddRegisters(x, y) => addr(state, x, y),
        Sub(x, y) => sub(state, x, y),
        ShiftRight(x, y) => shr(state, x, y),
        SubReversed(x, y) => subn(state, x, y),
        ShiftLeft(x, y) => shl(state, x, y),
        SkipRegistersNotEqual(x, y) => skrne(state, x, y),
        LoadIndex(nnn) => loadi(state, nnn),
        JumpOffset(x, nnn) => jumpi(state, x, nnn),
        Random(x, nn) => rand(state, x, nn),
        Draw(x, y, n) => return draw(state, x, y, n, cycle),
        SkipKeyPressed(x) => skpr(state, x, cycle.keypad),
        SkipKeyNotPressed(x) => skup(state, x, cycle.keypad),
        ReadDelay(x) => moved(state, x),
        WaitKey(x) => return Ok(keyd(state, x, cycle.keypad)),
        SetDelay(x) => loads(state, x),
        SetSound(x) => ld(state, x),
        AddIndex(x) => addi(state, x),
        LoadGlyph(x) => ldspr(state, x, cycle.config.font_address),
        StoreBcd(x) => bcd(state, x)?,
        StoreRegisters(x) => stor(state, x)?,
        LoadRegisters(x) => read(state, x)?,
    }
    Ok(Flow::Continue)
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// Sets the pc back onto the current instruction so it runs again.
fn retry(state: &mut State) -> Flow {
    state.pc = state.pc.wrapping_sub(2);
    Flow::Waiting
}

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer.clear();
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<()> {
    state.pc = state.stack.pop()?;
    Ok(())
}

/// power off
pub fn exit(state: &mut State) -> Flow {
    debug!("program requested power off at {:#05X}", state.pc.wrapping_sub(2));
    state.powered_on = false;
    Flow::PowerOff
}

/// Switches display mode; only SCHIP programs do this, so it also selects the SCHIP dialect.
pub fn resolution(state: &mut State, resolution: Resolution) {
    debug!("switching to {:?} resolution, SCHIP dialect", resolution);
    state.frame_buffer.set_resolution(resolution);
    state.dialect = Dialect::Schip;
}

/// PC = addr
pub fn jump(state: &mut State, nnn: u16) {
    state.pc = nnn;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, nnn: u16) -> Result<()> {
    state.stack.push(state.pc)?;
    state.pc = nnn;
    Ok(())
}

/// if Vx == nn then pc += 2
pub fn ske(state: &mut State, x: u8, nn: u8) {
    let equal = state.v[x as usize] == nn;
    skip_if(state, equal);
}

/// if Vx != nn then pc += 2
pub fn skne(state: &mut State, x: u8, nn: u8) {
    let not_equal = state.v[x as usize] != nn;
    skip_if(state, not_equal);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    let equal = state.v[x as usize] == state.v[y as usize];
    skip_if(state, equal);
}

/// Vx = nn
pub fn load(state: &mut State, x: u8, nn: u8) {
    state.v[x as usize] = nn;
}

/// Vx += nn
/// Overflow wraps and VF is left alone
pub fn add(state: &mut State, x: u8, nn: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(nn);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// CHIP-8 logic ops clobber VF.
fn reset_flag(state: &mut State) {
    if state.dialect == Dialect::Chip8 {
        state.v[0xF] = 0;
    }
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
    reset_flag(state);
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
    reset_flag(state);
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
    reset_flag(state);
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.set_with_flag(x, res, over);
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.set_with_flag(x, res, !under);
}

/// The register a shift reads from.
fn shift_source(state: &State, x: u8, y: u8) -> u8 {
    match state.dialect {
        Dialect::Chip8 => state.v[y as usize],
        Dialect::Schip => state.v[x as usize],
    }
}

/// Vx = Vy >> 1; VF = bit shifted out
pub fn shr(state: &mut State, x: u8, y: u8) {
    let source = shift_source(state, x, y);
    state.set_with_flag(x, source >> 1, source & 0x01 != 0);
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.set_with_flag(x, res, !under);
}

/// Vx = Vy << 1; VF = bit shifted out
pub fn shl(state: &mut State, x: u8, y: u8) {
    let source = shift_source(state, x, y);
    state.set_with_flag(x, source << 1, source & 0x80 != 0);
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    let not_equal = state.v[x as usize] != state.v[y as usize];
    skip_if(state, not_equal);
}

/// I = addr
pub fn loadi(state: &mut State, nnn: u16) {
    state.set_index(nnn);
}

/// PC = V0 + addr
/// SCHIP offsets by Vx instead, where x is the top nibble of the address
pub fn jumpi(state: &mut State, x: u8, nnn: u16) {
    let offset = match state.dialect {
        Dialect::Chip8 => state.v[0x0],
        Dialect::Schip => state.v[x as usize],
    };
    state.pc = nnn + u16::from(offset);
}

/// Vx = rand_byte & nn
pub fn rand(state: &mut State, x: u8, nn: u8) {
    let rand_byte: u8 = rand::random();
    state.v[x as usize] = rand_byte & nn;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..n at position x, y on the FrameBuffer.
/// Sets VF if any pixels were erased
///
/// With the SCHIP dialect a size of 0 draws a 16x16 sprite from 32 bytes.
/// Waits for the next vblank if a sprite was already drawn during this one.
pub fn draw(state: &mut State, x: u8, y: u8, n: u8, cycle: &Cycle) -> Result<Flow> {
    if cycle.config.vblank_wait {
        if let Some(last_draw) = state.last_draw {
            if cycle.now.saturating_duration_since(last_draw) < VBLANK_INTERVAL {
                return Ok(retry(state));
            }
        }
    }

    let (len, bytes_per_row) = match (n, state.dialect) {
        (0, Dialect::Schip) => (32, 2),
        (n, _) => (n as usize, 1),
    };
    let sprite = state.memory.slice(state.i as usize, len)?;
    let collided = state.frame_buffer.draw_sprite(
        state.v[x as usize],
        state.v[y as usize],
        sprite,
        bytes_per_row,
        cycle.config.edge,
    );
    state.v[0xF] = u8::from(collided);
    state.last_draw = Some(cycle.now);
    Ok(Flow::Continue)
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8, keypad: &Keypad) {
    let pressed = keypad.is_down(state.v[x as usize]);
    skip_if(state, pressed);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8, keypad: &Keypad) {
    let pressed = keypad.is_down(state.v[x as usize]);
    skip_if(state, !pressed);
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.timers.delay;
}

/// await key release for Vx
pub fn keyd(state: &mut State, x: u8, keypad: &Keypad) -> Flow {
    match keypad.first_released() {
        Some(key) => {
            state.v[x as usize] = key;
            Flow::Continue
        }
        None => retry(state),
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.timers.delay = state.v[x as usize];
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.timers.sound = state.v[x as usize];
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) {
    state.set_index(state.i + u16::from(state.v[x as usize]));
}

/// I = font + Vx * 5
/// Set I to the memory address of the sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8, font_address: u16) {
    let glyph = u16::from(state.v[x as usize] & 0xF);
    state.set_index(font_address + glyph * GLYPH_SIZE);
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Result<()> {
    let value = state.v[x as usize];
    let bcd = [value / 100 % 10, value / 10 % 10, value % 10];
    state.memory.load(state.i as usize, &bcd)
}

/// Moves I past the registers just stored or loaded; SCHIP leaves I alone.
fn advance_index(state: &mut State, x: u8) {
    if state.dialect == Dialect::Chip8 {
        state.set_index(state.i + u16::from(x) + 1);
    }
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Result<()> {
    state
        .memory
        .load(state.i as usize, &state.v[..=x as usize])?;
    advance_index(state, x);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Result<()> {
    let count = x as usize + 1;
    let bytes = state.memory.slice(state.i as usize, count)?;
    state.v[..count].copy_from_slice(bytes);
    advance_index(state, x);
    Ok(())
}
