use std::time::Instant;

use log::{debug, warn};

use crate::config::Config;
use crate::constants::{MAX_ROM_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET};
use crate::error::Result;
use crate::framebuffer::{FrameBuffer, Resolution};
use crate::memory::Memory;
use crate::stack::Stack;
use crate::timers::Timers;

/// Instruction set variants; a few opcodes behave differently under each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Chip8,
    Schip,
}

/// The Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 12-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Timers
/// - 2 8-bit timers (delay & sound)
///
/// ## Memory
/// - a 16 level stack of return addresses
/// - 4096 bytes of addressable memory
/// - a frame buffer holding the contents of the next frame to be drawn
///
/// ## Timing
/// - `last_draw` holds when the most recent sprite was drawn, for the vblank gate
#[derive(Debug, Clone)]
pub struct State {
    pub memory: Memory,
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub timers: Timers,
    pub frame_buffer: FrameBuffer,
    pub dialect: Dialect,
    pub powered_on: bool,
    pub last_draw: Option<Instant>,
}

impl State {
    /// A machine with the sprite sheet in memory and no program.
    pub fn new(config: &Config) -> Result<Self> {
        Self::initialize(&[], config)
    }

    /// A freshly powered machine with `rom` loaded at 0x200.
    ///
    /// Anything past the first `MAX_ROM_SIZE` bytes of `rom` does not fit and is dropped.
    pub fn initialize(rom: &[u8], config: &Config) -> Result<Self> {
        let mut memory = Memory::new();
        memory.load(config.font_address as usize, &SPRITE_SHEET)?;

        let program = if rom.len() > MAX_ROM_SIZE {
            warn!(
                "ROM is {} bytes, truncating to {} bytes",
                rom.len(),
                MAX_ROM_SIZE
            );
            &rom[..MAX_ROM_SIZE]
        } else {
            rom
        };
        memory.load(PROGRAM_START as usize, program)?;
        debug!("loaded {} byte program", program.len());

        Ok(State {
            memory,
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            timers: Timers::new(),
            frame_buffer: FrameBuffer::new(Resolution::Low),
            dialect: Dialect::Chip8,
            powered_on: true,
            last_draw: None,
        })
    }

    /// Writes `result` to Vx, then the flag to VF, so that the flag wins when x is F.
    pub fn set_with_flag(&mut self, x: u8, result: u8, flag: bool) {
        self.v[x as usize] = result;
        self.v[0xF] = u8::from(flag);
    }

    /// Sets the index register, keeping it inside the 12-bit address space.
    pub fn set_index(&mut self, address: u16) {
        self.i = address & 0x0FFF;
    }
}
