use std::collections::HashSet;
use std::io::Read;
use std::time::Instant;

use log::{debug, trace, warn};

use crate::config::Config;
use crate::error::{Chip8Error, Result};
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::operations::{self, Cycle, Flow};
use crate::state::State;
use crate::timers::{Timers, Tone};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keypad` with public interfaces for manipulating it
///  - the loaded `rom` so the machine can be reset
///  - where unknown opcodes have already been reported
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    config: Config,
    state: State,
    keypad: Keypad,
    rom: Vec<u8>,
    unknown_at: HashSet<u16>,
}

impl Chip8 {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Chip8 {
            state: State::new(&config)?,
            config,
            keypad: Keypad::new(),
            rom: Vec::new(),
            unknown_at: HashSet::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a rom from a source file and power the machine on with it
    ///
    /// # Arguments
    /// * `reader` a reader that yields the whole ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.rom = rom;
        self.reset()
    }

    /// Powers the machine back on with the most recently loaded rom.
    pub fn reset(&mut self) -> Result<()> {
        debug!("resetting");
        self.state = State::initialize(&self.rom, &self.config)?;
        self.unknown_at.clear();
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<&FrameBuffer> {
        if self.state.frame_buffer.is_dirty() {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Clears the redraw flag once the display has caught up.
    pub fn frame_presented(&mut self) {
        self.state.frame_buffer.mark_clean();
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// Forgets which keys were released; the host calls this after each executed instruction.
    pub fn clear_released_keys(&mut self) {
        self.keypad.clear_released();
    }

    pub fn power_off(&mut self) {
        debug!("powering off");
        self.state.powered_on = false;
    }

    pub fn is_powered_on(&self) -> bool {
        self.state.powered_on
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn timers(&self) -> &Timers {
        &self.state.timers
    }

    /// Advances the CPU by a single instruction
    /// - gets the opcode at the pc and moves the pc past it
    /// - decodes and executes it; unknown opcodes are skipped over
    ///
    /// `now` is when this cycle happens, for the vblank gate on sprite draws.
    pub fn step(&mut self, now: Instant) -> Result<Flow> {
        if !self.state.powered_on {
            return Ok(Flow::PowerOff);
        }

        let op = self.fetch()?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        self.state.pc = self.state.pc.wrapping_add(2);

        let instruction = match Instruction::decode(op) {
            Ok(instruction) => instruction,
            Err(Chip8Error::UnknownOpcode { opcode }) => {
                let address = self.state.pc.wrapping_sub(2);
                // first sighting at this address
                if self.unknown_at.insert(address) {
                    warn!("skipping unknown opcode {:04X} at {:04X}", opcode, address);
                } else {
                    debug!("skipping unknown opcode {:04X} at {:04X}", opcode, address);
                }
                return Ok(Flow::Continue);
            }
            Err(error) => return Err(error),
        };

        let cycle = Cycle {
            keypad: &self.keypad,
            config: &self.config,
            now,
        };
        operations::execute(instruction, &mut self.state, &cycle)
    }

    /// Counts the delay and sound timers down; call at 60Hz.
    pub fn tick_timers(&mut self) -> Option<Tone> {
        self.state.timers.tick()
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16> {
        self.state.memory.read_word(self.state.pc as usize)
    }
}
