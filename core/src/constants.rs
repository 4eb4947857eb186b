use std::time::Duration;

/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// 0x200 is where ROMs are loaded into memory and where execution starts.
pub const PROGRAM_START: u16 = 0x200;

/// Everything from `PROGRAM_START` to the end of memory is available to a ROM.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Default location of the sprite sheet; 0x000..0x050 is left empty by convention.
pub const DEFAULT_FONT_ADDRESS: u16 = 0x050;

/// Each hex glyph in the sprite sheet is 5 rows tall.
pub const GLYPH_SIZE: u16 = 5;

pub const REGISTER_COUNT: usize = 16;

/// Nested subroutine calls allowed before the stack overflows.
pub const STACK_LEVELS: usize = 16;

pub const KEY_COUNT: usize = 16;

pub const LOW_RES_WIDTH: usize = 64;
pub const LOW_RES_HEIGHT: usize = 32;
pub const HIGH_RES_WIDTH: usize = 128;
pub const HIGH_RES_HEIGHT: usize = 64;

/// Delay and sound timers count down at 60Hz.
pub const TIMER_HZ: u32 = 60;

/// Minimum time between two sprite draws (one display refresh).
pub const VBLANK_INTERVAL: Duration = Duration::from_millis(1000 / TIMER_HZ as u64);

pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 1000;

/// # Sprite Sheet
/// The hex digits 0..F, each drawn as a 4x5 sprite.
///
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
