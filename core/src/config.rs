use crate::constants::{DEFAULT_FONT_ADDRESS, DEFAULT_INSTRUCTIONS_PER_SECOND};

/// What happens to sprite pixels that fall past the right or bottom edge of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Pixels past the edge are dropped.
    Clip,
    /// Pixels past the edge reappear on the opposite side.
    Wrap,
}

/// Interpreter settings that are not fixed by the architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub instructions_per_second: u32,
    /// Where the sprite sheet is written; FX29 points into it.
    pub font_address: u16,
    pub edge: Edge,
    /// Hold each DXYN until a display refresh has passed since the previous one.
    pub vblank_wait: bool,
}

impl Config {
    /// Sets the instruction rate, falling back to the default for 0.
    pub fn with_instructions_per_second(self, instructions_per_second: u32) -> Self {
        let instructions_per_second = match instructions_per_second {
            0 => DEFAULT_INSTRUCTIONS_PER_SECOND,
            ips => ips,
        };
        Config {
            instructions_per_second,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions_per_second: DEFAULT_INSTRUCTIONS_PER_SECOND,
            font_address: DEFAULT_FONT_ADDRESS,
            edge: Edge::Clip,
            vblank_wait: true,
        }
    }
}
