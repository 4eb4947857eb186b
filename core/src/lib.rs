pub use chip8::Chip8;
pub use config::{Config, Edge};
pub use error::{Chip8Error, Result};
pub use framebuffer::{FrameBuffer, Resolution};
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use memory::Memory;
pub use operations::Flow;
pub use pacer::{Due, Pacer, Schedule};
pub use stack::Stack;
pub use state::{Dialect, State};
pub use timers::{Timers, Tone};

mod chip8;
mod config;
pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod keypad;
mod memory;
mod operations;
mod pacer;
mod stack;
mod state;
mod timers;
