use thiserror::Error;

/// Everything that can stop the interpreter.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("stack overflow: more than 16 nested subroutine calls")]
    StackOverflow,

    #[error("stack underflow: returned from a subroutine with an empty call stack")]
    StackUnderflow,

    /// Decoding only; execution reports it and carries on.
    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
