use crate::constants::STACK_LEVELS;
use crate::error::{Chip8Error, Result};

/// # Stack
/// Return addresses for up to 16 nested subroutine calls.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    addresses: [u16; STACK_LEVELS],
    depth: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a return address; nothing is written when the stack is already full.
    pub fn push(&mut self, address: u16) -> Result<()> {
        let slot = self
            .addresses
            .get_mut(self.depth)
            .ok_or(Chip8Error::StackOverflow)?;
        *slot = address;
        self.depth += 1;
        Ok(())
    }

    /// Removes and returns the most recently pushed address.
    pub fn pop(&mut self) -> Result<u16> {
        if self.depth == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.depth -= 1;
        Ok(self.addresses[self.depth])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }
}
