use crate::constants::MEMORY_SIZE;
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes of byte-addressable RAM.
///
/// ```text
/// 0x000..0x050  empty
/// 0x050..0x0A0  sprite sheet (default location)
/// 0x0A0..0x200  empty
/// 0x200..0x1000 program
/// ```
///
/// Every access is bounds-checked; reaching past the end is a `MemoryOutOfBounds` error
/// rather than a wrap or a panic.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: [0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let byte = self
            .bytes
            .get_mut(address)
            .ok_or(Chip8Error::MemoryOutOfBounds { address })?;
        *byte = value;
        Ok(())
    }

    /// Reads the big-endian word at `address..=address + 1`.
    pub fn read_word(&self, address: usize) -> Result<u16> {
        let word = self.slice(address, 2)?;
        Ok(u16::from(word[0]) << 8 | u16::from(word[1]))
    }

    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        let end = Self::end_of(address, len)?;
        Ok(&self.bytes[address..end])
    }

    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        let end = Self::end_of(address, len)?;
        Ok(&mut self.bytes[address..end])
    }

    /// Copies `data` into memory starting at `address`.
    pub fn load(&mut self, address: usize, data: &[u8]) -> Result<()> {
        self.slice_mut(address, data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// Exclusive end of `address..address + len`, or the first address that is out of range.
    fn end_of(address: usize, len: usize) -> Result<usize> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(end),
            _ => Err(Chip8Error::MemoryOutOfBounds {
                address: address.max(MEMORY_SIZE),
            }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("size", &self.bytes.len())
            .finish()
    }
}
