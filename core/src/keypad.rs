use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// Tracks which of keys 0..F are held, and which were let go since the host last
/// called `clear_released`.
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    down: [bool; KEY_COUNT],
    released: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys outside 0..F are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(down) = self.down.get_mut(key as usize) {
            *down = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(down) = self.down.get_mut(key as usize) {
            *down = false;
            self.released[key as usize] = true;
        }
    }

    pub fn clear_released(&mut self) {
        self.released = [false; KEY_COUNT];
    }

    /// Only the low nibble of `key` selects the key.
    pub fn is_down(&self, key: u8) -> bool {
        self.down[(key & 0xF) as usize]
    }

    pub fn first_released(&self) -> Option<u8> {
        self.released
            .iter()
            .position(|&released| released)
            .map(|key| key as u8)
    }
}
