/// A change in whether the sound timer should be beeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    On,
    Off,
}

/// # Timers
/// Delay and sound timers, both counting down to 0 at 60Hz.
/// The tone plays for as long as the sound timer is above 0.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    sounding: bool,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts both timers down by one and reports whether the tone should start or stop.
    pub fn tick(&mut self) -> Option<Tone> {
        let should_sound = self.sound > 0;
        let change = match (should_sound, self.sounding) {
            (true, false) => Some(Tone::On),
            (false, true) => Some(Tone::Off),
            _ => None,
        };
        self.sounding = should_sound;

        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
        change
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}

#[cfg(test)]
mod test_timers {
    use super::*;

    #[test]
    fn test_decrements_to_zero() {
        let mut timers = Timers::new();
        timers.delay = 2;
        timers.tick();
        assert_eq!(timers.delay, 1);
        timers.tick();
        timers.tick();
        assert_eq!(timers.delay, 0);
    }

    #[test]
    fn test_idle_timers_stay_silent() {
        let mut timers = Timers::new();
        assert_eq!(timers.tick(), None);
        assert_eq!(timers.sound, 0);
    }

    #[test]
    fn test_tone_follows_sound_timer() {
        let mut timers = Timers::new();
        timers.sound = 2;
        assert_eq!(timers.tick(), Some(Tone::On));
        assert!(timers.is_sounding());
        assert_eq!(timers.tick(), None);
        assert_eq!(timers.sound, 0);
        assert_eq!(timers.tick(), Some(Tone::Off));
        assert!(!timers.is_sounding());
        assert_eq!(timers.tick(), None);
    }
}
