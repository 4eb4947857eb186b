use std::error::Error;

use log::debug;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use teal8_core::Tone;

const SAMPLE_RATE: i32 = 44_100;
const TONE_HZ: f32 = 440.0;
const AMPLITUDE: i16 = 3_000;
const BUFFER_SAMPLES: u16 = 512;

/// A mono square wave; `phase` runs over 0..1 once per period.
struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: i16,
}

impl AudioCallback for SquareWave {
    type Channel = i16;

    fn callback(&mut self, out: &mut [i16]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// The Chip-8 buzzer: a single tone that plays while the sound timer is running.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
}

impl Beeper {
    /// Opens a paused playback device on the default output.
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, Box<dyn Error>> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: Some(BUFFER_SAMPLES),
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| {
            debug!("audio device opened at {}Hz", spec.freq);
            SquareWave {
                phase_inc: TONE_HZ / spec.freq as f32,
                phase: 0.0,
                volume: AMPLITUDE,
            }
        })?;

        Ok(Beeper { device })
    }

    pub fn play(&mut self) {
        self.device.resume();
    }

    /// Pauses playback; the next tone starts from the beginning of a period.
    pub fn stop(&mut self) {
        self.device.pause();
        self.device.lock().phase = 0.0;
    }

    pub fn set(&mut self, tone: Tone) {
        match tone {
            Tone::On => self.play(),
            Tone::Off => self.stop(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave_alternates() {
        let mut wave = SquareWave {
            phase_inc: 0.25,
            phase: 0.0,
            volume: AMPLITUDE,
        };
        let mut out = [0; 8];
        wave.callback(&mut out);
        assert_eq!(
            out,
            [
                AMPLITUDE, AMPLITUDE, -AMPLITUDE, -AMPLITUDE, AMPLITUDE, AMPLITUDE, -AMPLITUDE,
                -AMPLITUDE
            ]
        );
        assert_eq!(wave.phase, 0.0);
    }
}
