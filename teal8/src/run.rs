use std::error::Error;
use std::thread;
use std::time::Instant;

use log::{info, warn};
use sdl2::event::Event;

use teal8_core::{Chip8, Config, Schedule};
use teal8_display::{Beeper, Display};

use crate::keymap::{command, keymap, Command};
use crate::rom::Rom;

/// Everything `run` needs from the command line.
pub struct Settings {
    pub rom: Rom,
    pub config: Config,
    pub mute: bool,
}

/// Runs a ROM until it powers off or the window is closed.
pub fn run(settings: Settings) -> Result<(), Box<dyn Error>> {
    let Settings { rom, config, mute } = settings;

    let mut chip8 = Chip8::new(config)?;
    chip8.load_rom(&mut rom.open()?)?;
    info!("loaded {}", rom);

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, &format!("teal8 - {}", rom))?;
    let mut beeper = if mute {
        info!("audio muted");
        None
    } else {
        Some(Beeper::new(&sdl)?)
    };
    let mut events = sdl.event_pump()?;

    info!(
        "running at {} instructions per second",
        config.instructions_per_second
    );
    let mut schedule = Schedule::new(config.instructions_per_second, Instant::now());

    while chip8.is_powered_on() {
        let now = Instant::now();
        let due = schedule.poll(now);
        if !due.any() {
            thread::sleep(schedule.next_due().saturating_duration_since(now));
            continue;
        }

        if due.timers {
            let tone = chip8.tick_timers();
            if let (Some(tone), Some(beeper)) = (tone, beeper.as_mut()) {
                beeper.set(tone);
            }
        }

        // Handle input
        let mut reset = false;
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => chip8.power_off(),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (command(key), keymap(key)) {
                    (Some(Command::PowerOff), _) => chip8.power_off(),
                    (Some(Command::Reset), _) => reset = true,
                    (_, Some(kc)) => chip8.key_press(kc),
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                _ => continue,
            };
        }
        if !chip8.is_powered_on() {
            break;
        }

        if reset {
            info!("resetting {}", rom);
            match rom.open() {
                Ok(mut reader) => chip8.load_rom(&mut reader)?,
                Err(error) => {
                    warn!("unable to re-read {} ({}), restarting the loaded copy", rom, error);
                    chip8.reset()?;
                }
            }
            if let Some(beeper) = beeper.as_mut() {
                beeper.stop();
            }
            schedule.reset(now);
            continue;
        }

        // Update state; releases stay visible until an instruction has run
        if due.cpu {
            chip8.step(now)?;
            chip8.clear_released_keys();
        }

        // If the frame changed, render it and clear the flag
        if let Some(frame) = chip8.get_frame() {
            display.render(frame)?;
            chip8.frame_presented();
        }
    }

    if let Some(beeper) = beeper.as_mut() {
        beeper.stop();
    }
    info!("powered off");
    Ok(())
}
