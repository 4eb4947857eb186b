use clap::Parser;
use log::error;

use teal8_core::constants::{DEFAULT_INSTRUCTIONS_PER_SECOND, PROGRAM_START, SPRITE_SHEET};
use teal8_core::{Config, Edge};

use crate::rom::Rom;
use crate::run::{run, Settings};

mod keymap;
mod rom;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A CHIP-8 and SUPER-CHIP interpreter", long_about = None)]
struct Args {
    #[arg(help = "ROM to run; looked up under roms/ before being treated as a path")]
    rom: String,

    #[arg(short, long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND, help = "Instructions per second (0 for the default)")]
    ips: u32,

    #[arg(short, long, help = "Disable sound")]
    mute: bool,

    #[arg(long, help = "Wrap sprites around the screen edges instead of clipping them")]
    wrap: bool,

    #[arg(long, help = "Let sprites draw more than once per display refresh")]
    no_vblank: bool,

    #[arg(long, default_value = "0x050", value_parser = parse_font_address, help = "Where the hex font is loaded, in hex (0x..) or decimal")]
    font_address: u16,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            font_address: self.font_address,
            edge: if self.wrap { Edge::Wrap } else { Edge::Clip },
            vblank_wait: !self.no_vblank,
            ..Config::default()
        }
        .with_instructions_per_second(self.ips)
    }
}

/// The font has to fit below the program.
fn parse_font_address(arg: &str) -> Result<u16, String> {
    let address = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => arg.parse(),
    }
    .map_err(|e| format!("'{}' is not an address: {}", arg, e))?;

    let limit = PROGRAM_START as usize - SPRITE_SHEET.len();
    if address as usize > limit {
        return Err(format!(
            "the font must end before {:#05X}; the highest address is {:#05X}",
            PROGRAM_START, limit
        ));
    }
    Ok(address)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = Rom::locate(&args.rom).and_then(|rom| {
        run(Settings {
            rom,
            config: args.config(),
            mute: args.mute,
        })
    });

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
