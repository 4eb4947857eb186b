use std::time::{Duration, Instant};

use teal8_core::constants::VBLANK_INTERVAL;
use teal8_core::{Chip8, Chip8Error, Config, Dialect, Flow, Resolution, Tone};

fn boot(config: Config, program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::new(config).unwrap();
    chip8.load_rom(&mut &program[..]).unwrap();
    chip8
}

/// Steps until the machine waits, powers off or `limit` instructions have run.
fn run_until_blocked(chip8: &mut Chip8, now: Instant, limit: usize) -> Flow {
    for _ in 0..limit {
        match chip8.step(now).unwrap() {
            Flow::Continue => continue,
            flow => return flow,
        }
    }
    Flow::Continue
}

fn lit(chip8: &Chip8) -> usize {
    chip8
        .frame_buffer()
        .rows()
        .flatten()
        .filter(|&&pixel| pixel)
        .count()
}

#[test]
fn test_load_index_program() {
    let mut chip8 = boot(Config::default(), &[0xA2, 0x2A]);
    assert_eq!(chip8.fetch().unwrap(), 0xA22A);
    chip8.step(Instant::now()).unwrap();
    assert_eq!(chip8.state().i, 0x22A);
    assert_eq!(chip8.state().pc, 0x202);
}

#[test]
fn test_subroutine_round_trip() {
    let program = [
        0x22, 0x06, // 200: call 206
        0x61, 0x02, // 202: v1 = 2
        0x00, 0xFD, // 204: exit
        0x60, 0x01, // 206: v0 = 1
        0x00, 0xEE, // 208: return
    ];
    let mut chip8 = boot(Config::default(), &program);
    assert_eq!(run_until_blocked(&mut chip8, Instant::now(), 10), Flow::PowerOff);
    assert_eq!(chip8.state().v[0x0], 1);
    assert_eq!(chip8.state().v[0x1], 2);
    assert!(chip8.state().stack.is_empty());
    assert!(!chip8.is_powered_on());
}

#[test]
fn test_runaway_recursion_overflows_stack() {
    // 200: call 200
    let mut chip8 = boot(Config::default(), &[0x22, 0x00]);
    for _ in 0..16 {
        chip8.step(Instant::now()).unwrap();
    }
    assert!(matches!(
        chip8.step(Instant::now()),
        Err(Chip8Error::StackOverflow)
    ));
}

#[test]
fn test_counting_loop() {
    let program = [
        0x60, 0x00, // 200: v0 = 0
        0x70, 0x01, // 202: v0 += 1
        0x30, 0x0A, // 204: skip if v0 == 10
        0x12, 0x02, // 206: jump 202
        0x00, 0xFD, // 208: exit
    ];
    let mut chip8 = boot(Config::default(), &program);
    assert_eq!(run_until_blocked(&mut chip8, Instant::now(), 100), Flow::PowerOff);
    assert_eq!(chip8.state().v[0x0], 10);
}

#[test]
fn test_draws_digit_and_erases_it() {
    let program = [
        0x60, 0x07, // v0 = 7
        0xF0, 0x29, // i = glyph(v0)
        0xD1, 0x15, // draw 5 rows at (v1, v1)
        0x3F, 0x00, // skip if vF == 0
        0x00, 0xFD, // exit
        0xD1, 0x15, // draw again
        0x00, 0xFD, // exit
    ];
    let config = Config {
        vblank_wait: false,
        ..Config::default()
    };
    let mut chip8 = boot(config, &program);
    chip8.frame_presented();
    for _ in 0..4 {
        chip8.step(Instant::now()).unwrap();
    }
    // 7 is 0xF0 0x10 0x20 0x40 0x40
    assert_eq!(lit(&chip8), 8);
    assert!(chip8.get_frame().is_some());

    assert_eq!(run_until_blocked(&mut chip8, Instant::now(), 10), Flow::PowerOff);
    assert_eq!(lit(&chip8), 0);
    assert_eq!(chip8.state().v[0xF], 1);
}

#[test]
fn test_vblank_holds_second_draw() {
    let program = [
        0xD0, 0x01, // draw
        0xD0, 0x01, // draw
        0x00, 0xFD, // exit
    ];
    let mut chip8 = boot(Config::default(), &program);
    let start = Instant::now();
    assert_eq!(chip8.step(start).unwrap(), Flow::Continue);
    assert_eq!(chip8.step(start + Duration::from_millis(1)).unwrap(), Flow::Waiting);
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.step(start + VBLANK_INTERVAL).unwrap(), Flow::Continue);
    assert_eq!(chip8.state().pc, 0x204);
}

#[test]
fn test_key_wait_blocks_until_release() {
    let program = [
        0xF3, 0x0A, // v3 = key
        0x00, 0xFD, // exit
    ];
    let mut chip8 = boot(Config::default(), &program);
    let now = Instant::now();

    chip8.key_press(0x7);
    assert_eq!(run_until_blocked(&mut chip8, now, 10), Flow::Waiting);
    chip8.clear_released_keys();
    assert_eq!(run_until_blocked(&mut chip8, now, 10), Flow::Waiting);

    chip8.key_release(0x7);
    assert_eq!(run_until_blocked(&mut chip8, now, 10), Flow::PowerOff);
    assert_eq!(chip8.state().v[0x3], 0x7);
}

#[test]
fn test_sound_timer_drives_tone() {
    let program = [
        0x60, 0x03, // v0 = 3
        0xF0, 0x18, // sound = v0
        0xF0, 0x15, // delay = v0
    ];
    let mut chip8 = boot(Config::default(), &program);
    for _ in 0..3 {
        chip8.step(Instant::now()).unwrap();
    }
    let tones: Vec<Option<Tone>> = (0..5).map(|_| chip8.tick_timers()).collect();
    assert_eq!(
        tones,
        vec![Some(Tone::On), None, None, Some(Tone::Off), None]
    );
    assert_eq!(chip8.timers().delay, 0);
}

#[test]
fn test_schip_high_resolution_sprite() {
    let mut program = vec![
        0x00, 0xFF, // high resolution
        0xA2, 0x08, // i = 208
        0xD0, 0x00, // draw 16x16
        0x00, 0xFD, // exit
    ];
    program.extend_from_slice(&[0xFF; 32]);
    let mut chip8 = boot(Config::default(), &program);
    assert_eq!(run_until_blocked(&mut chip8, Instant::now(), 10), Flow::PowerOff);
    assert_eq!(chip8.state().dialect, Dialect::Schip);
    assert_eq!(chip8.frame_buffer().resolution(), Resolution::High);
    assert_eq!(lit(&chip8), 256);
}

#[test]
fn test_store_and_load_registers() {
    let program = [
        0x60, 0x11, // v0 = 11
        0x61, 0x22, // v1 = 22
        0x62, 0x33, // v2 = 33
        0xA3, 0x00, // i = 300
        0xF2, 0x55, // store v0..=v2
        0x60, 0x00, // v0 = 0
        0x61, 0x00, // v1 = 0
        0x62, 0x00, // v2 = 0
        0xA3, 0x00, // i = 300
        0xF2, 0x65, // load v0..=v2
        0x00, 0xFD, // exit
    ];
    let mut chip8 = boot(Config::default(), &program);
    assert_eq!(run_until_blocked(&mut chip8, Instant::now(), 20), Flow::PowerOff);
    assert_eq!(chip8.state().v[..3], [0x11, 0x22, 0x33]);
    assert_eq!(chip8.state().i, 0x303);
}

#[test]
fn test_bcd_of_register() {
    let program = [
        0x60, 0xFE, // v0 = 254
        0xA3, 0x00, // i = 300
        0xF0, 0x33, // bcd v0
        0xF2, 0x65, // load v0..=v2
    ];
    let mut chip8 = boot(Config::default(), &program);
    for _ in 0..4 {
        chip8.step(Instant::now()).unwrap();
    }
    assert_eq!(chip8.state().v[..3], [2, 5, 4]);
}

#[test]
fn test_reset_restores_power_on_state() {
    let program = [
        0x6A, 0x42, // va = 42
        0xA5, 0x00, // i = 500
        0x22, 0x08, // call 208
        0x00, 0x00, // unreachable
        0x00, 0xFD, // 208: exit
    ];
    let mut chip8 = boot(Config::default(), &program);
    assert_eq!(run_until_blocked(&mut chip8, Instant::now(), 10), Flow::PowerOff);

    chip8.reset().unwrap();
    let state = chip8.state();
    assert_eq!(state.pc, 0x200);
    assert_eq!(state.i, 0);
    assert_eq!(state.v, [0; 16]);
    assert_eq!(state.stack.depth(), 0);
    assert!(chip8.is_powered_on());
}

#[test]
fn test_running_off_the_end_of_memory() {
    // 200: jump FFE; memory at FFE holds 0000, an unknown opcode
    let mut chip8 = boot(Config::default(), &[0x1F, 0xFE]);
    chip8.step(Instant::now()).unwrap();
    assert_eq!(chip8.step(Instant::now()).unwrap(), Flow::Continue);
    assert!(matches!(
        chip8.step(Instant::now()),
        Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
    ));
}
