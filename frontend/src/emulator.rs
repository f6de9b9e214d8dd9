use breadbox_core::core::EmuError;
use breadbox_core::core::machine::Machine;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use crate::input::{self, KeyMap};
use crate::video::Video;

/// Main emulation loop: translate SDL events into machine input, run one
/// frame, present it. Returns when the window closes or the machine hits
/// a fatal fault.
pub fn run(machine: &mut dyn Machine, key_map: &KeyMap, scale: u32) -> Result<(), EmuError> {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");

    let (width, height) = machine.display_size();
    let mut video = Video::new(&sdl_video, "breadbox", width, height, scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");

    let buffer_size = (width * height * 3) as usize;
    let mut framebuffer = vec![0u8; buffer_size];

    'main: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'main,

                Event::KeyDown {
                    scancode: Some(sc),
                    keycode,
                    keymod,
                    repeat: false,
                    ..
                } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, true);
                    } else if let Some(key) = keycode.and_then(|kc| {
                        input::petscii_for_key(kc, keymod)
                    }) {
                        machine.type_key(key);
                    }
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, false);
                    }
                }

                _ => {}
            }
        }

        // One frame of emulation; a CPU fault ends the session.
        machine.run_frame()?;

        machine.render_frame(&mut framebuffer);
        video.present(&framebuffer);

        // Frame pacing comes from VSync (present_vsync in Video::new).
    }

    Ok(())
}
