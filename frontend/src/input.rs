use std::collections::HashMap;

use breadbox_core::core::machine::InputButton;
use sdl2::keyboard::{Keycode, Mod, Scancode};

/// Maps SDL scancodes to machine button IDs.
pub struct KeyMap {
    map: HashMap<Scancode, u8>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a machine button ID.
    pub fn bind(&mut self, scancode: Scancode, button_id: u8) {
        self.map.insert(scancode, button_id);
    }

    /// Look up the machine button ID for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<u8> {
        self.map.get(&scancode).copied()
    }
}

/// Build a default key map for a machine's input buttons. Name-based
/// matching keeps the bindings stable across machine variants.
pub fn default_key_map(buttons: &[InputButton]) -> KeyMap {
    let mut km = KeyMap::new();

    for button in buttons {
        let scancode = match button.name {
            "Joy Up" => Some(Scancode::Up),
            "Joy Down" => Some(Scancode::Down),
            "Joy Left" => Some(Scancode::Left),
            "Joy Right" => Some(Scancode::Right),
            "Joy Fire" => Some(Scancode::LCtrl),
            _ => None,
        };
        if let Some(sc) = scancode {
            km.bind(sc, button.id);
        }
    }

    km
}

/// Translate an SDL key press into the PETSCII byte the machine's
/// keyboard buffer expects. Letters arrive as unshifted PETSCII
/// uppercase, the way the stock character set displays them.
pub fn petscii_for_key(keycode: Keycode, keymod: Mod) -> Option<u8> {
    let shifted = keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD);

    let ch = match keycode {
        Keycode::Return | Keycode::KpEnter => 0x0D,
        Keycode::Backspace | Keycode::Delete => 0x14, // DEL
        Keycode::Home => 0x13,
        Keycode::Space => b' ',

        Keycode::A => b'A',
        Keycode::B => b'B',
        Keycode::C => b'C',
        Keycode::D => b'D',
        Keycode::E => b'E',
        Keycode::F => b'F',
        Keycode::G => b'G',
        Keycode::H => b'H',
        Keycode::I => b'I',
        Keycode::J => b'J',
        Keycode::K => b'K',
        Keycode::L => b'L',
        Keycode::M => b'M',
        Keycode::N => b'N',
        Keycode::O => b'O',
        Keycode::P => b'P',
        Keycode::Q => b'Q',
        Keycode::R => b'R',
        Keycode::S => b'S',
        Keycode::T => b'T',
        Keycode::U => b'U',
        Keycode::V => b'V',
        Keycode::W => b'W',
        Keycode::X => b'X',
        Keycode::Y => b'Y',
        Keycode::Z => b'Z',

        Keycode::Num0 => {
            if shifted {
                b')'
            } else {
                b'0'
            }
        }
        Keycode::Num1 => {
            if shifted {
                b'!'
            } else {
                b'1'
            }
        }
        Keycode::Num2 => {
            if shifted {
                b'@'
            } else {
                b'2'
            }
        }
        Keycode::Num3 => {
            if shifted {
                b'#'
            } else {
                b'3'
            }
        }
        Keycode::Num4 => {
            if shifted {
                b'$'
            } else {
                b'4'
            }
        }
        Keycode::Num5 => {
            if shifted {
                b'%'
            } else {
                b'5'
            }
        }
        Keycode::Num6 => {
            if shifted {
                b'^'
            } else {
                b'6'
            }
        }
        Keycode::Num7 => {
            if shifted {
                b'&'
            } else {
                b'7'
            }
        }
        Keycode::Num8 => {
            if shifted {
                b'*'
            } else {
                b'8'
            }
        }
        Keycode::Num9 => {
            if shifted {
                b'('
            } else {
                b'9'
            }
        }

        Keycode::Minus => b'-',
        Keycode::Equals => {
            if shifted {
                b'+'
            } else {
                b'='
            }
        }
        Keycode::Comma => b',',
        Keycode::Period => b'.',
        Keycode::Slash => {
            if shifted {
                b'?'
            } else {
                b'/'
            }
        }
        Keycode::Semicolon => {
            if shifted {
                b':'
            } else {
                b';'
            }
        }
        Keycode::Quote => {
            if shifted {
                b'"'
            } else {
                b'\''
            }
        }

        _ => return None,
    };
    Some(ch)
}
