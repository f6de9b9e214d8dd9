use breadbox_core::core::bus::InterruptState;
use breadbox_core::core::machine::{InputButton, Machine};
use breadbox_core::core::{Bus, EmuError};
use breadbox_core::cpu::mos6510::Mos6510;
use breadbox_core::cpu::state::Mos6510State;
use breadbox_core::device::cia::Cia6526;
use breadbox_core::device::sid::Sid6581;
use breadbox_core::device::vic::{VideoMemory, VideoStandard, Vic656x};

use crate::pla::{IoDevice, PageOwner, Pla};
use crate::prg::Prg;
use crate::registry::MachineEntry;
use crate::rom_loader::{CHARGEN_SIZE, RomImages};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// The 16 C64 colours as RGB triples, indexed by the 4-bit palette index
/// every framebuffer byte carries.
pub const PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),       // Black
    (255, 255, 255), // White
    (136, 0, 0),     // Red
    (170, 255, 238), // Cyan
    (204, 68, 204),  // Purple
    (0, 204, 85),    // Green
    (0, 0, 170),     // Blue
    (238, 238, 119), // Yellow
    (221, 136, 85),  // Orange
    (102, 68, 0),    // Brown
    (255, 119, 119), // Light Red
    (51, 51, 51),    // Dark Grey
    (119, 119, 119), // Grey
    (170, 255, 102), // Light Green
    (0, 136, 255),   // Light Blue
    (187, 187, 187), // Light Grey
];

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

// Joystick in control port 2 (CIA1 port A, active-low).
pub const INPUT_JOY_UP: u8 = 0;
pub const INPUT_JOY_DOWN: u8 = 1;
pub const INPUT_JOY_LEFT: u8 = 2;
pub const INPUT_JOY_RIGHT: u8 = 3;
pub const INPUT_JOY_FIRE: u8 = 4;

const C64_INPUT_MAP: &[InputButton] = &[
    InputButton { id: INPUT_JOY_UP, name: "Joy Up" },
    InputButton { id: INPUT_JOY_DOWN, name: "Joy Down" },
    InputButton { id: INPUT_JOY_LEFT, name: "Joy Left" },
    InputButton { id: INPUT_JOY_RIGHT, name: "Joy Right" },
    InputButton { id: INPUT_JOY_FIRE, name: "Joy Fire" },
];

// KERNAL keyboard buffer: pending characters at $0277, count at $C6.
const KEY_BUFFER: u16 = 0x0277;
const KEY_COUNT: u16 = 0x00C6;
const KEY_BUFFER_CAPACITY: u8 = 10;

// BASIC zero-page pointers updated after a PRG load.
const BASIC_START_PTR: u16 = 0x002B;
const BASIC_END_PTR: u16 = 0x002D;
const BASIC_VARS_PTR: u16 = 0x0031;

// ---------------------------------------------------------------------------
// Colour RAM
// ---------------------------------------------------------------------------

/// 1 KiB of 4-bit colour memory at $D800-$DBFF. Only the low nibble is
/// wired; the upper bits are dropped on write and read back as zero.
pub struct ColorRam {
    data: [u8; 0x0400],
}

impl ColorRam {
    fn new() -> Self {
        Self { data: [0; 0x0400] }
    }

    fn reset(&mut self) {
        self.data.fill(0);
    }

    pub fn read(&self, index: u16) -> u8 {
        self.data[(index & 0x03FF) as usize]
    }

    pub fn write(&mut self, index: u16, data: u8) {
        self.data[(index & 0x03FF) as usize] = data & 0x0F;
    }
}

// ---------------------------------------------------------------------------
// The bus
// ---------------------------------------------------------------------------

/// Everything behind the CPU: chips, memory, ROMs, and the PLA that
/// arbitrates between them.
pub struct C64Bus {
    pub vic: Vic656x,
    pub cia1: Cia6526,
    pub cia2: Cia6526,
    pub sid: Sid6581,
    pub pla: Pla,

    ram: [u8; 0x10000],
    color_ram: ColorRam,
    roms: RomImages,

    /// Shadow of the last value written to the CPU I/O port at $0001.
    io_port: u8,
}

/// The VIC's 14-bit window: 16 KiB of RAM selected by CIA2 port A, with
/// the character generator ROM overlaid at VIC-relative $1000-$1FFF
/// regardless of the CPU's CHAREN banking.
struct VicView<'a> {
    ram: &'a [u8; 0x10000],
    chargen: &'a [u8; CHARGEN_SIZE],
    color_ram: &'a ColorRam,
    bank: u16,
}

impl VideoMemory for VicView<'_> {
    fn vic_read(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        if (0x1000..0x2000).contains(&addr) {
            self.chargen[(addr - 0x1000) as usize]
        } else {
            self.ram[(self.bank | addr) as usize]
        }
    }

    fn color_read(&self, index: u16) -> u8 {
        self.color_ram.read(index)
    }
}

impl C64Bus {
    fn new(roms: RomImages, standard: VideoStandard) -> Self {
        Self {
            vic: Vic656x::new(standard),
            cia1: Cia6526::new(),
            cia2: Cia6526::new(),
            sid: Sid6581::new(),
            pla: Pla::new(),
            ram: [0; 0x10000],
            color_ram: ColorRam::new(),
            roms,
            io_port: 0x37,
        }
    }

    fn reset(&mut self) {
        self.vic.reset();
        self.cia1.reset();
        self.cia2.reset();
        self.sid.reset();
        self.pla.reset();
        self.ram.fill(0);
        self.color_ram.reset();
        self.io_port = 0x37;
    }

    /// Advance every chip by the cycles the CPU just spent, then render a
    /// finished frame. Any IRQ a chip latches here is picked up by the
    /// CPU's next `check_interrupts` sample. Returns whether a frame was
    /// completed.
    fn tick(&mut self, delta: u32) -> bool {
        self.vic.tick(delta);
        self.cia1.tick(delta);
        self.cia2.tick(delta);
        self.sid.tick(delta);

        if self.vic.take_ready_frame() {
            self.render_frame_to_vic();
            return true;
        }
        false
    }

    fn render_frame_to_vic(&mut self) {
        let view = VicView {
            ram: &self.ram,
            chargen: &self.roms.chargen,
            color_ram: &self.color_ram,
            bank: ((!self.cia2.port_a() & 0x03) as u16) << 14,
        };
        self.vic.draw_frame(&view);
    }

    /// Last value the CPU wrote to its I/O port at $0001.
    pub fn io_port(&self) -> u8 {
        self.io_port
    }

    /// RAM contents regardless of banking — the shadow under a ROM, not
    /// the ROM byte. For tests and debuggers.
    pub fn peek_ram(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    pub fn poke_ram(&mut self, addr: u16, data: u8) {
        self.ram[addr as usize] = data;
    }
}

impl Bus for C64Bus {
    fn read(&mut self, addr: u16) -> u8 {
        match self.pla.read_owner(addr) {
            PageOwner::Ram => self.ram[addr as usize],
            PageOwner::BasicRom => self.roms.basic[(addr - 0xA000) as usize],
            PageOwner::KernalRom => self.roms.kernal[(addr - 0xE000) as usize],
            PageOwner::CharRom => self.roms.chargen[(addr & 0x0FFF) as usize],
            PageOwner::Io => match Pla::io_device(addr) {
                IoDevice::Vic => self.vic.read((addr & 0x3F) as u8),
                IoDevice::Sid => self.sid.read((addr & 0x1F) as u8),
                IoDevice::ColorRam => self.color_ram.read(addr - 0xD800),
                IoDevice::Cia1 => self.cia1.read((addr & 0x0F) as u8),
                IoDevice::Cia2 => self.cia2.read((addr & 0x0F) as u8),
                IoDevice::Expansion => self.ram[addr as usize],
            },
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        // The CPU I/O port: update the shadow register, the PLA bank
        // bits, and the RAM byte in one go so the next access already
        // sees the new banking.
        if addr == 0x0001 {
            self.io_port = data;
            self.pla.set_port(data & 0x07);
            self.ram[0x0001] = data;
            return;
        }

        match self.pla.write_owner(addr) {
            PageOwner::Io => match Pla::io_device(addr) {
                IoDevice::Vic => self.vic.write((addr & 0x3F) as u8, data),
                IoDevice::Sid => self.sid.write((addr & 0x1F) as u8, data),
                IoDevice::ColorRam => self.color_ram.write(addr - 0xD800, data),
                IoDevice::Cia1 => self.cia1.write((addr & 0x0F) as u8, data),
                IoDevice::Cia2 => self.cia2.write((addr & 0x0F) as u8, data),
                IoDevice::Expansion => self.ram[addr as usize] = data,
            },
            // RAM — including the shadow under any ROM-mapped page.
            _ => self.ram[addr as usize] = data,
        }
    }

    fn check_interrupts(&self) -> InterruptState {
        InterruptState {
            irq: self.vic.irq_asserted()
                || self.cia1.irq_asserted()
                || self.cia2.irq_asserted(),
            nmi: false,
        }
    }
}

// ---------------------------------------------------------------------------
// The machine
// ---------------------------------------------------------------------------

/// Commodore 64: a 6510 and its bus, stepped one instruction at a time.
///
/// Within one step the CPU's memory effects complete first; then every
/// chip advances by the instruction's cycle count. Interrupts latched by
/// the chips are sampled by the CPU before its next opcode fetch.
pub struct C64System {
    pub cpu: Mos6510,
    pub bus: C64Bus,

    /// Currently held joystick buttons (bit per button, 1 = pressed).
    joystick: u8,
}

impl C64System {
    pub fn new(roms: RomImages, standard: VideoStandard) -> Self {
        let mut system = Self {
            cpu: Mos6510::new(),
            bus: C64Bus::new(roms, standard),
            joystick: 0,
        };
        system.reset();
        system
    }

    /// Execute one instruction and advance the chips by its cycle count.
    /// Returns whether the VIC completed a frame during this step.
    pub fn step(&mut self) -> Result<bool, EmuError> {
        self.cpu.step(&mut self.bus)?;
        Ok(self.bus.tick(self.cpu.delta_cycles))
    }

    /// Power-on state: chips and memory cleared, default banking, PC
    /// loaded from the reset vector.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.joystick = 0;
        self.cpu.reset(&mut self.bus);
    }

    /// Write a parsed PRG into RAM and point the BASIC program and
    /// variable pointers at it.
    pub fn load_prg(&mut self, prg: &Prg) {
        let start = prg.load_address;
        let end = prg.end_address();
        for (i, &byte) in prg.data.iter().enumerate() {
            self.bus.poke_ram(start + i as u16, byte);
        }

        self.bus.poke_ram(BASIC_START_PTR, start as u8);
        self.bus.poke_ram(BASIC_START_PTR + 1, (start >> 8) as u8);
        self.bus.poke_ram(BASIC_END_PTR, end as u8);
        self.bus.poke_ram(BASIC_END_PTR + 1, (end >> 8) as u8);
        self.bus.poke_ram(BASIC_VARS_PTR, end as u8);
        self.bus.poke_ram(BASIC_VARS_PTR + 1, (end >> 8) as u8);

        log::info!(
            "loaded PRG at ${start:04X}-${end:04X} ({} bytes)",
            prg.data.len()
        );
    }

    pub fn cpu_state(&self) -> Mos6510State {
        self.cpu.snapshot()
    }
}

impl Machine for C64System {
    fn display_size(&self) -> (u32, u32) {
        self.bus.vic.display_size()
    }

    fn run_frame(&mut self) -> Result<(), EmuError> {
        loop {
            if self.step()? {
                return Ok(());
            }
        }
    }

    fn render_frame(&self, buffer: &mut [u8]) {
        for (i, &index) in self.bus.vic.framebuffer().iter().enumerate() {
            let (r, g, b) = PALETTE[(index & 0x0F) as usize];
            let offset = i * 3;
            buffer[offset] = r;
            buffer[offset + 1] = g;
            buffer[offset + 2] = b;
        }
    }

    fn set_input(&mut self, button: u8, pressed: bool) {
        if button > INPUT_JOY_FIRE {
            return;
        }
        if pressed {
            self.joystick |= 1 << button;
        } else {
            self.joystick &= !(1 << button);
        }
        // Joystick 2 pulls CIA1 port A lines low while held.
        self.bus.cia1.set_input_a(!self.joystick);
    }

    fn input_map(&self) -> &[InputButton] {
        C64_INPUT_MAP
    }

    fn load_program(&mut self, origin: u16, data: &[u8]) -> bool {
        if origin as usize + data.len() > 0x10000 {
            return false;
        }
        self.load_prg(&Prg {
            load_address: origin,
            data: data.to_vec(),
        });
        true
    }

    /// Drop a PETSCII character into the KERNAL keyboard buffer, the way
    /// the interrupt-driven matrix scan would.
    fn type_key(&mut self, key: u8) {
        let count = self.bus.peek_ram(KEY_COUNT);
        if count >= KEY_BUFFER_CAPACITY {
            return;
        }
        self.bus.poke_ram(KEY_BUFFER + count as u16, key);
        self.bus.poke_ram(KEY_COUNT, count + 1);
    }

    fn reset(&mut self) {
        C64System::reset(self);
    }
}

// ---------------------------------------------------------------------------
// Registry entries
// ---------------------------------------------------------------------------

fn create_pal(roms: &RomImages) -> Box<dyn Machine> {
    Box::new(C64System::new(roms.clone(), VideoStandard::Pal))
}

fn create_ntsc(roms: &RomImages) -> Box<dyn Machine> {
    Box::new(C64System::new(roms.clone(), VideoStandard::Ntsc))
}

inventory::submit! {
    MachineEntry::new("c64", "Commodore 64 (PAL)", create_pal)
}

inventory::submit! {
    MachineEntry::new("c64-ntsc", "Commodore 64 (NTSC)", create_ntsc)
}
