/// Address bus seen by the CPU: one byte-wide read/write port plus the
/// interrupt request lines.
///
/// The machine that implements this owns every chip behind the bus; the
/// CPU only borrows it for the duration of one instruction. Interrupts
/// raised by a chip during its tick are latched in chip state and become
/// visible through `check_interrupts` — the CPU samples the lines once
/// per instruction, before the opcode fetch, never mid-instruction.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    /// Current state of the IRQ/NMI lines. IRQ is level-sensitive; NMI is
    /// edge-sensitive (the CPU keeps the previous line state for edge
    /// detection).
    fn check_interrupts(&self) -> InterruptState;
}

#[derive(Default, Clone, Copy, Debug)]
pub struct InterruptState {
    pub irq: bool,
    pub nmi: bool,
}
