use super::{Mos6510, StatusFlag};
use crate::core::{Bus, EmuError};

impl Mos6510 {
    // ---- Stack instructions ----

    /// PHA (0x48) - 3 cycles. Push A to stack.
    pub(crate) fn op_pha<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.push(bus, self.a);
        self.delta_cycles += 3;
    }

    /// PLA (0x68) - 4 cycles. Pull A from stack. Sets N, Z.
    pub(crate) fn op_pla<B: Bus + ?Sized>(&mut self, bus: &mut B) -> Result<(), EmuError> {
        self.a = self.pull(bus)?;
        self.set_nz(self.a);
        self.delta_cycles += 4;
        Ok(())
    }

    /// PHP (0x08) - 3 cycles. Push P with B=1 and U=1 to stack.
    pub(crate) fn op_php<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let pushed = self.p | StatusFlag::B as u8 | StatusFlag::U as u8;
        self.push(bus, pushed);
        self.delta_cycles += 3;
    }

    /// PLP (0x28) - 4 cycles. Pull P from stack. B is always clear, U is always set.
    pub(crate) fn op_plp<B: Bus + ?Sized>(&mut self, bus: &mut B) -> Result<(), EmuError> {
        let pulled = self.pull(bus)?;
        self.p = (pulled | StatusFlag::U as u8) & !(StatusFlag::B as u8);
        self.delta_cycles += 4;
        Ok(())
    }

    // ---- BRK ----

    /// BRK (0x00) - 7 cycles. Software interrupt.
    ///
    /// 2-byte instruction: the padding byte after the opcode is skipped,
    /// so the pushed return address points past it. Sets I, pushes P with
    /// B=1 and U=1 (I already set in the pushed copy), vectors through
    /// $FFFE/$FFFF.
    pub(crate) fn op_brk<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.pc = self.pc.wrapping_add(1);
        self.set_flag(StatusFlag::I, true);
        self.interrupt_sequence(bus, 0xFFFE, true);
    }
}
