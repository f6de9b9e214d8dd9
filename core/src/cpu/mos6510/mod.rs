mod alu;
mod binary;
mod branch;
mod load_store;
mod shift;
mod stack;
mod unary;

use crate::core::{Bus, EmuError, bus::InterruptState};
use crate::cpu::state::Mos6510State;

#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum StatusFlag {
    C = 0x01, // Carry
    Z = 0x02, // Zero
    I = 0x04, // Interrupt Disable
    D = 0x08, // Decimal
    B = 0x10, // Break
    U = 0x20, // Unused (always 1)
    V = 0x40, // Overflow
    N = 0x80, // Negative
}

/// MOS 6510, the C64's CPU: a 6502 core plus the on-chip I/O port that
/// drives memory banking (the port itself lives behind the bus at
/// $0000/$0001; the CPU sees it as ordinary memory).
///
/// `step()` executes one whole instruction and publishes its cost in
/// `delta_cycles`, including page-crossing and branch-taken penalties.
/// Interrupt lines are sampled at the top of each step, never
/// mid-instruction.
pub struct Mos6510 {
    // Registers
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub pc: u16,
    pub sp: u8,
    pub p: u8,

    /// Total cycles since reset.
    pub cycles: u64,
    /// Cycles consumed by the last `step()`; what the chips advance by.
    pub delta_cycles: u32,

    /// Previous NMI line state for edge detection.
    nmi_previous: bool,
}

impl Default for Mos6510 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos6510 {
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0xFF,
            p: 0x34, // I=1, B=1, U=1
            cycles: 0,
            delta_cycles: 0,
            nmi_previous: false,
        }
    }

    /// Power-on / reset: registers to their documented state, default
    /// memory banking ($37 → $0001), PC from the reset vector at $FFFC.
    pub fn reset<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFF;
        self.p = 0x34;
        self.cycles = 0;
        self.delta_cycles = 0;
        self.nmi_previous = false;
        bus.write(0x0001, 0x37);
        self.pc = self.read_word(bus, 0xFFFC);
    }

    #[inline]
    pub(crate) fn set_flag(&mut self, flag: StatusFlag, set: bool) {
        if set {
            self.p |= flag as u8;
        } else {
            self.p &= !(flag as u8);
        }
    }

    #[inline]
    pub(crate) fn flag(&self, flag: StatusFlag) -> bool {
        self.p & (flag as u8) != 0
    }

    pub fn snapshot(&self) -> Mos6510State {
        Mos6510State {
            a: self.a,
            x: self.x,
            y: self.y,
            pc: self.pc,
            sp: self.sp,
            p: self.p,
            cycles: self.cycles,
        }
    }

    /// Execute one instruction (or take a pending interrupt) and account
    /// its cycles. Returns a fatal fault for opcodes outside the
    /// documented set and for stack underflows.
    pub fn step<B: Bus + ?Sized>(&mut self, bus: &mut B) -> Result<(), EmuError> {
        self.delta_cycles = 0;

        if self.handle_interrupts(bus) {
            self.cycles += self.delta_cycles as u64;
            return Ok(());
        }

        let pc = self.pc;
        let opcode = self.fetch_byte(bus);
        self.dispatch(opcode, pc, bus)?;

        self.cycles += self.delta_cycles as u64;
        Ok(())
    }

    fn dispatch<B: Bus + ?Sized>(
        &mut self,
        opcode: u8,
        pc: u16,
        bus: &mut B,
    ) -> Result<(), EmuError> {
        match opcode {
            // --- LDA ---
            0xA9 => self.op_lda_imm(bus),
            0xA5 => self.op_lda_zp(bus),
            0xB5 => self.op_lda_zp_x(bus),
            0xAD => self.op_lda_abs(bus),
            0xBD => self.op_lda_abs_x(bus),
            0xB9 => self.op_lda_abs_y(bus),
            0xA1 => self.op_lda_ind_x(bus),
            0xB1 => self.op_lda_ind_y(bus),

            // --- LDX ---
            0xA2 => self.op_ldx_imm(bus),
            0xA6 => self.op_ldx_zp(bus),
            0xB6 => self.op_ldx_zp_y(bus),
            0xAE => self.op_ldx_abs(bus),
            0xBE => self.op_ldx_abs_y(bus),

            // --- LDY ---
            0xA0 => self.op_ldy_imm(bus),
            0xA4 => self.op_ldy_zp(bus),
            0xB4 => self.op_ldy_zp_x(bus),
            0xAC => self.op_ldy_abs(bus),
            0xBC => self.op_ldy_abs_x(bus),

            // --- STA ---
            0x85 => self.op_sta_zp(bus),
            0x95 => self.op_sta_zp_x(bus),
            0x8D => self.op_sta_abs(bus),
            0x9D => self.op_sta_abs_x(bus),
            0x99 => self.op_sta_abs_y(bus),
            0x81 => self.op_sta_ind_x(bus),
            0x91 => self.op_sta_ind_y(bus),

            // --- STX ---
            0x86 => self.op_stx_zp(bus),
            0x96 => self.op_stx_zp_y(bus),
            0x8E => self.op_stx_abs(bus),

            // --- STY ---
            0x84 => self.op_sty_zp(bus),
            0x94 => self.op_sty_zp_x(bus),
            0x8C => self.op_sty_abs(bus),

            // --- ADC ---
            0x69 => self.op_adc_imm(bus),
            0x65 => self.op_adc_zp(bus),
            0x75 => self.op_adc_zp_x(bus),
            0x6D => self.op_adc_abs(bus),
            0x7D => self.op_adc_abs_x(bus),
            0x79 => self.op_adc_abs_y(bus),
            0x61 => self.op_adc_ind_x(bus),
            0x71 => self.op_adc_ind_y(bus),

            // --- SBC ---
            0xE9 => self.op_sbc_imm(bus),
            0xE5 => self.op_sbc_zp(bus),
            0xF5 => self.op_sbc_zp_x(bus),
            0xED => self.op_sbc_abs(bus),
            0xFD => self.op_sbc_abs_x(bus),
            0xF9 => self.op_sbc_abs_y(bus),
            0xE1 => self.op_sbc_ind_x(bus),
            0xF1 => self.op_sbc_ind_y(bus),

            // --- CMP ---
            0xC9 => self.op_cmp_imm(bus),
            0xC5 => self.op_cmp_zp(bus),
            0xD5 => self.op_cmp_zp_x(bus),
            0xCD => self.op_cmp_abs(bus),
            0xDD => self.op_cmp_abs_x(bus),
            0xD9 => self.op_cmp_abs_y(bus),
            0xC1 => self.op_cmp_ind_x(bus),
            0xD1 => self.op_cmp_ind_y(bus),

            // --- AND ---
            0x29 => self.op_and_imm(bus),
            0x25 => self.op_and_zp(bus),
            0x35 => self.op_and_zp_x(bus),
            0x2D => self.op_and_abs(bus),
            0x3D => self.op_and_abs_x(bus),
            0x39 => self.op_and_abs_y(bus),
            0x21 => self.op_and_ind_x(bus),
            0x31 => self.op_and_ind_y(bus),

            // --- ORA ---
            0x09 => self.op_ora_imm(bus),
            0x05 => self.op_ora_zp(bus),
            0x15 => self.op_ora_zp_x(bus),
            0x0D => self.op_ora_abs(bus),
            0x1D => self.op_ora_abs_x(bus),
            0x19 => self.op_ora_abs_y(bus),
            0x01 => self.op_ora_ind_x(bus),
            0x11 => self.op_ora_ind_y(bus),

            // --- EOR ---
            0x49 => self.op_eor_imm(bus),
            0x45 => self.op_eor_zp(bus),
            0x55 => self.op_eor_zp_x(bus),
            0x4D => self.op_eor_abs(bus),
            0x5D => self.op_eor_abs_x(bus),
            0x59 => self.op_eor_abs_y(bus),
            0x41 => self.op_eor_ind_x(bus),
            0x51 => self.op_eor_ind_y(bus),

            // --- BIT ---
            0x24 => self.op_bit_zp(bus),
            0x2C => self.op_bit_abs(bus),

            // --- CPX ---
            0xE0 => self.op_cpx_imm(bus),
            0xE4 => self.op_cpx_zp(bus),
            0xEC => self.op_cpx_abs(bus),

            // --- CPY ---
            0xC0 => self.op_cpy_imm(bus),
            0xC4 => self.op_cpy_zp(bus),
            0xCC => self.op_cpy_abs(bus),

            // --- ASL ---
            0x0A => {
                // ASL Accumulator - 2 cycles
                self.a = self.perform_asl(self.a);
                self.delta_cycles += 2;
            }
            0x06 => self.op_asl_zp(bus),
            0x16 => self.op_asl_zp_x(bus),
            0x0E => self.op_asl_abs(bus),
            0x1E => self.op_asl_abs_x(bus),

            // --- LSR ---
            0x4A => {
                // LSR Accumulator - 2 cycles
                self.a = self.perform_lsr(self.a);
                self.delta_cycles += 2;
            }
            0x46 => self.op_lsr_zp(bus),
            0x56 => self.op_lsr_zp_x(bus),
            0x4E => self.op_lsr_abs(bus),
            0x5E => self.op_lsr_abs_x(bus),

            // --- ROL ---
            0x2A => {
                // ROL Accumulator - 2 cycles
                self.a = self.perform_rol(self.a);
                self.delta_cycles += 2;
            }
            0x26 => self.op_rol_zp(bus),
            0x36 => self.op_rol_zp_x(bus),
            0x2E => self.op_rol_abs(bus),
            0x3E => self.op_rol_abs_x(bus),

            // --- ROR ---
            0x6A => {
                // ROR Accumulator - 2 cycles
                self.a = self.perform_ror(self.a);
                self.delta_cycles += 2;
            }
            0x66 => self.op_ror_zp(bus),
            0x76 => self.op_ror_zp_x(bus),
            0x6E => self.op_ror_abs(bus),
            0x7E => self.op_ror_abs_x(bus),

            // --- INC ---
            0xE6 => self.op_inc_zp(bus),
            0xF6 => self.op_inc_zp_x(bus),
            0xEE => self.op_inc_abs(bus),
            0xFE => self.op_inc_abs_x(bus),

            // --- DEC ---
            0xC6 => self.op_dec_zp(bus),
            0xD6 => self.op_dec_zp_x(bus),
            0xCE => self.op_dec_abs(bus),
            0xDE => self.op_dec_abs_x(bus),

            // --- Flag instructions (all 2-cycle implied) ---
            0x18 => self.op_implied(|cpu| cpu.set_flag(StatusFlag::C, false)), // CLC
            0x38 => self.op_implied(|cpu| cpu.set_flag(StatusFlag::C, true)), // SEC
            0x58 => self.op_implied(|cpu| cpu.set_flag(StatusFlag::I, false)), // CLI
            0x78 => self.op_implied(|cpu| cpu.set_flag(StatusFlag::I, true)), // SEI
            0xB8 => self.op_implied(|cpu| cpu.set_flag(StatusFlag::V, false)), // CLV
            0xD8 => self.op_implied(|cpu| cpu.set_flag(StatusFlag::D, false)), // CLD
            0xF8 => self.op_implied(|cpu| cpu.set_flag(StatusFlag::D, true)), // SED

            // --- Transfer instructions (all 2-cycle implied) ---
            0xAA => self.op_implied(|cpu| {
                // TAX - Transfer A to X. Sets N, Z.
                cpu.x = cpu.a;
                cpu.set_nz(cpu.x);
            }),
            0xA8 => self.op_implied(|cpu| {
                // TAY - Transfer A to Y. Sets N, Z.
                cpu.y = cpu.a;
                cpu.set_nz(cpu.y);
            }),
            0x8A => self.op_implied(|cpu| {
                // TXA - Transfer X to A. Sets N, Z.
                cpu.a = cpu.x;
                cpu.set_nz(cpu.a);
            }),
            0x98 => self.op_implied(|cpu| {
                // TYA - Transfer Y to A. Sets N, Z.
                cpu.a = cpu.y;
                cpu.set_nz(cpu.a);
            }),
            0xBA => self.op_implied(|cpu| {
                // TSX - Transfer SP to X. Sets N, Z.
                cpu.x = cpu.sp;
                cpu.set_nz(cpu.x);
            }),
            0x9A => self.op_implied(|cpu| {
                // TXS - Transfer X to SP. Does NOT set flags.
                cpu.sp = cpu.x;
            }),

            // --- Register increment/decrement (all 2-cycle implied) ---
            0xE8 => self.op_implied(|cpu| {
                // INX - Increment X. Sets N, Z.
                cpu.x = cpu.x.wrapping_add(1);
                cpu.set_nz(cpu.x);
            }),
            0xC8 => self.op_implied(|cpu| {
                // INY - Increment Y. Sets N, Z.
                cpu.y = cpu.y.wrapping_add(1);
                cpu.set_nz(cpu.y);
            }),
            0xCA => self.op_implied(|cpu| {
                // DEX - Decrement X. Sets N, Z.
                cpu.x = cpu.x.wrapping_sub(1);
                cpu.set_nz(cpu.x);
            }),
            0x88 => self.op_implied(|cpu| {
                // DEY - Decrement Y. Sets N, Z.
                cpu.y = cpu.y.wrapping_sub(1);
                cpu.set_nz(cpu.y);
            }),

            // --- NOP (2-cycle implied) ---
            0xEA => self.op_implied(|_| {}),

            // --- Branches ---
            0x10 => self.op_bpl(bus),
            0x30 => self.op_bmi(bus),
            0x50 => self.op_bvc(bus),
            0x70 => self.op_bvs(bus),
            0x90 => self.op_bcc(bus),
            0xB0 => self.op_bcs(bus),
            0xD0 => self.op_bne(bus),
            0xF0 => self.op_beq(bus),

            // --- Jumps ---
            0x4C => self.op_jmp_abs(bus),
            0x6C => self.op_jmp_ind(bus),
            0x20 => self.op_jsr(bus),
            0x60 => self.op_rts(bus)?,
            0x40 => self.op_rti(bus)?,

            // --- Stack ---
            0x48 => self.op_pha(bus),
            0x68 => self.op_pla(bus)?,
            0x08 => self.op_php(bus),
            0x28 => self.op_plp(bus)?,

            // --- BRK ---
            0x00 => self.op_brk(bus),

            // Undocumented opcode — fail cleanly
            _ => return Err(EmuError::InvalidOpcode { pc, opcode }),
        }
        Ok(())
    }

    /// Shared shape of the 2-cycle implied instructions.
    #[inline]
    fn op_implied<F: FnOnce(&mut Self)>(&mut self, operation: F) {
        operation(self);
        self.delta_cycles += 2;
    }

    // ---- Interrupts ----

    /// Sample the interrupt lines before the fetch. Returns true when an
    /// interrupt sequence consumed this step.
    fn handle_interrupts<B: Bus + ?Sized>(&mut self, bus: &mut B) -> bool {
        let ints: InterruptState = bus.check_interrupts();

        // NMI is edge-triggered: detect rising edge
        let nmi_edge = ints.nmi && !self.nmi_previous;
        self.nmi_previous = ints.nmi;

        if nmi_edge {
            self.nmi(bus);
            return true;
        }

        // IRQ is level-triggered, masked by I flag
        if ints.irq && !self.flag(StatusFlag::I) {
            self.irq(bus);
            return true;
        }

        false
    }

    /// Hardware IRQ entry: push PC and P (with B=0), set I, vector through
    /// $FFFE. Ignored while the I flag is set. 7 cycles.
    pub fn irq<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        if self.flag(StatusFlag::I) {
            return;
        }
        self.interrupt_sequence(bus, 0xFFFE, false);
    }

    /// NMI entry: unconditional, vector through $FFFA. 7 cycles.
    pub fn nmi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.interrupt_sequence(bus, 0xFFFA, false);
    }

    /// Common push-and-vector sequence for IRQ, NMI, and BRK. The stored
    /// status always has U=1; B is set only for BRK.
    pub(crate) fn interrupt_sequence<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        vector: u16,
        from_brk: bool,
    ) {
        self.push(bus, (self.pc >> 8) as u8);
        self.push(bus, self.pc as u8);
        let mut pushed = self.p | StatusFlag::U as u8;
        if from_brk {
            pushed |= StatusFlag::B as u8;
        } else {
            pushed &= !(StatusFlag::B as u8);
        }
        self.push(bus, pushed);
        self.set_flag(StatusFlag::I, true);
        self.pc = self.read_word(bus, vector);
        self.delta_cycles += 7;
    }
}
