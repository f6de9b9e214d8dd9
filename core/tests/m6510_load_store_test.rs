use breadbox_core::cpu::mos6510::{Mos6510, StatusFlag};
mod common;
use common::TestBus;

/// Helper: execute one instruction, panicking on a fault.
fn step(cpu: &mut Mos6510, bus: &mut TestBus) {
    cpu.step(bus).expect("unexpected CPU fault");
}

#[test]
fn test_lda_immediate() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    // LDA #$42
    bus.load(0, &[0xA9, 0x42]);

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x42);
    assert_eq!(cpu.pc, 2);
    assert_eq!(cpu.delta_cycles, 2);
    assert_eq!(cpu.p & (StatusFlag::Z as u8), 0);
    assert_eq!(cpu.p & (StatusFlag::N as u8), 0);
}

#[test]
fn test_lda_immediate_flags_for_every_value() {
    // For every byte v: Z = (v == 0), N = (v >= 128), A = v, and the
    // other flags are untouched.
    for v in 0..=255u8 {
        let mut cpu = Mos6510::new();
        let mut bus = TestBus::new();
        let p_before = cpu.p;
        bus.load(0, &[0xA9, v]);

        step(&mut cpu, &mut bus);

        assert_eq!(cpu.a, v);
        assert_eq!(cpu.p & (StatusFlag::Z as u8) != 0, v == 0, "Z for {v}");
        assert_eq!(cpu.p & (StatusFlag::N as u8) != 0, v >= 128, "N for {v}");
        let others = !(StatusFlag::Z as u8 | StatusFlag::N as u8);
        assert_eq!(cpu.p & others, p_before & others, "other flags for {v}");
    }
}

#[test]
fn test_lda_zero_page() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    bus.memory[0x0042] = 0x99;
    bus.load(0, &[0xA5, 0x42]); // LDA $42

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x99);
    assert_eq!(cpu.delta_cycles, 3);
    assert_ne!(cpu.p & (StatusFlag::N as u8), 0);
}

#[test]
fn test_lda_zero_page_x_wraps_in_page() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.x = 0x10;
    bus.memory[0x000F] = 0x55; // $FF + $10 wraps to $0F
    bus.load(0, &[0xB5, 0xFF]); // LDA $FF,X

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x55);
    assert_eq!(cpu.delta_cycles, 4);
}

#[test]
fn test_lda_absolute() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    bus.memory[0x1234] = 0x77;
    bus.load(0, &[0xAD, 0x34, 0x12]); // LDA $1234

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x77);
    assert_eq!(cpu.delta_cycles, 4);
}

#[test]
fn test_lda_absolute_x_no_page_cross() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.x = 0x01;
    bus.memory[0x1235] = 0x11;
    bus.load(0, &[0xBD, 0x34, 0x12]); // LDA $1234,X

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x11);
    assert_eq!(cpu.delta_cycles, 4);
}

#[test]
fn test_lda_absolute_x_page_cross_costs_a_cycle() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.x = 0x01;
    bus.memory[0x1300] = 0x22;
    bus.load(0, &[0xBD, 0xFF, 0x12]); // LDA $12FF,X -> $1300

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x22);
    assert_eq!(cpu.delta_cycles, 5);
}

#[test]
fn test_lda_absolute_y_page_cross_costs_a_cycle() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.y = 0xFF;
    bus.memory[0x12FE] = 0x33;
    bus.load(0, &[0xB9, 0xFF, 0x11]); // LDA $11FF,Y -> $12FE

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x33);
    assert_eq!(cpu.delta_cycles, 5);
}

#[test]
fn test_lda_indirect_x() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.x = 0x04;
    bus.memory[0x0024] = 0x74; // pointer at $20+$04
    bus.memory[0x0025] = 0x20;
    bus.memory[0x2074] = 0xAB;
    bus.load(0, &[0xA1, 0x20]); // LDA ($20,X)

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0xAB);
    assert_eq!(cpu.delta_cycles, 6);
}

#[test]
fn test_lda_indirect_x_pointer_wraps_in_zero_page() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.x = 0x01;
    bus.memory[0x00FF] = 0x00; // pointer low at ($FE+$01)
    bus.memory[0x0000] = 0x30; // pointer high wraps to $00
    bus.memory[0x3000] = 0xCD;
    bus.load(1, &[0xA1, 0xFE]); // LDA ($FE,X) at PC=1
    cpu.pc = 1;

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0xCD);
}

#[test]
fn test_lda_indirect_y() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.y = 0x10;
    bus.memory[0x0086] = 0x28;
    bus.memory[0x0087] = 0x40;
    bus.memory[0x4038] = 0xEF; // $4028 + $10
    bus.load(0, &[0xB1, 0x86]); // LDA ($86),Y

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0xEF);
    assert_eq!(cpu.delta_cycles, 5);
}

#[test]
fn test_lda_indirect_y_page_cross_costs_a_cycle() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.y = 0x10;
    bus.memory[0x0086] = 0xF8;
    bus.memory[0x0087] = 0x40;
    bus.memory[0x4108] = 0x5A; // $40F8 + $10 crosses into $41xx
    bus.load(0, &[0xB1, 0x86]);

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x5A);
    assert_eq!(cpu.delta_cycles, 6);
}

#[test]
fn test_ldx_zero_page_y() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.y = 0x03;
    bus.memory[0x0043] = 0x21;
    bus.load(0, &[0xB6, 0x40]); // LDX $40,Y

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.x, 0x21);
    assert_eq!(cpu.delta_cycles, 4);
}

#[test]
fn test_ldx_absolute_y_page_cross() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.y = 0x01;
    bus.memory[0x2100] = 0x09;
    bus.load(0, &[0xBE, 0xFF, 0x20]); // LDX $20FF,Y

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.x, 0x09);
    assert_eq!(cpu.delta_cycles, 5);
}

#[test]
fn test_ldy_immediate_and_zero_flag() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.y = 0x44;
    bus.load(0, &[0xA0, 0x00]); // LDY #$00

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.y, 0x00);
    assert_ne!(cpu.p & (StatusFlag::Z as u8), 0);
}

#[test]
fn test_sta_zero_page() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0x5A;
    bus.load(0, &[0x85, 0x10]); // STA $10

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x0010], 0x5A);
    assert_eq!(cpu.delta_cycles, 3);
}

#[test]
fn test_sta_does_not_touch_flags() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0x00; // a zero store must not set Z
    let p_before = cpu.p;
    bus.load(0, &[0x8D, 0x00, 0x30]); // STA $3000

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.p, p_before);
}

#[test]
fn test_sta_absolute_x_always_pays_write_cycle() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0x77;
    cpu.x = 0x01;
    // No page cross, yet stores always take the worst-case count.
    bus.load(0, &[0x9D, 0x34, 0x12]); // STA $1234,X

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x1235], 0x77);
    assert_eq!(cpu.delta_cycles, 5);
}

#[test]
fn test_sta_absolute_y_page_cross_costs_nothing_extra() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0x88;
    cpu.y = 0x01;
    bus.load(0, &[0x99, 0xFF, 0x12]); // STA $12FF,Y -> $1300

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x1300], 0x88);
    assert_eq!(cpu.delta_cycles, 5);
}

#[test]
fn test_sta_indirect_y_fixed_six_cycles() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0x3C;
    cpu.y = 0x20;
    bus.memory[0x0040] = 0x00;
    bus.memory[0x0041] = 0x80;
    bus.load(0, &[0x91, 0x40]); // STA ($40),Y

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x8020], 0x3C);
    assert_eq!(cpu.delta_cycles, 6);
}

#[test]
fn test_stx_zero_page_y() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.x = 0x12;
    cpu.y = 0x05;
    bus.load(0, &[0x96, 0x20]); // STX $20,Y

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x0025], 0x12);
    assert_eq!(cpu.delta_cycles, 4);
}

#[test]
fn test_sty_absolute() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.y = 0xFE;
    bus.load(0, &[0x8C, 0x00, 0x44]); // STY $4400

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x4400], 0xFE);
    assert_eq!(cpu.delta_cycles, 4);
}
