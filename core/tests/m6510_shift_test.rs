use breadbox_core::cpu::mos6510::{Mos6510, StatusFlag};
mod common;
use common::TestBus;

fn step(cpu: &mut Mos6510, bus: &mut TestBus) {
    cpu.step(bus).expect("unexpected CPU fault");
}

fn flag(cpu: &Mos6510, f: StatusFlag) -> bool {
    cpu.p & (f as u8) != 0
}

#[test]
fn test_asl_accumulator() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0b1100_0001;
    bus.load(0, &[0x0A]); // ASL A

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0b1000_0010);
    assert!(flag(&cpu, StatusFlag::C)); // old bit 7
    assert!(flag(&cpu, StatusFlag::N));
    assert_eq!(cpu.delta_cycles, 2);
}

#[test]
fn test_asl_memory() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    bus.memory[0x0040] = 0x40;
    bus.load(0, &[0x06, 0x40]); // ASL $40

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x0040], 0x80);
    assert!(!flag(&cpu, StatusFlag::C));
    assert!(flag(&cpu, StatusFlag::N));
    assert_eq!(cpu.delta_cycles, 5);
}

#[test]
fn test_lsr_accumulator_clears_negative() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0x01;
    bus.load(0, &[0x4A]); // LSR A

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x00);
    assert!(flag(&cpu, StatusFlag::C)); // old bit 0
    assert!(flag(&cpu, StatusFlag::Z));
    assert!(!flag(&cpu, StatusFlag::N));
}

#[test]
fn test_lsr_absolute_x() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.x = 0x02;
    bus.memory[0x2002] = 0xAA;
    bus.load(0, &[0x5E, 0x00, 0x20]); // LSR $2000,X

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x2002], 0x55);
    assert_eq!(cpu.delta_cycles, 7);
}

#[test]
fn test_rol_shifts_carry_in() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0x80;
    cpu.p |= StatusFlag::C as u8;
    bus.load(0, &[0x2A]); // ROL A

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x01); // carry rotated into bit 0
    assert!(flag(&cpu, StatusFlag::C)); // old bit 7 out
}

#[test]
fn test_ror_shifts_carry_into_bit7() {
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    bus.memory[0x0010] = 0x01;
    cpu.p |= StatusFlag::C as u8;
    bus.load(0, &[0x66, 0x10]); // ROR $10

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x0010], 0x80);
    assert!(flag(&cpu, StatusFlag::C));
    assert!(flag(&cpu, StatusFlag::N));
    assert_eq!(cpu.delta_cycles, 5);
}

#[test]
fn test_rol_ror_round_trip() {
    // Nine ROLs (through carry) bring the 9-bit value back; so do nine
    // RORs. Spot-check one full rotation pair.
    let mut cpu = Mos6510::new();
    let mut bus = TestBus::new();
    cpu.a = 0x5C;
    bus.load(0, &[0x2A, 0x6A]); // ROL A; ROR A

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x5C);
}

#[test]
fn test_shift_memory_cycle_counts() {
    // (program, target address, expected cycles)
    let cases: [(&[u8], u16, u32); 4] = [
        (&[0x26, 0x20], 0x0020, 5),       // ROL zp
        (&[0x36, 0x1F], 0x0020, 6),       // ROL zp,X (X=1)
        (&[0x2E, 0x00, 0x30], 0x3000, 6), // ROL abs
        (&[0x3E, 0x00, 0x30], 0x3001, 7), // ROL abs,X
    ];
    for (program, target, cycles) in cases {
        let mut cpu = Mos6510::new();
        let mut bus = TestBus::new();
        cpu.x = 1;
        bus.memory[target as usize] = 0x01;
        bus.load(0, program);

        step(&mut cpu, &mut bus);

        assert_eq!(bus.memory[target as usize], 0x02);
        assert_eq!(cpu.delta_cycles, cycles, "cycles for {program:02X?}");
    }
}
