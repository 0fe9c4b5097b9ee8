use proptest::prelude::*;

use chipvm::{Chip8, Io, Keypad, Mute, NullRenderer};

/// Loads `Vx = a`, `Vy = b`, then runs `op`
fn run_with(x: u8, a: u8, y: u8, b: u8, op: u16) -> Chip8 {
    run_with_flag(0, x, a, y, b, op)
}

/// Loads `VF = f` first; `Vx` or `Vy` may overwrite it
fn run_with_flag(f: u8, x: u8, a: u8, y: u8, b: u8, op: u16) -> Chip8 {
    let rom = [
        0x6F,
        f,
        0x60 | x,
        a,
        0x60 | y,
        b,
        (op >> 8) as u8,
        op as u8,
    ];
    let mut chip8 = Chip8::new();
    chip8.load_rom(&rom).unwrap();
    let (mut renderer, mut keypad, mut buzzer) = (NullRenderer, Keypad::new(), Mute);
    let mut io = Io::new(&mut renderer, &mut keypad, &mut buzzer);
    for _ in 0..4 {
        chip8.step(&mut io).unwrap();
    }
    chip8
}

fn alu(class: u16, x: u8, y: u8) -> u16 {
    0x8000 | u16::from(x) << 8 | u16::from(y) << 4 | class
}

fn v(chip8: &Chip8, reg: u8) -> u8 {
    chip8.state().registers.get(reg).unwrap()
}

proptest! {
    #[test]
    fn bitwise_ops_leave_flag_alone(
        x in 0u8..0xF,
        y in 0u8..0xF,
        a: u8,
        b: u8,
        f: u8,
        class in 1u16..=3,
    ) {
        prop_assume!(x != y);
        let chip8 = run_with_flag(f, x, a, y, b, alu(class, x, y));
        let expected = match class {
            1 => a | b,
            2 => a & b,
            _ => a ^ b,
        };
        prop_assert_eq!(v(&chip8, x), expected);
        prop_assert_eq!(v(&chip8, 0xF), f);
    }

    #[test]
    fn add_immediate_sets_carry(x in 0u8..0xF, a: u8, kk: u8) {
        let op = 0x7000 | u16::from(x) << 8 | u16::from(kk);
        // Vx is loaded twice so the same helper can be used
        let chip8 = run_with(x, a, x, a, op);
        prop_assert_eq!(v(&chip8, x), a.wrapping_add(kk));
        prop_assert_eq!(v(&chip8, 0xF) == 1, u16::from(a) + u16::from(kk) > 0xFF);
    }

    #[test]
    fn add_registers_sets_carry(x in 0u8..0xF, y in 0u8..0xF, a: u8, b: u8) {
        prop_assume!(x != y);
        let chip8 = run_with(x, a, y, b, alu(0x4, x, y));
        prop_assert_eq!(v(&chip8, x), a.wrapping_add(b));
        prop_assert_eq!(v(&chip8, 0xF) == 1, u16::from(a) + u16::from(b) > 0xFF);
    }

    #[test]
    fn sub_flags_no_borrow(x in 0u8..0xF, y in 0u8..0xF, a: u8, b: u8) {
        prop_assume!(x != y);
        let chip8 = run_with(x, a, y, b, alu(0x5, x, y));
        prop_assert_eq!(v(&chip8, x), a.wrapping_sub(b));
        prop_assert_eq!(v(&chip8, 0xF) == 1, a >= b);
    }

    #[test]
    fn subn_flags_no_borrow(x in 0u8..0xF, y in 0u8..0xF, a: u8, b: u8) {
        prop_assume!(x != y);
        let chip8 = run_with(x, a, y, b, alu(0x7, x, y));
        prop_assert_eq!(v(&chip8, x), b.wrapping_sub(a));
        prop_assert_eq!(v(&chip8, 0xF) == 1, b >= a);
    }

    #[test]
    fn store_then_load_restores_registers(
        values in prop::array::uniform16(any::<u8>()),
        x in 0u8..=0xF,
    ) {
        // LD Vn, values[n] for every register, LD I, 0x400, LD [I], Vx,
        // clear V0..=Vx, LD Vx, [I]
        let mut rom = Vec::new();
        for (reg, value) in values.iter().enumerate() {
            rom.extend_from_slice(&[0x60 | reg as u8, *value]);
        }
        rom.extend_from_slice(&[0xA4, 0x00, 0xF0 | x, 0x55]);
        for reg in 0..=x {
            rom.extend_from_slice(&[0x60 | reg, 0x00]);
        }
        rom.extend_from_slice(&[0xF0 | x, 0x65]);
        let count = rom.len() / 2;

        let mut chip8 = Chip8::new();
        chip8.load_rom(&rom).unwrap();
        let (mut renderer, mut keypad, mut buzzer) = (NullRenderer, Keypad::new(), Mute);
        let mut io = Io::new(&mut renderer, &mut keypad, &mut buzzer);
        for _ in 0..count {
            chip8.step(&mut io).unwrap();
        }
        prop_assert_eq!(
            &chip8.state().registers.v()[..=x as usize],
            &values[..=x as usize]
        );
        prop_assert_eq!(chip8.state().registers.i, 0x400);
    }

    #[test]
    fn drawing_twice_restores_frame(
        sprite in prop::collection::vec(any::<u8>(), 1..=15),
        px: u8,
        py: u8,
    ) {
        // LD I, 0x400 holds the sprite; DRW V0, V1, n twice
        let n = sprite.len() as u8;
        let mut rom = vec![
            0x60, px, 0x61, py, 0xA4, 0x00, 0xD0, 0x10 | n, 0xD0, 0x10 | n,
        ];
        rom.resize(0x200, 0);
        rom.extend_from_slice(&sprite);

        let mut chip8 = Chip8::new();
        chip8.load_rom(&rom).unwrap();
        let (mut renderer, mut keypad, mut buzzer) = (NullRenderer, Keypad::new(), Mute);
        let mut io = Io::new(&mut renderer, &mut keypad, &mut buzzer);
        for _ in 0..4 {
            chip8.step(&mut io).unwrap();
        }
        let first = *chip8.frame_buffer();
        chip8.step(&mut io).unwrap();

        prop_assert_eq!(*chip8.frame_buffer(), chipvm::FrameBuffer::new());
        let drew_something = first.rows().iter().flatten().any(|&p| p == 1);
        prop_assert_eq!(v(&chip8, 0xF) == 1, drew_something);
    }
}
