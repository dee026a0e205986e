use xvmdis::disasm::opcode::{self, OPCODE_COUNT};
use xvmdis::disasm::{decode_instruction, Disassembler, Flow, OperandKind, XvmDisassembler};
use xvmdis::{EncodingFault, XvmError};

#[test]
fn decode_mov_register_pair() {
    let backend = XvmDisassembler;
    let ins = backend.decode(&[0x00, 0x11, 0x01, 0x01], 0).expect("insn");
    assert_eq!(ins.length, 4);
    assert_eq!(ins.text, "mov     r1, r1");
    assert_eq!(ins.operands[0].kind, OperandKind::Register(1));

    let ins = backend.decode(&[0x01, 0x11, 0x01, 0x01], 0).expect("insn");
    assert_eq!(ins.text, "mov     r1b, r1b");
    assert_eq!(backend.name(), "xvm");
}

#[test]
fn rendered_listing_sample() {
    let cases: &[(&[u8], &str)] = &[
        (&[10, 0x21, 0, 0x10, 0, 0, 0], "add     r0, 0x10"),
        (&[14, 0x13, 15, 0xfc, 0xff, 0xff, 0xff, 2], "sub     byte [sp-0x4], r2b"),
        (&[24, 0x11, 3, 4], "xor     r3w, r4w"),
        (&[36, 0x11, 13, 14], "xchg    pc, r14"),
        (&[42, 0x25, 7, 0xff, 0, 0, 0], "test    dword [r7], 0xff"),
        (&[33, 0x03, 2, 0x20, 0, 0, 0], "not     word [r2+0x20]"),
        (&[35, 0x01, 12], "pop     r12"),
        (&[38, 0x01, 11], "dec     r11"),
        (&[45, 0x02, 0x34, 0x12, 0, 0], "jne     0x1234"),
        (&[46, 0x02, 0, 0, 0, 0], "ja      0x0"),
        (&[47, 0x02, 1, 0, 0, 0], "jb      0x1"),
        (&[48, 0x01, 9], "jae     r9"),
        (&[49, 0x05, 9], "jbe     dword [r9]"),
        (&[41, 0x61, 1, 0x00, 0x30, 0, 0], "cmp     r1w, word [+0x3000]"),
        (&[7, 0x00], "syscall"),
    ];
    for (bytes, expected) in cases {
        let ins = decode_instruction(bytes, 0).expect("decode");
        assert_eq!(&ins.text, expected);
        assert_eq!(ins.length, bytes.len(), "{}", expected);
    }
}

#[test]
fn length_is_prefix_plus_operands() {
    let buf = [0u8; 16];
    let legal = [0u8, 1, 2, 3, 5, 6, 7, 9, 10, 11, 13, 14, 15];
    for opcode in 0..=255u8 {
        for &m1 in &legal[1..] {
            for &m2 in &legal {
                let mut b = buf;
                b[0] = opcode;
                b[1] = m1 | (m2 << 4);
                let ins = decode_instruction(&b, 0).unwrap();
                let fixed = opcode == 3 || opcode == 4 || !opcode::is_known(opcode);
                if fixed {
                    assert_eq!(ins.length, 2);
                } else {
                    assert_eq!(
                        ins.length,
                        2 + ins.operands[0].length + ins.operands[1].length
                    );
                }
            }
        }
    }
}

#[test]
fn form_less_modes_always_illegal() {
    for opcode in 0..OPCODE_COUNT as u8 {
        for bad in [4u8, 8, 12] {
            let err = decode_instruction(&[opcode, bad, 0, 0, 0, 0], 0).unwrap_err();
            assert_eq!(
                err,
                XvmError::IllegalEncoding {
                    offset: 2,
                    fault: EncodingFault::NoAddressingForm { mode: bad }
                }
            );
        }
    }
}

#[test]
fn unknown_opcodes_decode_as_nop() {
    for opcode in OPCODE_COUNT as u8..=255 {
        let ins = decode_instruction(&[opcode, 0x22, 1, 2, 3, 4, 5, 6, 7, 8], 0).unwrap();
        assert_eq!(ins.text, "nop");
        assert_eq!(ins.length, 2);
        assert_eq!(ins.flow, Flow::Sequential);
    }
}

#[test]
fn displacement_signedness_depends_on_base() {
    let with_base = decode_instruction(&[37, 0x03, 0, 0x00, 0x00, 0x00, 0x80], 0).unwrap();
    assert_eq!(with_base.text, "inc     dword [r0-0x80000000]");

    let without_base = decode_instruction(&[37, 0x06, 0x00, 0x00, 0x00, 0x80], 0).unwrap();
    assert_eq!(without_base.text, "inc     dword [+0x80000000]");
}
