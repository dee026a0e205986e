#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(ins) = xvmdis::decode_instruction(data, 0) {
        assert!(ins.length >= 2 && ins.length <= xvmdis::disasm::MAX_INSTRUCTION_LENGTH);
    }
});
