#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(program) = xvmdis::XvmProgram::parse(data) {
        let seeds = program.code_symbol_addresses();
        let config = xvmdis::TraversalConfig::with_budget(100_000);
        let _ = xvmdis::analyze_with_config(&program, seeds, &config);
    }
});
