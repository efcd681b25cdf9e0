#![no_main]
use cram_entropy::rans::{ModelParams, Rans0Decoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // Header bytes pick the budget, step and output length (capped at 64KB)
    let total_bits = 9 + u32::from(data[0] % 8);
    let step = u32::from(data[1] % 64);
    let expected_len = usize::from(u16::from_le_bytes([data[2], data[3]]));

    let params = ModelParams::default().with_total_bits(total_bits).with_step(step);
    let mut decoder = Rans0Decoder::new(params);
    if decoder.reset().is_err() {
        return;
    }
    let _ = decoder.decode_block(&data[4..], expected_len);
});
