#![no_main]
use cram_entropy::rans::{ModelParams, Rans0Decoder, Rans0Encoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&knob, payload)) = data.split_first() else {
        return;
    };
    let params = ModelParams::default()
        .with_total_bits(12)
        .with_step(u32::from(knob % 128));

    let compressed = Rans0Encoder::new(params.clone())
        .encode_block(payload)
        .expect("uniform model encodes every byte");

    let mut decoder = Rans0Decoder::new(params);
    decoder.reset().expect("valid params");
    let decoded = decoder
        .decode_block(&compressed, payload.len())
        .expect("encoder output decodes");
    assert_eq!(decoded, payload);
});
