#![no_main]
use std::io::Cursor;

use cram_entropy::codec::{ByteArrayStopCodec, ExternalCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&stop, stream)) = data.split_first() else {
        return;
    };

    // Reading must consume the stream exactly, one stop byte per value
    let mut codec = ByteArrayStopCodec::new(Cursor::new(stream), Vec::new(), stop);
    let mut consumed = 0usize;
    let mut values = 0usize;
    while consumed < stream.len() {
        let value = codec.read().expect("in-memory reads do not fail");
        assert!(!value.contains(&stop));
        consumed += value.len() + 1;
        values += 1;
    }
    assert!(values <= stream.len());
});
