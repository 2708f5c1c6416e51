#![no_main]
use libfuzzer_sys::fuzz_target;
use oxiz85::{framed, z85};

fuzz_target!(|data: &[u8]| {
    // Treat the input as a decoded frame: any header, any declared length.
    let whole = data.len() - data.len() % 4;
    let text = z85::encode(&data[..whole]).unwrap();
    if let Ok(payload) = framed::decode(&text) {
        assert!(payload.len() <= whole);
    }

    // And as Z85 text directly.
    let _ = framed::decode(data);
});
