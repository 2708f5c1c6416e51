#![no_main]
use libfuzzer_sys::fuzz_target;
use oxiz85::{framed, z85};

fuzz_target!(|data: &[u8]| {
    let text = framed::encode(data).unwrap();
    assert_eq!(text.len(), framed::encoded_len(data.len()));
    assert_eq!(framed::decode(&text).unwrap(), data);

    let whole = &data[..data.len() - data.len() % 4];
    let raw = z85::encode(whole).unwrap();
    assert_eq!(z85::decode(&raw).unwrap(), whole);
});
