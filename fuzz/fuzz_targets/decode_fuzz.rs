#![no_main]
use libfuzzer_sys::fuzz_target;
use oxiz85::z85;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must only ever produce errors, never panics.
    let one_shot = z85::decode(data);

    // The streaming decoder must agree with the one-shot decoder.
    let split = data.first().map_or(0, |&b| b as usize % (data.len() + 1));
    let mut dec = z85::StreamDecoder::new(Vec::new());
    let streamed = dec
        .write_text(&data[..split])
        .and_then(|()| dec.write_text(&data[split..]))
        .and_then(|()| dec.finish());

    match (one_shot, streamed) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(_), Err(_)) => {}
        (a, b) => panic!("one-shot {a:?} vs streamed {b:?}"),
    }
});
