#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the input
    let _ = zenpcx::probe(data);

    let Ok(out) = zenpcx::decode(data, enough::Unstoppable) else {
        return;
    };
    let expected = out.image.width() as usize * out.image.height() as usize * 3;
    assert_eq!(out.image.pixels().len(), expected);
    assert_eq!(out.image.width(), out.header.width());
    assert_eq!(out.image.height(), out.header.height());
});
