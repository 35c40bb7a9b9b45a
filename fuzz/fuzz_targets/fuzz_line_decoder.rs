//! Fuzz target: `LineAssembler::feed` → `decode_line` → `Reply::from_frame`
//!
//! Drives arbitrary byte sequences through the whole inbound path and
//! asserts that nothing panics and that assembled lines never carry a
//! delimiter or exceed the buffer.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use rabitlink::proto::codec::{LineAssembler, MAX_LINE_LEN, decode_line};
use rabitlink::proto::reply::Reply;

fuzz_target!(|data: &[u8]| {
    let mut assembler = LineAssembler::new();
    let mut lines = Vec::new();
    assembler.feed(data, &mut lines);

    for line in &lines {
        assert!(!line.contains('\n'), "assembled line holds a delimiter");
        assert!(line.len() <= MAX_LINE_LEN, "assembled line exceeds buffer");

        let frame = decode_line(line);
        let _ = Reply::from_frame(&frame);
    }

    // After a reset the assembler must accept bytes cleanly again.
    assembler.reset();
    assert_eq!(assembler.pending(), 0);
    lines.clear();
    assembler.feed(data, &mut lines);
});
