#![no_main]
use libfuzzer_sys::fuzz_target;
use typecast_core::text::split_lines;
use typecast_delta::{LineDiffer, RawOp};

fuzz_target!(|data: &[u8]| {
    // Split the input into two documents at the first 0xFF byte
    let split = data.iter().position(|&b| b == 0xFF).unwrap_or(data.len());
    let (head, tail) = data.split_at(split);
    let tail = tail.get(1..).unwrap_or_default();

    let source = split_lines(&String::from_utf8_lossy(head));
    let target = split_lines(&String::from_utf8_lossy(tail));

    // Alignment rows must consume every source line and produce every
    // target line exactly once
    let alignment = LineDiffer::new().align(&source, &target);
    let consumed = alignment
        .iter()
        .filter(|row| matches!(row, RawOp::Equal | RawOp::Delete))
        .count();
    let produced = alignment
        .iter()
        .filter(|row| matches!(row, RawOp::Equal | RawOp::Insert(_)))
        .count();
    assert_eq!(consumed, source.len());
    assert_eq!(produced, target.len());
});
