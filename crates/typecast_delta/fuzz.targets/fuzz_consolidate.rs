#![no_main]
use libfuzzer_sys::fuzz_target;
use typecast_core::text::split_lines;
use typecast_delta::{delta_between, DiffOp};

fuzz_target!(|data: &[u8]| {
    // Split the input into two documents at the first 0xFF byte
    let split = data.iter().position(|&b| b == 0xFF).unwrap_or(data.len());
    let (head, tail) = data.split_at(split);
    let tail = tail.get(1..).unwrap_or_default();

    let source = split_lines(&String::from_utf8_lossy(head));
    let target = split_lines(&String::from_utf8_lossy(tail));

    // Replaying the consolidated delta over the source must rebuild
    // the target line for line
    let delta = delta_between(&source, &target);
    let mut rebuilt = Vec::new();
    let mut from = 0usize;
    for op in delta.iter() {
        match op {
            DiffOp::Equal => {
                rebuilt.push(source[from].clone());
                from += 1;
            }
            DiffOp::Delete => from += 1,
            DiffOp::Insert(text) => rebuilt.push(text.clone()),
            DiffOp::Edit(text) => {
                rebuilt.push(text.clone());
                from += 1;
            }
        }
    }
    assert_eq!(from, source.len());
    assert_eq!(rebuilt, target);
});
