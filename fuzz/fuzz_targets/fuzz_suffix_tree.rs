#![no_main]

use libfuzzer_sys::fuzz_target;
use sfx::{EncodeConfig, SuffixTree, Text};

fuzz_target!(|data: &[u8]| {
    // Any body without the sentinel must build a valid tree
    let Ok(text) = Text::new(data, &EncodeConfig::default()) else {
        return;
    };
    let tree = SuffixTree::build(text.as_bytes()).unwrap();
    tree.check_invariants().unwrap();
    assert_eq!(tree.suffix_array().len(), text.len());
});
