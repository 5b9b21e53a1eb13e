#![no_main]

use libfuzzer_sys::fuzz_target;
use notion_md::core::{ConvertConfig, convert, render};
use notion_md::doc::ContentBlock;

fuzz_target!(|data: &[u8]| {
    let Ok(blocks) = serde_json::from_slice::<Vec<ContentBlock>>(data) else {
        return;
    };
    for config in [ConvertConfig::lenient(), ConvertConfig::strict()] {
        if let Ok(md_blocks) = convert(&blocks, None, &config) {
            let markdown = render(&md_blocks);
            assert!(md_blocks.is_empty() || markdown.ends_with("\n\n"));
        }
    }
});
