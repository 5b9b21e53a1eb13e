#![no_main]

use libfuzzer_sys::fuzz_target;
use notion_md::doc::ContentBlock;

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<Vec<ContentBlock>>(data);
});
