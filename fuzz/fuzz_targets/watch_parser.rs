#![no_main]

use libfuzzer_sys::fuzz_target;

use cfwatch::fetcher::pipeline::decode_html;
use cfwatch::watch::{parse_contest_status, parse_submissions};

fuzz_target!(|data: &[u8]| {
    let html = decode_html(data);

    // Neither parser may panic on arbitrary input
    let _ = parse_submissions(&html, "a");
    let _ = parse_contest_status(&html);
});
