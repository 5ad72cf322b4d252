#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and validation should never panic
        if let Ok((config, _warnings)) =
            elkform::config::parse_with_warnings(content, Path::new("elkform.toml"))
        {
            let _ = config.assembly_options();
        }
    }
});
