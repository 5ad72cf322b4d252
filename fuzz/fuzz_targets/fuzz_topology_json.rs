#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Any previous topology that parses must be diffable
        if let Ok(topology) = elkform::ClusterTopology::from_json(content) {
            let _ = elkform::TopologyDiff::between(&topology, &topology).summary();
            let _ = serde_json::to_string(&topology);
        }
    }
});
