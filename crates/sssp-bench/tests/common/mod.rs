use std::path::{Path, PathBuf};

use sssp_bench::config::BenchConfig;

pub fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../resources")
        .join(name)
}

pub fn write_graph(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

/// Few repetitions so the tests stay fast.
pub fn quick_config() -> BenchConfig {
    BenchConfig {
        repetitions: 3,
        ..Default::default()
    }
}
