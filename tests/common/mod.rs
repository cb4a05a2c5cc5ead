use std::fs;
use std::path::PathBuf;

/// Compare `actual` with `tests/snapshots/<name>`.
///
/// `ORTHOAGE_UPDATE_SNAPSHOTS=1` rewrites the stored file instead.
pub fn assert_snapshot(name: &str, actual: &str) {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "snapshots", name]
        .iter()
        .collect();

    if std::env::var_os("ORTHOAGE_UPDATE_SNAPSHOTS").is_some() {
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("missing snapshot {}", path.display()));
    assert_eq!(
        expected.replace("\r\n", "\n"),
        actual,
        "snapshot {} differs; rerun with ORTHOAGE_UPDATE_SNAPSHOTS=1 to accept",
        path.display()
    );
}
