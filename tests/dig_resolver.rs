//! dig backend tests against a scripted stand-in for dig
#![cfg(unix)]

use squat_scout::{DigResolver, Resolver, SquatScoutError};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

const FAKE_DIG: &str = r#"#!/bin/sh
if [ "$1" = "-v" ]; then
    echo "DiG 9.18.0" >&2
    exit 0
fi
case "$2" in
    answer.com)
        echo "edge.answer.net."
        echo "192.0.2.44"
        echo "192.0.2.45"
        ;;
    broken.com)
        echo "dig: couldn't get address for 'ns.broken': not found" >&2
        exit 10
        ;;
    offline.com)
        echo ";; connection timed out; no servers could be reached"
        exit 9
        ;;
    *)
        ;;
esac
"#;

fn install_fake_dig() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dig");
    std::fs::write(&path, FAKE_DIG).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    (dir, path)
}

// One test drives every case so the script is written once, before any spawn
#[tokio::test]
async fn test_dig_backend() {
    let (_dir, path) = install_fake_dig();
    let resolver = DigResolver::new(path.to_string_lossy().to_string());

    resolver.ensure_available().await.unwrap();

    let record = resolver.resolve("answer.com").await.unwrap();
    assert_eq!(
        record.records,
        vec!["edge.answer.net.", "192.0.2.44", "192.0.2.45"]
    );
    assert_eq!(record.addresses().collect::<Vec<_>>(), vec!["192.0.2.44", "192.0.2.45"]);

    let record = resolver.resolve("nothing.com").await.unwrap();
    assert!(record.is_empty());

    match resolver.resolve("broken.com").await.unwrap_err() {
        SquatScoutError::Resolution { domain, message } => {
            assert_eq!(domain, "broken.com");
            assert!(message.contains("couldn't get address"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    match resolver.resolve("offline.com").await.unwrap_err() {
        SquatScoutError::Resolution { message, .. } => {
            assert_eq!(message, "connection timed out; no servers could be reached");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
