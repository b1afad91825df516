// tests/facts.rs

//! Integration tests for host fact collection against target roots.

mod common;

use aptpin::{collect_facts, OsFamily};
use common::debian_root;
use std::fs;

#[test]
fn test_debian_root_without_sentinel() {
    let root = debian_root();
    let facts = collect_facts(root.path());
    assert_eq!(facts.os_family, OsFamily::Debian.to_string());
    assert_eq!(facts.apt_reboot_required, Some(false));
}

#[test]
fn test_debian_root_with_sentinel() {
    let root = debian_root();
    let run = root.path().join("var/run");
    fs::create_dir_all(&run).unwrap();
    fs::write(run.join("reboot-required"), "").unwrap();

    assert_eq!(collect_facts(root.path()).apt_reboot_required, Some(true));
}

#[test]
fn test_non_debian_root_has_no_fact() {
    let root = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("etc")).unwrap();
    fs::create_dir_all(root.path().join("var/run")).unwrap();
    fs::write(root.path().join("etc/os-release"), "ID=arch\n").unwrap();
    fs::write(root.path().join("var/run/reboot-required"), "").unwrap();

    let facts = collect_facts(root.path());
    assert_eq!(facts.apt_reboot_required, None);
    let json = serde_json::to_value(&facts).unwrap();
    assert!(json.get("apt_reboot_required").is_none());
}
