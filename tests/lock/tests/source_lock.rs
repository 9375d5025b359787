//! Source and build-graph lock tests.
//!
//! Proves:
//! 1. The kernel depends on no sibling crate and no randomness
//! 2. The adapters do not depend on the dispatcher
//! 3. The engine never spawns threads or takes locks
//! 4. Library code (outside test modules) never unwraps
//! 5. Domain-separator literals live only in `hash_domain.rs`

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use tidymap_kernel::proof::hash_domain::HashDomain;

fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
}

fn rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let Ok(entries) = fs::read_dir(dir) else {
        return out;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            out.extend(rs_files(&path));
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
    out.sort();
    out
}

/// Non-comment lines before the first `#[cfg(test)]`, with line numbers.
fn library_lines(path: &Path) -> Vec<(usize, String)> {
    let content = fs::read_to_string(path).unwrap_or_default();
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim().starts_with("#[cfg(test)]"))
        .filter(|(_, line)| {
            let t = line.trim();
            !(t.starts_with("//") || t.starts_with("/*") || t.starts_with('*'))
        })
        .map(|(i, line)| (i + 1, line.to_string()))
        .collect()
}

fn scan(dirs: &[&str], forbidden: &[&str], skip_file: Option<&str>) -> Vec<String> {
    let mut violations = Vec::new();
    for dir in dirs {
        for path in rs_files(&workspace_root().join(dir)) {
            if skip_file.is_some_and(|s| path.ends_with(s)) {
                continue;
            }
            for (line_no, line) in library_lines(&path) {
                for pattern in forbidden {
                    if line.contains(pattern) {
                        violations.push(format!("{}:{line_no}: {}", path.display(), line.trim()));
                    }
                }
            }
        }
    }
    violations
}

fn assert_clean(what: &str, violations: &[String]) {
    if !violations.is_empty() {
        let mut msg = format!("{what}:\n");
        for v in violations {
            let _ = writeln!(msg, "  {v}");
        }
        panic!("{msg}");
    }
}

fn dependency_lines(manifest: &str) -> String {
    let content = fs::read_to_string(workspace_root().join(manifest)).expect("manifest exists");
    content
        .lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn kernel_depends_on_no_sibling_and_no_rng() {
    let deps = dependency_lines("kernel/Cargo.toml");
    for forbidden in ["tidymap-adapters", "tidymap-dispatch", "rand"] {
        assert!(!deps.contains(forbidden), "kernel/Cargo.toml mentions {forbidden}");
    }
}

#[test]
fn adapters_do_not_depend_on_dispatch() {
    let deps = dependency_lines("adapters/Cargo.toml");
    assert!(!deps.contains("tidymap-dispatch"));
}

#[test]
fn engine_is_single_threaded() {
    let violations = scan(
        &["kernel/src"],
        &["thread::spawn", "std::thread", "Mutex", "RwLock", "rayon", "async fn"],
        None,
    );
    assert_clean("concurrency primitives in kernel", &violations);
}

#[test]
fn library_code_never_unwraps() {
    let violations = scan(
        &["kernel/src", "adapters/src", "dispatch/src"],
        &[".unwrap()", ".expect("],
        None,
    );
    assert_clean("unwrap/expect in library code", &violations);
}

#[test]
fn domain_literals_only_in_hash_domain() {
    let violations = scan(
        &["kernel/src", "adapters/src", "dispatch/src"],
        &["b\"TIDYMAP::"],
        Some("hash_domain.rs"),
    );
    assert_clean("raw domain literal outside hash_domain.rs", &violations);
}

#[test]
fn hash_domains_are_unique_and_terminated() {
    let mut seen = std::collections::BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(seen.insert(domain.as_bytes()), "duplicate prefix {domain}");
        assert!(domain.as_bytes().ends_with(&[0]), "{domain} not null-terminated");
    }
    assert_eq!(HashDomain::ALL.len(), 2, "update this count when adding a domain");
}
