//! Cross-process determinism.
//!
//! Spawns the `digest_fixture` binary under several environment variants
//! and asserts identical output, proving the scenario digests do not
//! depend on process-level state (cwd, locale, env vars).

use std::path::Path;
use std::process::Command;

fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
}

/// Run the fixture with `seed`, `cwd` and environment overrides; return stdout.
fn run_variant(seed: &str, cwd: &Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_digest_fixture");
    let mut command = Command::new(bin);
    command
        .arg(seed)
        .current_dir(cwd)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }
    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin}: {e}"));
    assert!(
        output.status.success(),
        "digest_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let baseline = run_variant("42", root, &[]);
    for key in ["safely_digest", "invoke_map_digest", "pmap_digest", "policy_digest"] {
        assert!(
            baseline.contains(&format!("{key}=sha256:")),
            "baseline missing {key}: {baseline}"
        );
    }

    let tmp = std::env::temp_dir();
    assert_eq!(baseline, run_variant("42", &tmp, &[]), "output differs when cwd changes");

    let locale = run_variant("42", root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, locale, "output differs under LC_ALL=C LANG=C");

    let noise = run_variant(
        "42",
        root,
        &[("TIDYMAP_NOISE", "1"), ("TZ", "America/New_York"), ("HOME", "/nonexistent")],
    );
    assert_eq!(baseline, noise, "output differs with spurious env vars");
}

#[test]
fn crossproc_matches_in_process_digests() {
    let output = run_variant("7", workspace_root(), &[]);
    let expected: String = lock_tests::scenario_digests(7)
        .unwrap()
        .into_iter()
        .map(|(key, digest)| format!("{key}={digest}\n"))
        .collect();
    assert_eq!(output, expected);
}
