//! Command-line tests for the tool binaries
//!
//! Only paths that fail or exit before any remote call are exercised here.

#[cfg(test)]
mod cli_tests {
    use std::process::Command;
    use tempfile::tempdir;

    fn run(binary: &str, args: &[&str]) -> std::process::Output {
        // isolate from any user configuration
        let home = tempdir().unwrap();
        Command::new(binary)
            .args(args)
            .env("HOME", home.path())
            .env("PATH", "")
            .output()
            .unwrap()
    }

    #[test]
    fn test_asset_hierarchy_help() {
        let output = run(env!("CARGO_BIN_EXE_asset-hierarchy"), &["--help"]);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("--asset-id"));
        assert!(stdout.contains("--all-levels"));
    }

    #[test]
    fn test_asset_hierarchy_rejects_invalid_id() {
        let output = run(
            env!("CARGO_BIN_EXE_asset-hierarchy"),
            &["--asset-id", "066e9d16-b369"],
        );
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid Asset ID"));
    }

    #[test]
    fn test_asset_hierarchy_requires_asset_id() {
        let output = run(env!("CARGO_BIN_EXE_asset-hierarchy"), &[]);
        assert!(!output.status.success());
    }

    #[test]
    fn test_model_references_rejects_invalid_id() {
        let output = run(
            env!("CARGO_BIN_EXE_model-references"),
            &["--asset-model-id", "not-a-model"],
        );
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid Asset Model ID"));
    }

    #[test]
    fn test_search_models_help_lists_filters() {
        let output = run(env!("CARGO_BIN_EXE_search-models"), &["--help"]);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        for flag in [
            "--no-hierarchy-references",
            "--no-hierarchy-definitions",
            "--no-properties",
            "--no-assets",
        ] {
            assert!(stdout.contains(flag), "missing {}", flag);
        }
    }

    #[test]
    fn test_search_models_without_aws_cli_fails() {
        let dir = tempdir().unwrap();
        let output = run(
            env!("CARGO_BIN_EXE_search-models"),
            &["--export-dir", dir.path().to_str().unwrap()],
        );
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("list-asset-models"));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
