//! Manifest patching for pinned dependency versions.
//!
//! The patcher rewrites exactly one value — `dependencies.<library>` in a
//! repository's `package.json` — and leaves everything else alone. The
//! file is never touched when there is nothing to do, so a no-op is
//! observably identical to not having run at all.

use crate::error::{BumpError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Conventional manifest location inside a working copy.
pub const MANIFEST_FILE: &str = "package.json";

const DEPENDENCIES_KEY: &str = "dependencies";

/// Result of a patch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The value was rewritten and the file saved.
    Applied { previous: String },
    /// Nothing to do; the file was left untouched.
    NotApplicable(NotApplicableReason),
}

/// Why a repository needed no update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotApplicableReason {
    /// No manifest file at the conventional location.
    ManifestMissing,
    /// The library is not a key under the dependency map.
    DependencyMissing,
    /// The pinned version already equals the target.
    AlreadyCurrent,
}

/// Patch the manifest in `repo_dir`, pinning `library` to `version`.
///
/// The version string is taken verbatim; no semver validation. Sibling
/// keys round-trip unchanged and in their original order; the document is
/// re-serialized with 2-space indentation and a trailing newline. A
/// malformed manifest is an error scoped to this repository.
pub fn patch_manifest(repo_dir: &Path, library: &str, version: &str) -> Result<PatchOutcome> {
    let path = repo_dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(PatchOutcome::NotApplicable(
            NotApplicableReason::ManifestMissing,
        ));
    }

    let contents = fs::read_to_string(&path)?;
    let mut doc: Value =
        serde_json::from_str(&contents).map_err(|e| BumpError::ManifestParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

    let Some(entry) = doc
        .get_mut(DEPENDENCIES_KEY)
        .and_then(|deps| deps.get_mut(library))
    else {
        return Ok(PatchOutcome::NotApplicable(
            NotApplicableReason::DependencyMissing,
        ));
    };

    if entry.as_str() == Some(version) {
        return Ok(PatchOutcome::NotApplicable(
            NotApplicableReason::AlreadyCurrent,
        ));
    }

    let previous = match &*entry {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    *entry = Value::String(version.to_string());

    let mut rendered = serde_json::to_string_pretty(&doc)?;
    rendered.push('\n');
    fs::write(&path, rendered)?;

    Ok(PatchOutcome::Applied { previous })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, contents: &str) {
        fs::write(dir.path().join(MANIFEST_FILE), contents).unwrap();
    }

    fn read_manifest(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap()
    }

    #[test]
    fn test_applied_rewrites_only_the_target_value() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            &dir,
            r#"{"name":"app","dependencies":{"left-pad":"1.0.0","libx":"1.0.0","right-pad":"3.4.5"},"scripts":{"test":"jest"}}"#,
        );

        let outcome = patch_manifest(dir.path(), "libx", "2.0.0").unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::Applied {
                previous: "1.0.0".into()
            }
        );

        let expected = concat!(
            "{\n",
            "  \"name\": \"app\",\n",
            "  \"dependencies\": {\n",
            "    \"left-pad\": \"1.0.0\",\n",
            "    \"libx\": \"2.0.0\",\n",
            "    \"right-pad\": \"3.4.5\"\n",
            "  },\n",
            "  \"scripts\": {\n",
            "    \"test\": \"jest\"\n",
            "  }\n",
            "}\n",
        );
        assert_eq!(read_manifest(&dir), expected);
    }

    #[test]
    fn test_missing_manifest_is_not_applicable() {
        let dir = TempDir::new().unwrap();

        let outcome = patch_manifest(dir.path(), "libx", "2.0.0").unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::NotApplicable(NotApplicableReason::ManifestMissing)
        );
        assert!(!dir.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_missing_dependency_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let original = r#"{
    "name": "app",
    "dependencies": {"other": "0.1.0"}
}"#;
        write_manifest(&dir, original);

        let outcome = patch_manifest(dir.path(), "libx", "2.0.0").unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::NotApplicable(NotApplicableReason::DependencyMissing)
        );
        // Byte-identical, including the original 4-space indentation.
        assert_eq!(read_manifest(&dir), original);
    }

    #[test]
    fn test_no_dependencies_map_is_not_applicable() {
        let dir = TempDir::new().unwrap();
        let original = r#"{"name": "app"}"#;
        write_manifest(&dir, original);

        let outcome = patch_manifest(dir.path(), "libx", "2.0.0").unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::NotApplicable(NotApplicableReason::DependencyMissing)
        );
        assert_eq!(read_manifest(&dir), original);
    }

    #[test]
    fn test_already_current_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let original = r#"{"dependencies":{"libx":"2.0.0"}}"#;
        write_manifest(&dir, original);

        let outcome = patch_manifest(dir.path(), "libx", "2.0.0").unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::NotApplicable(NotApplicableReason::AlreadyCurrent)
        );
        assert_eq!(read_manifest(&dir), original);
    }

    #[test]
    fn test_patch_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_manifest(&dir, r#"{"dependencies":{"libx":"1.0.0"}}"#);

        patch_manifest(dir.path(), "libx", "2.0.0").unwrap();
        let after_first = read_manifest(&dir);

        let outcome = patch_manifest(dir.path(), "libx", "2.0.0").unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::NotApplicable(NotApplicableReason::AlreadyCurrent)
        );
        assert_eq!(read_manifest(&dir), after_first);
    }

    #[test]
    fn test_malformed_manifest_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        write_manifest(&dir, "{ not json");

        let err = patch_manifest(dir.path(), "libx", "2.0.0").unwrap_err();
        assert!(matches!(err, BumpError::ManifestParse { .. }));
        // The broken file is left as-is.
        assert_eq!(read_manifest(&dir), "{ not json");
    }

    #[test]
    fn test_version_string_is_verbatim() {
        let dir = TempDir::new().unwrap();
        write_manifest(&dir, r#"{"dependencies":{"libx":"^1.0.0"}}"#);

        let outcome = patch_manifest(dir.path(), "libx", "not-even-semver").unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::Applied {
                previous: "^1.0.0".into()
            }
        );
        assert!(read_manifest(&dir).contains(r#""libx": "not-even-semver""#));
    }
}
