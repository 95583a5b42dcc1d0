//! Portfolio content loading
//!
//! Content comes from a JSON or YAML file named in the config, or from the
//! copy bundled into the binary.

use crate::model::content::{PortfolioContent, ProfileKind};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Content shipped with the binary
pub const BUNDLED_CONTENT: &str = include_str!("../../assets/content.json");

/// Parse the bundled content
pub fn bundled_content() -> Result<PortfolioContent> {
    let content: PortfolioContent =
        serde_json::from_str(BUNDLED_CONTENT).context("Failed to parse bundled content")?;
    validate(&content)?;
    Ok(content)
}

/// Load content from `path`, choosing the format by extension
pub fn load_content(path: &Path) -> Result<PortfolioContent> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read content file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let content: PortfolioContent = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse YAML content {}", path.display()))?,
        _ => serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse JSON content {}", path.display()))?,
    };

    validate(&content)?;
    Ok(content)
}

/// Load from `path` when given, falling back to the bundled content.
/// The error of a failed custom load is returned alongside the fallback.
pub fn load_or_bundled(path: Option<&Path>) -> Result<(PortfolioContent, Option<String>)> {
    let Some(path) = path else {
        return Ok((bundled_content()?, None));
    };

    match load_content(path) {
        Ok(content) => {
            tracing::info!(path = %path.display(), "content loaded");
            Ok((content, None))
        }
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "falling back to bundled content");
            Ok((bundled_content()?, Some(format!("{:#}", e))))
        }
    }
}

/// Both profiles must be present exactly once
fn validate(content: &PortfolioContent) -> Result<()> {
    for kind in ProfileKind::all() {
        let count = content.profiles.iter().filter(|p| p.kind == kind).count();
        if count != 1 {
            bail!(
                "Expected exactly one '{}' profile, found {}",
                kind.slug(),
                count
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_content_is_valid() {
        let content = bundled_content().unwrap();
        assert!(content.profile(ProfileKind::Developer).is_some());
        assert!(content.profile(ProfileKind::MedicalRepresentative).is_some());
        assert!(!content.tech_stack.is_empty());
        assert!(!content.companies_for(ProfileKind::MedicalRepresentative).is_empty());
    }

    #[test]
    fn test_load_yaml_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.yaml");
        fs::write(
            &path,
            r#"
profiles:
  - kind: developer
    name: Sam
    title: Developer
  - kind: medical-representative
    name: Sam
    title: Representative
education:
  - institution: Uni
    degree: BSc
    profiles: [developer]
    start: 2010-09-01
    end: 2014-06-30
"#,
        )
        .unwrap();

        let content = load_content(&path).unwrap();
        assert_eq!(content.profiles.len(), 2);
        assert_eq!(content.education.len(), 1);
        assert!(content.companies.is_empty());
    }

    #[test]
    fn test_missing_profile_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        fs::write(
            &path,
            r#"{ "profiles": [ { "kind": "developer", "name": "Sam", "title": "Dev" } ] }"#,
        )
        .unwrap();

        let err = load_content(&path).unwrap_err();
        assert!(err.to_string().contains("medical-representative"));
    }

    #[test]
    fn test_fallback_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let (content, error) = load_or_bundled(Some(&path)).unwrap();
        assert_eq!(content, bundled_content().unwrap());
        assert!(error.unwrap().contains("missing.json"));
    }

    #[test]
    fn test_no_path_uses_bundled() {
        let (_, error) = load_or_bundled(None).unwrap();
        assert!(error.is_none());
    }
}
