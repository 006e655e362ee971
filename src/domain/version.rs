use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;

/// Accepted release version input: optional `v` prefix and three numeric components.
const VERSION_PATTERN: &str = r"^v?[0-9]+\.[0-9]+\.[0-9]+$";

/// A validated, normalized release version (e.g. "1.2.3", never "v1.2.3").
///
/// Components are kept as typed so arbitrarily long digit runs survive unchanged;
/// no ordering between versions is implied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion {
    version: String,
}

impl ReleaseVersion {
    /// Validate user input and strip an optional leading `v`
    pub fn parse(input: &str) -> Result<Self> {
        if !is_valid_version(input) {
            return Err(ReleaseError::format(format!(
                "version \"{}\" is not in correct format. Correct format is \"x.y.z\"",
                input
            )));
        }

        let version = input.strip_prefix('v').unwrap_or(input);
        Ok(ReleaseVersion {
            version: version.to_string(),
        })
    }

    /// The canonical version text without prefix
    pub fn as_str(&self) -> &str {
        &self.version
    }

    /// Commit message recorded for this release
    pub fn commit_message(&self) -> String {
        format!("Release {}", self.version)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

/// Check input against `v?X.Y.Z`
pub fn is_valid_version(input: &str) -> bool {
    if let Ok(re) = Regex::new(VERSION_PATTERN) {
        re.is_match(input)
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_and_prefixed() {
        assert!(is_valid_version("1.2.3"));
        assert!(is_valid_version("v1.2.3"));
        assert!(is_valid_version("0.0.0"));
        assert!(is_valid_version("10.200.3000"));
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "", "2.5", "1.2.3.4", "V1.2.3", "vv1.2.3", " 1.2.3", "1.2.3 ", "1.2.3\n", "1.2.x",
            "1..3", "-1.2.3", "1.2.3-rc1", "release-1.2.3", "v", "١.٢.٣",
        ] {
            assert!(!is_valid_version(input), "should reject {:?}", input);
        }
    }

    #[test]
    fn test_normalization_strips_prefix() {
        let plain = ReleaseVersion::parse("1.2.3").unwrap();
        let prefixed = ReleaseVersion::parse("v1.2.3").unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_str(), "1.2.3");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = ReleaseVersion::parse("v4.5.6").unwrap();
        let twice = ReleaseVersion::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_large_components_kept_verbatim() {
        let v = ReleaseVersion::parse("99999999999999999999.0.01").unwrap();
        assert_eq!(v.to_string(), "99999999999999999999.0.01");
    }

    #[test]
    fn test_commit_message() {
        let v = ReleaseVersion::parse("2.5.0").unwrap();
        assert_eq!(v.commit_message(), "Release 2.5.0");
    }

    #[test]
    fn test_parse_error_mentions_input() {
        let err = ReleaseVersion::parse("2.5").unwrap_err();
        assert!(matches!(err, ReleaseError::Format(_)));
        assert!(err.to_string().contains("\"2.5\""));
        assert!(err.to_string().contains("x.y.z"));
    }
}
