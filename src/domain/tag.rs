use crate::domain::ReleaseVersion;
use std::fmt;

/// Prefix placed in front of the normalized version to form a tag name
pub const TAG_PREFIX: &str = "v";

/// Represents a release tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Derive the tag for a release: "1.2.3" -> "v1.2.3"
    pub fn for_version(version: &ReleaseVersion) -> Self {
        Tag::new(format!("{}{}", TAG_PREFIX, version.as_str()))
    }

    /// Full reference name (e.g. "refs/tags/v1.2.3")
    pub fn refname(&self) -> String {
        format!("refs/tags/{}", self.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_new() {
        let tag = Tag::new("v1.2.3");
        assert_eq!(tag.name, "v1.2.3");
    }

    #[test]
    fn test_tag_for_version() {
        let version = ReleaseVersion::parse("2.5.0").unwrap();
        assert_eq!(Tag::for_version(&version).name, "v2.5.0");
    }

    #[test]
    fn test_tag_same_for_prefixed_input() {
        let plain = ReleaseVersion::parse("1.2.3").unwrap();
        let prefixed = ReleaseVersion::parse("v1.2.3").unwrap();
        assert_eq!(Tag::for_version(&plain), Tag::for_version(&prefixed));
    }

    #[test]
    fn test_tag_refname() {
        assert_eq!(Tag::new("v0.2.0").refname(), "refs/tags/v0.2.0");
    }
}
