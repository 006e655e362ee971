//! The source file carrying the hard-coded release version.
//!
//! The rewrite is split into a pure text transformation
//! ([`rewrite_version_lines`]) and the file I/O around it ([`VersionFile`]),
//! so the transformation can be tested without touching disk.

use crate::domain::ReleaseVersion;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Default repository-relative location of the version file
pub const DEFAULT_VERSION_FILE: &str = "roc/version.go";

/// Default name of the constant holding the version
pub const DEFAULT_VERSION_CONSTANT: &str = "bindingsVersion";

/// Result of rewriting version file content.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    /// Full file content after substitution
    pub content: String,
    /// Number of lines that matched the version assignment
    pub replaced: usize,
    /// Whether the content differs from the input
    pub changed: bool,
}

/// Builds the regex matching `var <constant> = "<anything>"` at the start of a line.
fn assignment_regex(constant: &str) -> Result<Regex> {
    let pattern = format!(r#"^(\s*var\s+{}\s*=\s*)"[^"]*""#, regex::escape(constant));
    Regex::new(&pattern).map_err(|e| {
        ReleaseError::version_file(format!("Invalid constant name '{}': {}", constant, e))
    })
}

/// Replaces the quoted value of every assignment to `constant` with `version`.
///
/// Lines are processed one at a time with their terminators (`\n` or `\r\n`)
/// carried over untouched, so every non-matching line is byte-identical in the
/// output. Anything following the closing quote on a matching line is kept.
///
/// # Returns
/// * `Ok(Rewrite)` - Rewritten content with match statistics
/// * `Err` - If no line assigns the constant
pub fn rewrite_version_lines(
    content: &str,
    constant: &str,
    version: &ReleaseVersion,
) -> Result<Rewrite> {
    let re = assignment_regex(constant)?;
    let mut output = String::with_capacity(content.len() + version.as_str().len());
    let mut replaced = 0;

    for line in content.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);

        match re.captures(body) {
            Some(caps) => {
                let whole = caps.get(0).map(|m| m.end()).unwrap_or(0);
                let lead = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                output.push_str(lead);
                output.push('"');
                output.push_str(version.as_str());
                output.push('"');
                output.push_str(&body[whole..]);
                replaced += 1;
            }
            None => output.push_str(body),
        }
        output.push_str(terminator);
    }

    if replaced == 0 {
        return Err(ReleaseError::version_file(format!(
            "no assignment to '{}' found",
            constant
        )));
    }

    let changed = output != content;
    Ok(Rewrite {
        content: output,
        replaced,
        changed,
    })
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, &line[body.len()..])
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, &line[body.len()..])
    } else {
        (line, "")
    }
}

/// Version file resolved against an explicit repository root.
#[derive(Debug, Clone)]
pub struct VersionFile {
    relative: PathBuf,
    path: PathBuf,
    constant: String,
}

impl VersionFile {
    /// Create a version file handle rooted at `base_dir`
    pub fn new(
        base_dir: &Path,
        relative: impl Into<PathBuf>,
        constant: impl Into<String>,
    ) -> Self {
        let relative = relative.into();
        VersionFile {
            path: base_dir.join(&relative),
            relative,
            constant: constant.into(),
        }
    }

    /// Path relative to the repository root, as staged in the index
    pub fn relative_path(&self) -> &Path {
        &self.relative
    }

    /// Absolute path on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compute the rewrite of the working copy without writing it
    pub fn plan(&self, version: &ReleaseVersion) -> Result<Rewrite> {
        let content = fs::read_to_string(&self.path)?;
        rewrite_version_lines(&content, &self.constant, version).map_err(|e| match e {
            ReleaseError::VersionFile(msg) => {
                ReleaseError::version_file(format!("{}: {}", self.relative.display(), msg))
            }
            other => other,
        })
    }

    /// Rewrite the file in place with `version`
    pub fn update(&self, version: &ReleaseVersion) -> Result<Rewrite> {
        let rewrite = self.plan(version)?;
        fs::write(&self.path, &rewrite.content)?;
        tracing::debug!(
            path = %self.path.display(),
            replaced = rewrite.replaced,
            changed = rewrite.changed,
            "rewrote version file"
        );
        Ok(rewrite)
    }
}
