use std::fmt;

/// Conditions a forced release tolerates instead of failing.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The version file already held this version, so no commit was made
    NothingToCommit { version: String },
    /// The tag will be force-pushed, replacing any remote tag of the same name
    RemoteTagOverwrite { tag: String, remote: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NothingToCommit { version } => {
                write!(
                    f,
                    "Nothing to commit for version {}, tagging current HEAD",
                    version
                )
            }
            BoundaryWarning::RemoteTagOverwrite { tag, remote } => {
                write!(
                    f,
                    "Force-pushing tag '{}' to '{}' replaces any remote tag of that name",
                    tag, remote
                )
            }
        }
    }
}
