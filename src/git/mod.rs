//! Git operations abstraction layer
//!
//! This module provides a narrow trait over the repository operations a
//! release needs, allowing the release pipeline to run against a real
//! repository or a test double.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use release_tag::git::Repository;
//! # use std::path::Path;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! if !repo.tag_exists("v1.0.0")? {
//!     repo.stage(Path::new("roc/version.go"))?;
//!     repo.commit("Release 1.0.0")?;
//!     repo.create_tag("v1.0.0", false)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::path::{Path, PathBuf};

/// Repository operations used by a release
///
/// ## Error Handling
///
/// Implementations map underlying failures to [crate::error::ReleaseError].
/// Two conditions get dedicated variants because the release pipeline reacts
/// to them: [ReleaseError::NothingToCommit](crate::error::ReleaseError::NothingToCommit)
/// from [Repository::commit] and
/// [ReleaseError::TagExists](crate::error::ReleaseError::TagExists) from a
/// non-forced [Repository::create_tag].
pub trait Repository {
    /// Root of the working tree; relative paths are resolved against it
    fn workdir(&self) -> Result<PathBuf>;

    /// Check whether `refs/tags/<tag_name>` resolves
    ///
    /// # Returns
    /// * `Ok(true)` - The tag exists (lightweight or annotated)
    /// * `Ok(false)` - No such tag
    /// * `Err` - If the lookup itself fails
    fn tag_exists(&self, tag_name: &str) -> Result<bool>;

    /// Content of `path` as committed in HEAD's tree
    ///
    /// # Returns
    /// * `Ok(Some(content))` - The file exists at HEAD
    /// * `Ok(None)` - HEAD is unborn or does not contain `path`
    fn head_file_content(&self, path: &Path) -> Result<Option<String>>;

    /// Stage a single path, given relative to the working tree root
    fn stage(&self, path: &Path) -> Result<()>;

    /// Commit the index on top of HEAD
    ///
    /// # Returns
    /// * `Ok(Oid)` - The new commit
    /// * `Err(NothingToCommit)` - The index tree equals HEAD's tree
    /// * `Err` - Any other git failure
    fn commit(&self, message: &str) -> Result<Oid>;

    /// Create a lightweight tag on HEAD
    ///
    /// # Arguments
    /// * `name` - Tag name (e.g. "v1.2.3")
    /// * `force` - Overwrite an existing tag of the same name
    ///
    /// # Returns
    /// * `Ok(Oid)` - The tagged commit
    /// * `Err(TagExists)` - Tag exists and `force` is false
    fn create_tag(&self, name: &str, force: bool) -> Result<Oid>;

    /// Push the current branch to the same branch name on `remote`
    ///
    /// Fails on detached HEAD and on any rejected reference update.
    fn push_head(&self, remote: &str) -> Result<()>;

    /// Push a tag to `remote`
    ///
    /// Without `force`, a tag of the same name already on the remote at a
    /// different object is a [ReleaseError::Remote](crate::error::ReleaseError::Remote)
    /// and nothing is pushed. With `force` the remote tag is overwritten.
    fn push_tag(&self, remote: &str, tag_name: &str, force: bool) -> Result<()>;
}
