use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use git2::Oid;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
struct MockState {
    head: Option<Oid>,
    next_commit: u32,
    commits: Vec<(Oid, String)>,
    staged: HashMap<PathBuf, String>,
    committed: HashMap<PathBuf, String>,
    tags: HashMap<String, Oid>,
    remote_tags: HashMap<(String, String), Oid>,
    pushes: Vec<String>,
}

/// In-memory repository for testing without actual git operations.
///
/// File contents are read from `workdir` when staged, so "nothing to commit"
/// is detected the same way a real index would detect it.
pub struct MockRepository {
    workdir: PathBuf,
    reject_pushes: bool,
    state: RefCell<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        MockRepository {
            workdir: workdir.into(),
            reject_pushes: false,
            state: RefCell::new(MockState::default()),
        }
    }

    /// Make every push fail as if the remote rejected it
    pub fn rejecting_pushes(mut self) -> Self {
        self.reject_pushes = true;
        self
    }

    /// Record the current on-disk content of `path` as already committed
    pub fn snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(self.workdir.join(path))?;
        self.state
            .borrow_mut()
            .committed
            .insert(path.to_path_buf(), content);
        Ok(())
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&self, name: impl Into<String>, oid: Oid) {
        self.state.borrow_mut().tags.insert(name.into(), oid);
    }

    /// Commit a tag currently points at
    pub fn tag_target(&self, name: &str) -> Option<Oid> {
        self.state.borrow().tags.get(name).copied()
    }

    /// Pretend `remote` already advertises `name` at `oid`
    pub fn add_remote_tag(&self, remote: &str, name: &str, oid: Oid) {
        self.state
            .borrow_mut()
            .remote_tags
            .insert((remote.to_string(), name.to_string()), oid);
    }

    /// Object a tag points at on `remote`, as far as this mock knows
    pub fn remote_tag_target(&self, remote: &str, name: &str) -> Option<Oid> {
        self.state
            .borrow()
            .remote_tags
            .get(&(remote.to_string(), name.to_string()))
            .copied()
    }

    /// Current HEAD commit
    pub fn head(&self) -> Option<Oid> {
        self.state.borrow().head
    }

    /// Messages of all commits made through this mock, oldest first
    pub fn commit_messages(&self) -> Vec<String> {
        self.state
            .borrow()
            .commits
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Pushed refspecs in the form "<remote> <refspec>"
    pub fn pushes(&self) -> Vec<String> {
        self.state.borrow().pushes.clone()
    }

    fn record_push(&self, remote: &str, refspec: String) -> Result<()> {
        if self.reject_pushes {
            return Err(ReleaseError::remote(format!(
                "Push rejected for {} by '{}'",
                refspec, remote
            )));
        }
        self.state
            .borrow_mut()
            .pushes
            .push(format!("{} {}", remote, refspec));
        Ok(())
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }

    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        Ok(self.state.borrow().tags.contains_key(tag_name))
    }

    fn head_file_content(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.state.borrow().committed.get(path).cloned())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(self.workdir.join(path))?;
        self.state
            .borrow_mut()
            .staged
            .insert(path.to_path_buf(), content);
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<Oid> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let changed = state
            .staged
            .iter()
            .any(|(path, content)| state.committed.get(path) != Some(content));
        if !changed {
            return Err(ReleaseError::NothingToCommit(message.to_string()));
        }

        let staged: Vec<(PathBuf, String)> = state.staged.drain().collect();
        state.committed.extend(staged);

        state.next_commit += 1;
        let mut bytes = [0u8; 20];
        bytes[16..].copy_from_slice(&state.next_commit.to_be_bytes());
        let oid = Oid::from_bytes(&bytes)?;
        state.commits.push((oid, message.to_string()));
        state.head = Some(oid);
        Ok(oid)
    }

    fn create_tag(&self, name: &str, force: bool) -> Result<Oid> {
        let mut state = self.state.borrow_mut();
        let head = state
            .head
            .ok_or_else(|| git2::Error::from_str("reference 'refs/heads/main' not found"))?;

        if state.tags.contains_key(name) && !force {
            return Err(ReleaseError::TagExists(name.to_string()));
        }
        state.tags.insert(name.to_string(), head);
        Ok(head)
    }

    fn push_head(&self, remote: &str) -> Result<()> {
        self.record_push(remote, "refs/heads/main:refs/heads/main".to_string())
    }

    fn push_tag(&self, remote: &str, tag_name: &str, force: bool) -> Result<()> {
        let key = (remote.to_string(), tag_name.to_string());
        let local = self.tag_target(tag_name);
        let existing = self.state.borrow().remote_tags.get(&key).copied();
        if let Some(existing) = existing {
            if !force && Some(existing) != local {
                return Err(ReleaseError::remote(format!(
                    "Tag '{}' already exists on remote '{}' at {}; use --force to overwrite it",
                    tag_name, remote, existing
                )));
            }
        }

        let prefix = if force { "+" } else { "" };
        self.record_push(
            remote,
            format!("{}refs/tags/{}:refs/tags/{}", prefix, tag_name, tag_name),
        )?;
        if let Some(local) = local {
            self.state.borrow_mut().remote_tags.insert(key, local);
        }
        Ok(())
    }
}
