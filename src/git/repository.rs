use crate::error::{ReleaseError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Attempts made by the credentials callback before giving up.
///
/// libgit2 keeps calling the callback while authentication fails; without a
/// limit a bad key makes a push spin forever.
const MAX_CREDENTIAL_ATTEMPTS: usize = 4;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit(&self) -> Result<git2::Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }

    fn find_remote(&self, remote_name: &str) -> Result<git2::Remote<'_>> {
        self.repo.find_remote(remote_name).map_err(|e| {
            ReleaseError::remote(format!("Cannot find remote '{}': {}", remote_name, e))
        })
    }

    /// Callbacks supplying SSH agent, `~/.ssh` key or credential-helper auth
    fn credential_callbacks(&self) -> Result<git2::RemoteCallbacks<'static>> {
        let config = self.repo.config()?;
        let mut attempts = 0;
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            attempts += 1;
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    if attempts == 1 {
                        return Ok(cred);
                    }
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(cred) = git2::Cred::credential_helper(&config, url, username_from_url) {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        Ok(callbacks)
    }

    /// Object a reference points at on the remote, as advertised for a push
    fn remote_ref_target(&self, remote_name: &str, refname: &str) -> Result<Option<Oid>> {
        let mut remote = self.find_remote(remote_name)?;
        let callbacks = self.credential_callbacks()?;
        let connection = remote
            .connect_auth(git2::Direction::Push, Some(callbacks), None)
            .map_err(|e| {
                ReleaseError::remote(format!("Cannot connect to '{}': {}", remote_name, e))
            })?;

        let target = connection
            .list()?
            .iter()
            .find(|head| head.name() == refname)
            .map(|head| head.oid());
        Ok(target)
    }

    fn push(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.find_remote(remote_name)?;
        let mut callbacks = self.credential_callbacks()?;

        // Rejections are reported per reference rather than as a push error
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                tracing::warn!(refname, status, "remote rejected reference update");
                Err(git2::Error::from_str(&format!(
                    "Push rejected for {}: {}",
                    refname, status
                )))
            }
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        tracing::debug!(remote = remote_name, refspec, "pushing");
        match remote.push(&[refspec], Some(&mut push_options)) {
            Ok(()) => Ok(()),
            Err(e) if e.class() == git2::ErrorClass::Net => Err(ReleaseError::remote(format!(
                "Network error pushing to '{}': {}",
                remote_name, e
            ))),
            Err(e) => Err(ReleaseError::remote(format!(
                "Push of '{}' to '{}' failed: {}",
                refspec, remote_name, e
            ))),
        }
    }
}

impl super::Repository for Git2Repository {
    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| git2::Error::from_str("repository has no working tree").into())
    }

    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn head_file_content(&self, path: &Path) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head.peel_to_commit()?,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry = match head.tree()?.get_path(path) {
            Ok(entry) => entry,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;

        Ok(Some(String::from_utf8_lossy(blob.content()).into_owned()))
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(path)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<Oid> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        // An unborn branch has no parent to compare against
        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };

        if let Some(parent) = &parent {
            if parent.tree_id() == tree_id {
                return Err(ReleaseError::NothingToCommit(message.to_string()));
            }
        }

        let signature = self.repo.signature()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(oid)
    }

    fn create_tag(&self, name: &str, force: bool) -> Result<Oid> {
        let head = self.head_commit()?;

        match self.repo.tag_lightweight(name, head.as_object(), force) {
            Ok(_) => Ok(head.id()),
            Err(e) if e.code() == git2::ErrorCode::Exists => {
                Err(ReleaseError::TagExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn push_head(&self, remote: &str) -> Result<()> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(ReleaseError::remote(
                "HEAD is detached; cannot push the current branch",
            ));
        }
        let refname = head
            .name()
            .ok_or_else(|| ReleaseError::remote("HEAD reference name is not valid UTF-8"))?;

        self.push(remote, &format!("{}:{}", refname, refname))
    }

    fn push_tag(&self, remote: &str, tag_name: &str, force: bool) -> Result<()> {
        let refname = format!("refs/tags/{}", tag_name);

        // libgit2 only rejects non-fast-forward updates, so a remote tag on an
        // ancestor commit would be moved silently
        if !force {
            let local = self.repo.find_reference(&refname)?.target();
            if let Some(existing) = self.remote_ref_target(remote, &refname)? {
                if Some(existing) != local {
                    return Err(ReleaseError::remote(format!(
                        "Tag '{}' already exists on remote '{}' at {}; use --force to overwrite it",
                        tag_name, remote, existing
                    )));
                }
            }
        }

        let prefix = if force { "+" } else { "" };

        self.push(remote, &format!("{}{}:{}", prefix, refname, refname))
    }
}
