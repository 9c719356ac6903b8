//! Build provenance from source control
//!
//! Records which commit a census build was produced from, and whether the
//! working tree had local edits at the time.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ProvenanceError;

/// Environment variable that overrides the commit hash lookup
pub const COMMIT_SHA_ENV: &str = "COMMIT_SHA";

/// Read-only view of a source-control working tree
pub trait SourceControl {
    /// Root directory of the working tree
    fn root(&self) -> &Path;

    /// Full hash of the checked-out commit
    fn head_commit(&self) -> Result<String, ProvenanceError>;

    /// Whether tracked files differ from the checked-out commit
    fn is_dirty(&self) -> Result<bool, ProvenanceError>;
}

/// [`SourceControl`] backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Find the repository containing `start`
    ///
    /// Checks `start` and then each ancestor for a `.git` entry.
    pub fn discover(start: &Path) -> Result<Self, ProvenanceError> {
        start
            .ancestors()
            .find(|dir| dir.join(".git").exists())
            .map(|root| Self {
                root: root.to_path_buf(),
            })
            .ok_or_else(|| ProvenanceError::RepositoryNotFound {
                start: start.to_path_buf(),
            })
    }

    fn run(&self, args: &[&str]) -> Result<String, ProvenanceError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(ProvenanceError::GitCommand {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl SourceControl for GitCli {
    fn root(&self) -> &Path {
        &self.root
    }

    fn head_commit(&self) -> Result<String, ProvenanceError> {
        self.run(&["rev-parse", "HEAD"])
    }

    fn is_dirty(&self) -> Result<bool, ProvenanceError> {
        let status = self.run(&["status", "--porcelain", "--untracked-files=no"])?;
        Ok(!status.is_empty())
    }
}

/// Open the repository containing `start`
pub fn open_repository(start: &Path) -> Result<Box<dyn SourceControl>, ProvenanceError> {
    let repo = GitCli::discover(start)?;
    log::debug!("using git repository at {}", repo.root().display());
    Ok(Box::new(repo))
}

/// Commit hash of the current build
///
/// Returns the `COMMIT_SHA` environment variable when set, otherwise the
/// `HEAD` commit of the repository containing the working directory.
pub fn git_commit_sha() -> Result<String, ProvenanceError> {
    resolve_commit_sha(env::var(COMMIT_SHA_ENV).ok(), env::current_dir)
}

/// [`git_commit_sha`] with an explicit override and start directory
///
/// The repository is only opened when no override is given.
pub fn git_commit_sha_from(
    env_override: Option<String>,
    start: &Path,
) -> Result<String, ProvenanceError> {
    resolve_commit_sha(env_override, || Ok(start.to_path_buf()))
}

// `start` is only evaluated when there is no override
fn resolve_commit_sha<F>(env_override: Option<String>, start: F) -> Result<String, ProvenanceError>
where
    F: FnOnce() -> io::Result<PathBuf>,
{
    if let Some(sha) = env_override {
        log::debug!("commit hash taken from {COMMIT_SHA_ENV}");
        return Ok(sha);
    }
    open_repository(&start()?)?.head_commit()
}

/// Whether the repository containing the working directory has uncommitted
/// changes to tracked files
pub fn is_git_repo_dirty() -> Result<bool, ProvenanceError> {
    is_git_repo_dirty_from(&env::current_dir()?)
}

/// [`is_git_repo_dirty`] starting from `start`
pub fn is_git_repo_dirty_from(start: &Path) -> Result<bool, ProvenanceError> {
    open_repository(start)?.is_dirty()
}

/// Source-control state recorded alongside a build
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BuildProvenance {
    pub commit_sha: String,
    pub dirty: bool,
}

impl BuildProvenance {
    /// Gather provenance for the working directory
    pub fn collect() -> Result<Self, ProvenanceError> {
        Ok(Self {
            commit_sha: git_commit_sha()?,
            dirty: is_git_repo_dirty()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("census-util-{label}-{:016x}", rand::random::<u64>()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["-c", "user.name=census", "-c", "user.email=census@localhost"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_override_skips_repository() {
        let dir = scratch_dir("override");
        let sha = git_commit_sha_from(Some("abc123".to_string()), &dir).unwrap();
        assert_eq!(sha, "abc123");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_override_does_not_need_working_directory() {
        let gone = || Err(io::Error::new(io::ErrorKind::NotFound, "working directory removed"));

        assert_eq!(resolve_commit_sha(Some("def456".to_string()), gone).unwrap(), "def456");
        assert!(matches!(
            resolve_commit_sha(None, gone),
            Err(ProvenanceError::Io(_))
        ));
    }

    #[test]
    fn test_missing_repository() {
        let dir = scratch_dir("norepo");
        if GitCli::discover(&dir).is_ok() {
            // temp dir lives inside a checkout on this machine
            return;
        }

        assert!(matches!(
            git_commit_sha_from(None, &dir),
            Err(ProvenanceError::RepositoryNotFound { .. })
        ));
        assert!(matches!(
            is_git_repo_dirty_from(&dir),
            Err(ProvenanceError::RepositoryNotFound { .. })
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_clean_and_dirty_repository() {
        let dir = scratch_dir("repo");
        if !git(&dir, &["init", "-q"]) {
            // no git executable
            fs::remove_dir_all(dir).unwrap();
            return;
        }

        fs::write(dir.join("schema.txt"), "v1\n").unwrap();
        assert!(git(&dir, &["add", "schema.txt"]));
        assert!(git(&dir, &["commit", "-q", "-m", "initial"]));

        let nested = dir.join("builder");
        fs::create_dir_all(&nested).unwrap();

        let sha = git_commit_sha_from(None, &nested).unwrap();
        assert_eq!(sha.len(), 40);
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!is_git_repo_dirty_from(&nested).unwrap());

        // untracked files do not count
        fs::write(dir.join("scratch.txt"), "tmp\n").unwrap();
        assert!(!is_git_repo_dirty_from(&dir).unwrap());

        fs::write(dir.join("schema.txt"), "v2\n").unwrap();
        assert!(is_git_repo_dirty_from(&dir).unwrap());

        fs::remove_dir_all(dir).unwrap();
    }
}
