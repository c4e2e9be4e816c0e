//! Version-control metadata probe.
//!
//! Reads the current branch and an exact tag on `HEAD`. Every failure
//! means "metadata unavailable"; nothing here can fail a build.

use std::path::Path;

use git2::{DescribeOptions, Repository};

/// What git knows about the checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInfo {
    /// Short branch name, `None` on a detached `HEAD`
    pub branch: Option<String>,
    /// Tag pointing exactly at `HEAD`
    pub tag: Option<String>,
    /// Full commit hash of `HEAD`
    pub commit: String,
}

impl GitInfo {
    /// Probe the repository containing `root`. Returns `None` on any error.
    pub fn probe(root: &Path) -> Option<GitInfo> {
        match Self::try_probe(root) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("git metadata unavailable: {}", e);
                None
            }
        }
    }

    fn try_probe(root: &Path) -> Result<GitInfo, git2::Error> {
        let repo = Repository::discover(root)?;
        let head = repo.head()?;

        let branch = if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        };
        let commit = head.peel_to_commit()?.id().to_string();

        let mut opts = DescribeOptions::new();
        opts.describe_tags().max_candidates_tags(0);
        let tag = repo
            .describe(&opts)
            .and_then(|d| d.format(None))
            .ok();

        Ok(GitInfo {
            branch,
            tag,
            commit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_probe_outside_repository() {
        let tmp = TempDir::new().unwrap();
        // A temp dir may still sit inside some repository; only assert it
        // does not panic and, when absent, reports nothing.
        if Repository::discover(tmp.path()).is_err() {
            assert_eq!(GitInfo::probe(tmp.path()), None);
        }
    }

    #[test]
    fn test_probe_empty_repository() {
        let tmp = TempDir::new().unwrap();
        Repository::init(tmp.path()).unwrap();
        // Unborn HEAD has no commit to describe.
        assert_eq!(GitInfo::probe(tmp.path()), None);
    }

    #[test]
    fn test_probe_tagged_commit() {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::init(tmp.path()).unwrap();
        let sig = git2::Signature::now("dev", "dev@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
            .unwrap();
        let obj = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight("v0.1", &obj, false).unwrap();

        let info = GitInfo::probe(tmp.path()).unwrap();
        assert_eq!(info.commit, oid.to_string());
        assert_eq!(info.tag.as_deref(), Some("v0.1"));
        assert!(info.branch.is_some());
    }
}
