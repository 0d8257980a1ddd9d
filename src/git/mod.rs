//! Local diff acquisition using libgit2
//!
//! Produces the unified diff text that the changeset parser consumes,
//! entirely from a local repository. Remote hosts are never contacted;
//! retrieving a pull request diff is a caller concern.

use anyhow::{Context as _, Result};
use git2::{DiffFormat, Repository, Tree};
use std::path::Path;
use tracing::debug;

/// The diff of the changes staged for commit (index vs HEAD).
pub fn staged_diff(path: &Path) -> Result<String> {
    let repo = open(path)?;
    let head = head_tree(&repo);
    let diff = repo
        .diff_tree_to_index(head.as_ref(), None, None)
        .context("failed to diff the index against HEAD")?;
    render(&diff)
}

/// The diff of the working tree against HEAD, staged changes included.
pub fn workdir_diff(path: &Path) -> Result<String> {
    let repo = open(path)?;
    let head = head_tree(&repo);
    let diff = repo
        .diff_tree_to_workdir_with_index(head.as_ref(), None)
        .context("failed to diff the working tree against HEAD")?;
    render(&diff)
}

fn open(path: &Path) -> Result<Repository> {
    let repo = Repository::discover(path)
        .with_context(|| format!("failed to open git repository at {}", path.display()))?;
    debug!(path = %repo.path().display(), "opened git repository");
    Ok(repo)
}

/// The tree at HEAD, or `None` on an unborn branch (everything staged is
/// then an addition).
fn head_tree(repo: &Repository) -> Option<Tree<'_>> {
    repo.head().ok().and_then(|head| head.peel_to_tree().ok())
}

/// Render a diff into the unified text format.
fn render(diff: &git2::Diff<'_>) -> Result<String> {
    let mut buffer = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => buffer.push(line.origin()),
            _ => {}
        }
        buffer.push_str(std::str::from_utf8(line.content()).unwrap_or(""));
        true
    })
    .context("failed to render diff")?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn commit_file(repo: &Repository, name: &str, contents: &str, message: &str) {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(name), contents).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let signature = git2::Signature::now("tester", "tester@example.com").unwrap();
        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap();
    }

    #[test]
    fn test_staged_diff_reflects_the_index() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "lorem.rb", "first line\n", "initial");

        fs::write(dir.path().join("lorem.rb"), "first line\nsecond line\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("lorem.rb")).unwrap();
        index.write().unwrap();

        let diff = staged_diff(dir.path()).unwrap();
        assert!(diff.contains("+second line"));
        assert!(diff.contains("lorem.rb"));
    }

    #[test]
    fn test_workdir_diff_sees_unstaged_changes() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "lorem.rb", "first line\n", "initial");

        fs::write(dir.path().join("lorem.rb"), "changed line\n").unwrap();

        let staged = staged_diff(dir.path()).unwrap();
        assert!(staged.is_empty());

        let workdir = workdir_diff(dir.path()).unwrap();
        assert!(workdir.contains("-first line"));
        assert!(workdir.contains("+changed line"));
    }

    #[test]
    fn test_missing_repository_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(staged_diff(dir.path()).is_err());
    }
}
