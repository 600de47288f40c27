use git2::Repository;

use crate::error::{PublishError, Result};

/// Pick the reference that triggered the release.
///
/// Order of precedence:
/// 1. Reference given explicitly (e.g. `--ref`)
/// 2. `GITHUB_REF` from the environment
/// 3. The checked-out branch of the git repository around the working directory
///
/// Empty values are skipped.
pub fn select_reference(explicit: Option<String>, env_reference: Option<String>) -> Result<String> {
    let given = explicit
        .into_iter()
        .chain(env_reference)
        .map(|reference| reference.trim().to_string())
        .find(|reference| !reference.is_empty());

    match given {
        Some(reference) => Ok(reference),
        None => head_reference(),
    }
}

/// Full name of the reference `HEAD` points to (e.g. `refs/heads/main`).
///
/// Discovers the git repository in the current directory or parent directories.
///
/// # Returns
/// * `Ok(String)` - Symbolic name of the checked-out branch
/// * `Err` - If not in a git repository or `HEAD` is detached
pub fn head_reference() -> Result<String> {
    let repo = Repository::discover(".").map_err(|e| {
        PublishError::config(format!(
            "No reference given (set GITHUB_REF or --ref) and not in a git repository: {}",
            e.message()
        ))
    })?;
    reference_of_head(&repo)
}

fn reference_of_head(repo: &Repository) -> Result<String> {
    if repo.head_detached()? {
        return Err(PublishError::config(
            "HEAD is detached; pass the reference with --ref",
        ));
    }

    let head = repo.find_reference("HEAD")?;
    head.symbolic_target()
        .map(str::to_string)
        .ok_or_else(|| PublishError::config("HEAD is not a symbolic reference"))
}
