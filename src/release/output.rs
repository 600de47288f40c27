use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{PublishError, Result};

/// Name of the output carrying the primary tag
pub const TAG_OUTPUT: &str = "tag";

/// Receives the named values a release publishes
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// GitHub Actions outputs
///
/// Appends `name=value` lines to the file named by `GITHUB_OUTPUT`; without
/// that file the line goes to stdout.
#[derive(Debug, Clone, Default)]
pub struct GithubOutput {
    path: Option<PathBuf>,
}

impl GithubOutput {
    pub fn from_env() -> Self {
        let path = std::env::var_os("GITHUB_OUTPUT")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        GithubOutput { path }
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        GithubOutput {
            path: Some(path.into()),
        }
    }

    pub fn stdout() -> Self {
        GithubOutput { path: None }
    }
}

impl OutputSink for GithubOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        if name.contains('=') || value.contains('\n') {
            return Err(PublishError::output(format!(
                "cannot encode output '{}' on a single line",
                name
            )));
        }

        match &self.path {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        PublishError::output(format!("{}: {}", path.display(), e))
                    })?;
                writeln!(file, "{}={}", name, value)?;
            }
            None => println!("{}={}", name, value),
        }
        Ok(())
    }
}
