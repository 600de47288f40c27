use crate::domain::prerelease::{is_digits, PreRelease};
use std::fmt;

/// Release version carried by a tag name: `v?MAJOR.MINOR.PATCH(-PRERELEASE)?`
///
/// Components are kept as the digit strings that appeared in the tag so that
/// formatting never rewrites them (`01` stays `01`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub pre_release: Option<PreRelease>,
}

impl ReleaseVersion {
    /// Parse version from a tag name (e.g., "v1.2.3" -> ReleaseVersion(1,2,3))
    ///
    /// Only a lowercase `v` prefix is accepted. Returns `None` when the name does
    /// not follow the pattern.
    pub fn parse(tag: &str) -> Option<Self> {
        let clean_tag = tag.strip_prefix('v').unwrap_or(tag);

        let (core, pre_release) = match clean_tag.split_once('-') {
            Some((core, suffix)) => (core, Some(PreRelease::parse(suffix)?)),
            None => (clean_tag, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 || !parts.iter().all(|part| is_digits(part)) {
            return None;
        }

        Some(ReleaseVersion {
            major: parts[0].to_string(),
            minor: parts[1].to_string(),
            patch: parts[2].to_string(),
            pre_release,
        })
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Progressively shorter prefixes of the stable version
    ///
    /// `1.2.3` -> `["1.2.3", "1.2", "1"]`. Each step drops the trailing
    /// `.component`. Pre-release versions are not split.
    pub fn aliases(&self) -> Vec<String> {
        let full = self.to_string();
        if self.is_pre_release() {
            return vec![full];
        }

        let mut aliases = vec![full.clone()];
        let mut current = full.as_str();
        while let Some(idx) = current.rfind('.') {
            current = &current[..idx];
            aliases.push(current.to_string());
        }
        aliases
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{}", pre_release)?;
        }
        Ok(())
    }
}
