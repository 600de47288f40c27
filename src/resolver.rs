//! Translation of a git reference into the image tags to publish.

use crate::domain::{GitReference, ReleaseVersion, TagList, LATEST};

/// Switches that change how references map to tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagOptions {
    /// Split `vX.Y.Z` tag references into `X.Y.Z`, `X.Y`, `X`
    pub semver: bool,
    /// Publish tag references under their own name instead of `latest`
    pub names: bool,
}

/// Resolves the ordered list of tags for a git reference.
///
/// Rules are tried in order and the first match wins:
/// 1. with `semver`, a tag reference shaped `v?X.Y.Z(-pre)?` yields its version
///    aliases (a pre-release is never split);
/// 2. `main`, `master`, and tag references without `names` yield `latest`;
/// 3. anything else yields the reference name with `/` replaced by `-`.
///
/// Never fails: unrecognised references fall back to rule 3, and an empty name
/// falls back to `latest`.
pub fn resolve(reference: &str, options: &TagOptions) -> TagList {
    let reference = GitReference::parse(reference);

    if let Some(version) = semver_version(&reference, options) {
        if let Some(tags) = TagList::from_candidates(version.aliases()) {
            return tags;
        }
    }

    if reference.is_release_branch() || (reference.is_tag() && !options.names) {
        return TagList::single(LATEST);
    }

    let name = reference.normalized_name();
    if name.is_empty() {
        return TagList::single(LATEST);
    }
    TagList::single(name)
}

/// Version carried by the reference when semver tagging applies to it
pub(crate) fn semver_version(
    reference: &GitReference,
    options: &TagOptions,
) -> Option<ReleaseVersion> {
    if !options.semver {
        return None;
    }
    reference.tag_name().and_then(ReleaseVersion::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semver() -> TagOptions {
        TagOptions {
            semver: true,
            names: false,
        }
    }

    fn tags(reference: &str, options: TagOptions) -> Vec<String> {
        resolve(reference, &options).as_slice().to_vec()
    }

    #[test]
    fn test_main_and_master_are_latest() {
        assert_eq!(tags("refs/heads/main", TagOptions::default()), ["latest"]);
        assert_eq!(tags("refs/heads/master", TagOptions::default()), ["latest"]);
    }

    #[test]
    fn test_branch_uses_its_name() {
        assert_eq!(tags("refs/heads/myBranch", TagOptions::default()), ["myBranch"]);
    }

    #[test]
    fn test_branch_slashes_become_hyphens() {
        assert_eq!(
            tags("refs/heads/myBranch/withDash", TagOptions::default()),
            ["myBranch-withDash"]
        );
        assert_eq!(
            tags("refs/heads/a/b/c", TagOptions::default()),
            ["a-b-c"]
        );
    }

    #[test]
    fn test_tag_is_latest_without_names() {
        assert_eq!(tags("refs/tags/myRelease", TagOptions::default()), ["latest"]);
    }

    #[test]
    fn test_tag_uses_name_with_names() {
        let options = TagOptions {
            semver: false,
            names: true,
        };
        assert_eq!(tags("refs/tags/myRelease", options), ["myRelease"]);
        assert_eq!(tags("refs/tags/release/2024", options), ["release-2024"]);
    }

    #[test]
    fn test_names_does_not_affect_branches() {
        let options = TagOptions {
            semver: false,
            names: true,
        };
        assert_eq!(tags("refs/heads/main", options), ["latest"]);
        assert_eq!(tags("refs/heads/dev", options), ["dev"]);
    }

    #[test]
    fn test_semver_splits_stable_version() {
        assert_eq!(tags("refs/tags/v1.2.3", semver()), ["1.2.3", "1.2", "1"]);
    }

    #[test]
    fn test_semver_without_v_prefix() {
        assert_eq!(tags("refs/tags/1.2.34", semver()), ["1.2.34", "1.2", "1"]);
    }

    #[test]
    fn test_semver_pre_release_is_single_tag() {
        assert_eq!(tags("refs/tags/v1.1.1-alpha.1", semver()), ["1.1.1-alpha.1"]);
    }

    #[test]
    fn test_semver_takes_precedence_over_names() {
        let options = TagOptions {
            semver: true,
            names: true,
        };
        assert_eq!(tags("refs/tags/v2.0.0", options), ["2.0.0", "2.0", "2"]);
    }

    #[test]
    fn test_semver_mismatch_falls_through() {
        assert_eq!(tags("refs/tags/no_semver", semver()), ["latest"]);
        let options = TagOptions {
            semver: true,
            names: true,
        };
        assert_eq!(tags("refs/tags/no_semver", options), ["no_semver"]);
    }

    #[test]
    fn test_semver_ignores_branches() {
        assert_eq!(tags("refs/heads/v1.2.3", semver()), ["v1.2.3"]);
    }

    #[test]
    fn test_semver_disabled_keeps_latest() {
        assert_eq!(tags("refs/tags/v1.2.34", TagOptions::default()), ["latest"]);
    }

    #[test]
    fn test_other_reference_falls_back_to_name() {
        assert_eq!(
            tags("refs/pull/7/merge", TagOptions::default()),
            ["refs-pull-7-merge"]
        );
    }

    #[test]
    fn test_empty_name_falls_back_to_latest() {
        assert_eq!(tags("", TagOptions::default()), ["latest"]);
        assert_eq!(tags("refs/heads/", TagOptions::default()), ["latest"]);
        let options = TagOptions {
            semver: false,
            names: true,
        };
        assert_eq!(tags("refs/tags/", options), ["latest"]);
    }
}
