use std::fmt;

use crate::domain::{GitReference, ReferenceKind};
use crate::resolver::{semver_version, TagOptions};

/// Warnings raised while resolving tags for unusual references.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Semver tagging is enabled but the tag is not a `vX.Y.Z` version
    SemverMismatch { tag: String },
    /// Reference is neither a branch nor a tag
    UnrecognizedReference { reference: String },
    /// Reference carries no name, so `latest` is used
    EmptyReferenceName { reference: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::SemverMismatch { tag } => {
                write!(
                    f,
                    "Tag '{}' is not a semantic version, semver tagging skipped",
                    tag
                )
            }
            BoundaryWarning::UnrecognizedReference { reference } => {
                write!(
                    f,
                    "Reference '{}' is neither a branch nor a tag, using its name as tag",
                    reference
                )
            }
            BoundaryWarning::EmptyReferenceName { reference } => {
                write!(f, "Reference '{}' has no name, using 'latest'", reference)
            }
        }
    }
}

/// Collect the warnings that apply to resolving `reference` with `options`
pub fn diagnose(reference: &str, options: &TagOptions) -> Vec<BoundaryWarning> {
    let parsed = GitReference::parse(reference);
    let mut warnings = Vec::new();

    if options.semver {
        if let Some(tag) = parsed.tag_name() {
            if semver_version(&parsed, options).is_none() {
                warnings.push(BoundaryWarning::SemverMismatch {
                    tag: tag.to_string(),
                });
            }
        }
    }

    if parsed.kind() == ReferenceKind::Other {
        warnings.push(BoundaryWarning::UnrecognizedReference {
            reference: reference.to_string(),
        });
    }

    let uses_name = match parsed.kind() {
        ReferenceKind::Tag => options.names,
        ReferenceKind::Branch | ReferenceKind::Other => !parsed.is_release_branch(),
    };
    if uses_name && semver_version(&parsed, options).is_none() && parsed.short_name().is_empty()
    {
        warnings.push(BoundaryWarning::EmptyReferenceName {
            reference: reference.to_string(),
        });
    }

    warnings
}
