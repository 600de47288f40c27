//! Domain logic - pure tagging rules independent of the container toolchain

pub mod branch;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::{GitReference, ReferenceKind};
pub use prerelease::PreRelease;
pub use tag::{image_ref, TagList, LATEST};
pub use version::ReleaseVersion;
