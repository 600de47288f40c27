const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";

/// Kind of git reference that triggered a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Branch,
    Tag,
    /// Neither `refs/heads/` nor `refs/tags/`
    Other,
}

/// A git reference such as `refs/heads/main` or `refs/tags/v1.2.3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitReference {
    raw: String,
    kind: ReferenceKind,
}

impl GitReference {
    /// Classify a raw reference string
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = if raw.starts_with(HEADS_PREFIX) {
            ReferenceKind::Branch
        } else if raw.starts_with(TAGS_PREFIX) {
            ReferenceKind::Tag
        } else {
            ReferenceKind::Other
        };

        GitReference { raw, kind }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn is_tag(&self) -> bool {
        self.kind == ReferenceKind::Tag
    }

    /// Name with the `refs/heads/` or `refs/tags/` prefix removed
    pub fn short_name(&self) -> &str {
        match self.kind {
            ReferenceKind::Branch => &self.raw[HEADS_PREFIX.len()..],
            ReferenceKind::Tag => &self.raw[TAGS_PREFIX.len()..],
            ReferenceKind::Other => &self.raw,
        }
    }

    /// Tag name of a tag reference, `None` for branches and other refs
    pub fn tag_name(&self) -> Option<&str> {
        self.is_tag().then(|| self.short_name())
    }

    /// Short name usable as an image tag: every `/` becomes `-`
    pub fn normalized_name(&self) -> String {
        self.short_name().replace('/', "-")
    }

    /// Check if this is the main/master branch
    pub fn is_release_branch(&self) -> bool {
        self.kind == ReferenceKind::Branch && matches!(self.short_name(), "main" | "master")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_branch() {
        let reference = GitReference::parse("refs/heads/main");
        assert_eq!(reference.kind(), ReferenceKind::Branch);
        assert!(reference.is_release_branch());
    }

    #[test]
    fn test_master_branch() {
        assert!(GitReference::parse("refs/heads/master").is_release_branch());
    }

    #[test]
    fn test_develop_branch() {
        let reference = GitReference::parse("refs/heads/develop");
        assert!(!reference.is_release_branch());
        assert_eq!(reference.short_name(), "develop");
    }

    #[test]
    fn test_tag_named_main_is_not_release_branch() {
        let reference = GitReference::parse("refs/tags/main");
        assert!(reference.is_tag());
        assert!(!reference.is_release_branch());
        assert_eq!(reference.tag_name(), Some("main"));
    }

    #[test]
    fn test_nested_branch_is_not_release_branch() {
        assert!(!GitReference::parse("refs/heads/main/hotfix").is_release_branch());
    }

    #[test]
    fn test_normalized_name_replaces_every_slash() {
        let reference = GitReference::parse("refs/heads/feature/auth/login");
        assert_eq!(reference.normalized_name(), "feature-auth-login");
    }

    #[test]
    fn test_other_reference_keeps_raw_name() {
        let reference = GitReference::parse("refs/pull/42/merge");
        assert_eq!(reference.kind(), ReferenceKind::Other);
        assert_eq!(reference.normalized_name(), "refs-pull-42-merge");
        assert_eq!(reference.tag_name(), None);
    }

    #[test]
    fn test_prefix_must_be_at_start() {
        let reference = GitReference::parse("x/refs/heads/main");
        assert_eq!(reference.kind(), ReferenceKind::Other);
    }
}
