use std::fmt;

/// Tag used when no more specific tag applies
pub const LATEST: &str = "latest";

/// Ordered, deduplicated, non-empty list of image tags
///
/// The first tag is the primary tag: it is inspected for the image digest and
/// reported as the published output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    /// Create a tag list holding a single tag
    pub fn single(tag: impl Into<String>) -> Self {
        TagList {
            tags: vec![tag.into()],
        }
    }

    /// Create a tag list from candidates, keeping first occurrences in order
    ///
    /// Returns `None` when no candidate is left.
    pub fn from_candidates<I, S>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = Vec::new();
        for candidate in candidates {
            let candidate = candidate.into();
            if !tags.contains(&candidate) {
                tags.push(candidate);
            }
        }

        if tags.is_empty() {
            None
        } else {
            Some(TagList { tags })
        }
    }

    pub fn primary(&self) -> &str {
        &self.tags[0]
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// A tag list always holds at least one tag
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// Full image references (`repository:tag`) in list order
    pub fn image_refs(&self, repository: &str) -> Vec<String> {
        self.iter()
            .map(|tag| image_ref(repository, tag))
            .collect()
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tags.join(", "))
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// Format `repository:tag`
pub fn image_ref(repository: &str, tag: &str) -> String {
    format!("{}:{}", repository, tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let tags = TagList::single(LATEST);
        assert_eq!(tags.primary(), "latest");
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_from_candidates_keeps_order() {
        let tags = TagList::from_candidates(["1.2.3", "1.2", "1"]).unwrap();
        assert_eq!(tags.as_slice(), &["1.2.3", "1.2", "1"]);
        assert_eq!(tags.primary(), "1.2.3");
    }

    #[test]
    fn test_from_candidates_deduplicates() {
        let tags = TagList::from_candidates(["a", "b", "a"]).unwrap();
        assert_eq!(tags.as_slice(), &["a", "b"]);
    }

    #[test]
    fn test_from_candidates_empty() {
        assert!(TagList::from_candidates(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_image_refs() {
        let tags = TagList::from_candidates(["1.2", "1"]).unwrap();
        assert_eq!(
            tags.image_refs("my/repository"),
            vec!["my/repository:1.2", "my/repository:1"]
        );
    }

    #[test]
    fn test_display() {
        let tags = TagList::from_candidates(["1.2.3", "1.2", "1"]).unwrap();
        assert_eq!(tags.to_string(), "1.2.3, 1.2, 1");
    }
}
