use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Context used for the first token of every sentence.
pub const BEGIN_SENT: &str = "Begin_Sent";

/// Context under which the last tag of every sentence is counted.
pub const END_SENT: &str = "End_Sent";

/// Returns `true` if `tag` is one of the boundary sentinels.
pub fn is_sentinel(tag: &str) -> bool {
    tag == BEGIN_SENT || tag == END_SENT
}

/// The closed, ordered set of tags observed during training.
///
/// Order is first-seen corpus order. The decoder iterates tags in this
/// order, so it also fixes how ties between equal scores are broken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
    tags: Vec<String>,
    index: HashMap<String, usize>,
}

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tag` if unseen and return its index.
    pub fn insert(&mut self, tag: &str) -> usize {
        if let Some(&idx) = self.index.get(tag) {
            return idx;
        }
        let idx = self.tags.len();
        self.tags.push(tag.to_string());
        self.index.insert(tag.to_string(), idx);
        idx
    }

    /// Index of `tag`, if it belongs to the set.
    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.index.get(tag).copied()
    }

    /// Tag at `idx`.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.tags.get(idx).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate tags in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        let mut set = TagSet::new();
        for tag in &tags {
            set.insert(tag);
        }
        set
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.tags
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let set: TagSet = ["NN", "DT", "NN", "VBZ", "DT"].into_iter().collect();
        let tags: Vec<_> = set.iter().collect();
        assert_eq!(tags, vec!["NN", "DT", "VBZ"]);
        assert_eq!(set.index_of("VBZ"), Some(2));
        assert_eq!(set.get(1), Some("DT"));
        assert_eq!(set.index_of("JJ"), None);
    }

    #[test]
    fn sentinels_are_recognized() {
        assert!(is_sentinel(BEGIN_SENT));
        assert!(is_sentinel(END_SENT));
        assert!(!is_sentinel("NN"));
    }

    #[test]
    fn serializes_as_plain_list() {
        let set: TagSet = ["DT", "NN"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["DT","NN"]"#);
        let back: TagSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
