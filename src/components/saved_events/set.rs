use crate::error::SiteResult;

/// Ordered set of bookmarked event identifiers
///
/// Insertion order is kept so lists render in a stable order. Sets stay
/// small (a handful of bookmarks), so membership is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedEventSet {
    ids: Vec<String>,
}

impl SavedEventSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from ids, keeping the first occurrence of duplicates
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Parse the persisted form, a JSON array of strings
    pub fn from_json(raw: &str) -> SiteResult<Self> {
        let ids: Vec<String> = serde_json::from_str(raw)?;
        Ok(Self::from_ids(ids))
    }

    pub fn to_json(&self) -> SiteResult<String> {
        Ok(serde_json::to_string(&self.ids)?)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|saved| saved == id)
    }

    /// Remove `id` if present, add it otherwise. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|saved| saved == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}
