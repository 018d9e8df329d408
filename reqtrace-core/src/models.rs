use indexmap::{IndexMap, IndexSet};

/// A requirement merged from every row and reference that mentions its ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Identifier such as `SYS-FUNC-001`
    pub id: String,
    /// Distinct candidate descriptions in order of first occurrence
    pub texts: IndexSet<String>,
    /// IDs of requirements this one traces up to
    pub parents: IndexSet<String>,
    /// IDs of functional children
    pub children: IndexSet<String>,
    /// The description chosen during finalization
    text: Option<String>,
}

impl Requirement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            texts: IndexSet::new(),
            parents: IndexSet::new(),
            children: IndexSet::new(),
            text: None,
        }
    }

    /// Adds a candidate description. Empty text is ignored.
    pub fn add_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.texts.insert(text.to_string())
    }

    pub fn has_multiple_parents(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn has_multiple_texts(&self) -> bool {
        self.texts.len() > 1
    }

    /// The final description, available once the requirement is finalized
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub(crate) fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }
}

/// Run-wide mapping from requirement ID to requirement.
///
/// Iteration follows first-mention order so interactive prompts and the
/// exported file come out the same way for the same workbook.
#[derive(Debug, Clone, Default)]
pub struct RequirementRegistry {
    requirements: IndexMap<String, Requirement>,
}

impl RequirementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the requirement with this ID, creating it on first mention
    pub fn get_or_create(&mut self, id: &str) -> &mut Requirement {
        self.requirements
            .entry(id.to_string())
            .or_insert_with(|| Requirement::new(id))
    }

    pub fn get(&self, id: &str) -> Option<&Requirement> {
        self.requirements.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.requirements.contains_key(id)
    }

    /// Adds a candidate text to the requirement, creating it if needed
    pub fn add_text(&mut self, id: &str, text: &str) -> bool {
        self.get_or_create(id).add_text(text)
    }

    /// Records `parent_id` as a parent of `child_id`, updating both ends.
    ///
    /// Returns true if the link was not already present.
    pub fn link(&mut self, parent_id: &str, child_id: &str) -> bool {
        let added_child = self
            .get_or_create(parent_id)
            .children
            .insert(child_id.to_string());
        let added_parent = self
            .get_or_create(child_id)
            .parents
            .insert(parent_id.to_string());
        added_child || added_parent
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Requirement> {
        self.requirements.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_reuses_entry() {
        let mut registry = RequirementRegistry::new();
        registry.get_or_create("SYS-A-001").add_text("Do X");
        registry.get_or_create("SYS-A-001").add_text("Do Y");

        assert_eq!(registry.len(), 1);
        let req = registry.get("SYS-A-001").unwrap();
        assert_eq!(req.texts.len(), 2);
        assert!(req.has_multiple_texts());
    }

    #[test]
    fn test_add_text_deduplicates_and_skips_empty() {
        let mut req = Requirement::new("SYS-A-001");

        assert!(req.add_text("Do X"));
        assert!(!req.add_text("Do X"));
        assert!(!req.add_text(""));
        assert_eq!(req.texts.len(), 1);
        assert!(!req.has_multiple_texts());
    }

    #[test]
    fn test_link_is_symmetric() {
        let mut registry = RequirementRegistry::new();

        assert!(registry.link("SYS-P-001", "SYS-C-001"));
        assert!(!registry.link("SYS-P-001", "SYS-C-001"));

        let parent = registry.get("SYS-P-001").unwrap();
        let child = registry.get("SYS-C-001").unwrap();
        assert!(parent.children.contains("SYS-C-001"));
        assert!(child.parents.contains("SYS-P-001"));
        assert!(parent.parents.is_empty());
        assert!(child.children.is_empty());
    }

    #[test]
    fn test_multiple_parents() {
        let mut registry = RequirementRegistry::new();
        registry.link("SYS-P-001", "SYS-C-001");
        registry.link("SYS-P-002", "SYS-C-001");

        assert!(registry.get("SYS-C-001").unwrap().has_multiple_parents());
        assert!(!registry.get("SYS-P-001").unwrap().has_multiple_parents());
    }

    #[test]
    fn test_iteration_follows_first_mention() {
        let mut registry = RequirementRegistry::new();
        registry.get_or_create("SYS-B-002");
        registry.link("SYS-A-001", "SYS-C-003");
        registry.get_or_create("SYS-B-002");

        let ids: Vec<&str> = registry.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["SYS-B-002", "SYS-A-001", "SYS-C-003"]);
    }

    #[test]
    fn test_text_unset_before_finalize() {
        let mut req = Requirement::new("SYS-A-001");
        req.add_text("Do X");

        assert_eq!(req.text(), None);
        req.set_text(Some("Do X".into()));
        assert_eq!(req.text(), Some("Do X"));
    }
}
