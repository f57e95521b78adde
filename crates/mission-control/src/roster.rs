// Candidate roster: the ordered list of names eligible for selection.
//
// Names are trimmed on entry and must be unique (exact, case-sensitive
// match). Insertion order is display order.

/// Minimum number of candidates required before a selection can start.
pub const MIN_CANDIDATES_FOR_DRAW: usize = 2;

/// Ordered, duplicate-free list of candidate names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRoster {
    names: Vec<String>,
}

impl CandidateRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from a seed list, applying the same trimming and
    /// de-duplication rules as [`CandidateRoster::add`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(name.as_ref());
        }
        roster
    }

    /// Append a candidate.
    ///
    /// Returns `false` (and leaves the roster untouched) when the trimmed
    /// name is empty or already present.
    pub fn add(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.names.push(trimmed.to_string());
        true
    }

    /// Remove the candidate at `index`, returning it.
    ///
    /// Out-of-bounds indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.names.len() {
            Some(self.names.remove(index))
        } else {
            None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether there are enough candidates for a meaningful draw.
    pub fn can_draw(&self) -> bool {
        self.names.len() >= MIN_CANDIDATES_FOR_DRAW
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> CandidateRoster {
        CandidateRoster::from_names(["A", "B", "C"])
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut roster = CandidateRoster::new();
        assert!(roster.add("Zulu"));
        assert!(roster.add("Alpha"));
        assert_eq!(roster.names(), &["Zulu".to_string(), "Alpha".to_string()]);
    }

    #[test]
    fn add_trims_whitespace() {
        let mut roster = CandidateRoster::new();
        assert!(roster.add("  Vega \t"));
        assert_eq!(roster.names(), &["Vega".to_string()]);
    }

    #[test]
    fn add_rejects_duplicate() {
        let mut roster = abc();
        assert!(!roster.add("A"));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn add_rejects_duplicate_after_trim() {
        let mut roster = abc();
        assert!(!roster.add("  B  "));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn add_is_case_sensitive() {
        let mut roster = abc();
        assert!(roster.add("a"));
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn add_rejects_empty_and_whitespace() {
        let mut roster = abc();
        assert!(!roster.add(""));
        assert!(!roster.add("   "));
        assert!(!roster.add("\n\t"));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn remove_middle_preserves_order() {
        let mut roster = abc();
        assert_eq!(roster.remove(1).as_deref(), Some("B"));
        assert_eq!(roster.names(), &["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn remove_decreases_length_by_one() {
        let mut roster = abc();
        let before = roster.len();
        roster.remove(0);
        assert_eq!(roster.len(), before - 1);
    }

    #[test]
    fn remove_out_of_bounds_is_noop() {
        let mut roster = abc();
        assert!(roster.remove(3).is_none());
        assert!(roster.remove(usize::MAX).is_none());
        assert_eq!(roster, abc());
    }

    #[test]
    fn from_names_deduplicates_seed() {
        let roster = CandidateRoster::from_names(["A", " A", "", "B"]);
        assert_eq!(roster.names(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn can_draw_requires_two() {
        let mut roster = CandidateRoster::new();
        assert!(!roster.can_draw());
        roster.add("Solo");
        assert!(!roster.can_draw());
        roster.add("Duo");
        assert!(roster.can_draw());
    }
}
