use std::collections::BTreeSet;

/// Transient membership set behind follow buttons, likes and filter chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSet<T: Ord> {
    items: BTreeSet<T>,
}

impl<T: Ord> Default for ToggleSet<T> {
    fn default() -> Self {
        Self {
            items: BTreeSet::new(),
        }
    }
}

impl<T: Ord> ToggleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership and returns whether `item` is now in the set.
    pub fn toggle(&mut self, item: T) -> bool {
        if self.items.remove(&item) {
            false
        } else {
            self.items.insert(item);
            true
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Single-choice mode: keep at most one member.
    pub fn select_only(&mut self, item: Option<T>) {
        self.items.clear();
        if let Some(item) = item {
            self.items.insert(item);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Ord> FromIterator<T> for ToggleSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_reports_membership() {
        let mut set = ToggleSet::new();
        assert!(set.toggle(3));
        assert!(set.contains(&3));
        assert!(!set.toggle(3));
        assert!(!set.contains(&3));
        assert!(set.is_empty());
    }

    #[test]
    fn double_toggle_restores_set() {
        let original: ToggleSet<u32> = [1, 2, 5].into_iter().collect();
        for id in [1, 4] {
            let mut set = original.clone();
            set.toggle(id);
            set.toggle(id);
            assert_eq!(set, original);
        }
    }

    #[test]
    fn select_only_keeps_one() {
        let mut set: ToggleSet<u32> = [1, 2].into_iter().collect();
        set.select_only(Some(7));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![7]);
        set.select_only(None);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
