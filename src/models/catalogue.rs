//! Item catalogue and constraint graph.
//!
//! Holds every lecture and lab of the department, indexed by [`ItemKey`]
//! for constant-time lookup while constraints are wired up, and owns the
//! static constraint graph:
//!
//! - **Incompatibility**: undirected edges; incompatible items may not share a slot.
//! - **Pairs**: undirected edges; paired items should share a slot.
//! - **Preferences**: per-item partial map `SlotKey → value`.
//! - **Unwanted**: per-item set of forbidden slots.
//!
//! Constraint-authoring operations are no-ops when an endpoint is not in
//! the catalogue. They return `false` in that case so callers (parsers)
//! can report the skipped line.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use super::{Item, ItemId, ItemKey, SlotKey};

/// Undirected edge set over items, queryable from either endpoint.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    adjacency: HashMap<ItemId, BTreeSet<ItemId>>,
    len: usize,
}

impl EdgeSet {
    /// Creates an empty edge set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the edge `a - b`. Returns `false` for self-loops and duplicates.
    pub fn insert(&mut self, a: ItemId, b: ItemId) -> bool {
        if a == b || self.contains(a, b) {
            return false;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        self.len += 1;
        true
    }

    /// Whether the edge `a - b` exists (in either direction).
    #[inline]
    pub fn contains(&self, a: ItemId, b: ItemId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Items connected to `a`, in id order.
    pub fn neighbors(&self, a: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        self.adjacency.get(&a).into_iter().flatten().copied()
    }

    /// Whether `a` has any edge.
    #[inline]
    pub fn has_neighbors(&self, a: ItemId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| !n.is_empty())
    }

    /// Every edge once, as `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = (ItemId, ItemId)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&a, ns)| ns.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
    }

    /// Number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// All lectures and labs of a department plus their constraint graph.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalogue {
    items: Vec<Item>,
    index: HashMap<ItemKey, ItemId>,
    incompatible: EdgeSet,
    pairs: EdgeSet,
    preferences: HashMap<ItemId, HashMap<SlotKey, i64>>,
    unwanted: HashMap<ItemId, HashSet<SlotKey>>,
}

impl ItemCatalogue {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item and returns its id.
    ///
    /// If the key is already present, the existing id is returned and the
    /// catalogue is unchanged. A lab whose parent lecture is not in the
    /// catalogue is rejected (`None`); add lectures before their labs.
    pub fn add(&mut self, item: Item) -> Option<ItemId> {
        if let Some(&id) = self.index.get(&item.key) {
            return Some(id);
        }
        if let Some(parent) = item.parent_key() {
            if !self.index.contains_key(&parent) {
                debug!(event = "item_skipped", item = %item, reason = "missing parent lecture");
                return None;
            }
        }
        let id = ItemId::from_index(self.items.len());
        self.index.insert(item.key.clone(), id);
        self.items.push(item);
        Some(id)
    }

    /// Looks up an item id by key.
    #[inline]
    pub fn id_of(&self, key: &ItemKey) -> Option<ItemId> {
        self.index.get(key).copied()
    }

    /// Returns the item for an id issued by this catalogue.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different catalogue and is out of range.
    #[inline]
    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.index()]
    }

    /// Returns the item for an id, if in range.
    #[inline]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalogue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All item ids, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> {
        (0..self.items.len()).map(ItemId::from_index)
    }

    /// All items with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId::from_index(i), item))
    }

    /// Ids of all lectures.
    pub fn lectures(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.iter().filter(|(_, it)| it.is_lecture()).map(|(id, _)| id)
    }

    /// Ids of all labs.
    pub fn labs(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.iter().filter(|(_, it)| it.is_lab()).map(|(id, _)| id)
    }

    fn resolve_pair(&self, a: &ItemKey, b: &ItemKey) -> Option<(ItemId, ItemId)> {
        Some((self.id_of(a)?, self.id_of(b)?))
    }

    // ------------- Constraint authoring -------------

    /// Marks two items as incompatible (may not share a slot).
    pub fn add_incompatibility(&mut self, a: &ItemKey, b: &ItemKey) -> bool {
        match self.resolve_pair(a, b) {
            Some((x, y)) => self.incompatible.insert(x, y),
            None => {
                debug!(event = "constraint_skipped", kind = "incompatible", a = %a, b = %b);
                false
            }
        }
    }

    /// Marks two items as a pair (should share a slot).
    pub fn add_pair(&mut self, a: &ItemKey, b: &ItemKey) -> bool {
        match self.resolve_pair(a, b) {
            Some((x, y)) => self.pairs.insert(x, y),
            None => {
                debug!(event = "constraint_skipped", kind = "pair", a = %a, b = %b);
                false
            }
        }
    }

    /// Records a preference of `value` for placing `key` at `slot`.
    ///
    /// A second preference for the same slot replaces the first.
    pub fn add_preference(&mut self, key: &ItemKey, slot: SlotKey, value: i64) -> bool {
        let Some(id) = self.id_of(key) else {
            debug!(event = "constraint_skipped", kind = "preference", item = %key);
            return false;
        };
        self.preferences.entry(id).or_default().insert(slot, value);
        true
    }

    /// Forbids placing `key` at `slot`.
    pub fn add_unwanted(&mut self, key: &ItemKey, slot: SlotKey) -> bool {
        let Some(id) = self.id_of(key) else {
            debug!(event = "constraint_skipped", kind = "unwanted", item = %key);
            return false;
        };
        self.unwanted.entry(id).or_default().insert(slot);
        true
    }

    // ------------- Constraint queries -------------

    /// Whether `a` and `b` may not share a slot.
    #[inline]
    pub fn are_incompatible(&self, a: ItemId, b: ItemId) -> bool {
        self.incompatible.contains(a, b)
    }

    /// The incompatibility graph.
    #[inline]
    pub fn incompatibilities(&self) -> &EdgeSet {
        &self.incompatible
    }

    /// The pair graph.
    #[inline]
    pub fn pairs(&self) -> &EdgeSet {
        &self.pairs
    }

    /// Items paired with `id`.
    pub fn partners(&self, id: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        self.pairs.neighbors(id)
    }

    /// Whether `id` has any pair partner.
    #[inline]
    pub fn has_partners(&self, id: ItemId) -> bool {
        self.pairs.has_neighbors(id)
    }

    /// Preference value of `id` for `slot` (0 when none was declared).
    pub fn preference(&self, id: ItemId, slot: &SlotKey) -> i64 {
        self.preferences
            .get(&id)
            .and_then(|p| p.get(slot))
            .copied()
            .unwrap_or(0)
    }

    /// All declared preferences of `id`.
    pub fn preferences(&self, id: ItemId) -> impl Iterator<Item = (SlotKey, i64)> + '_ {
        self.preferences
            .get(&id)
            .into_iter()
            .flatten()
            .map(|(&slot, &value)| (slot, value))
    }

    /// Sum of preference values of `id` for every slot except `slot`.
    ///
    /// This is the preference mass given up by placing `id` at `slot`.
    pub fn preference_elsewhere(&self, id: ItemId, slot: &SlotKey) -> i64 {
        self.preferences
            .get(&id)
            .map(|p| {
                p.iter()
                    .filter(|(s, _)| *s != slot)
                    .map(|(_, v)| *v)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Whether `slot` is unwanted for `id`.
    pub fn is_unwanted(&self, id: ItemId, slot: &SlotKey) -> bool {
        self.unwanted.get(&id).is_some_and(|u| u.contains(slot))
    }

    /// All unwanted slots of `id`.
    pub fn unwanted(&self, id: ItemId) -> impl Iterator<Item = SlotKey> + '_ {
        self.unwanted.get(&id).into_iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotKind;

    fn sample() -> (ItemCatalogue, ItemKey, ItemKey, ItemKey) {
        let mut cat = ItemCatalogue::new();
        let l1 = ItemKey::lecture("CPSC", 433, 1);
        let l2 = ItemKey::lecture("CPSC", 433, 2);
        let t1 = ItemKey::lab("CPSC", 433, 1);
        cat.add(Item::lecture("CPSC", 433, 1));
        cat.add(Item::lecture("CPSC", 433, 2));
        cat.add(Item::lab_of("CPSC", 433, 1, 1));
        (cat, l1, l2, t1)
    }

    #[test]
    fn test_add_and_lookup() {
        let (cat, l1, _, t1) = sample();
        assert_eq!(cat.len(), 3);
        let id = cat.id_of(&t1).unwrap();
        assert_eq!(cat.item(id).parent, Some(1));
        assert_eq!(cat.lectures().count(), 2);
        assert_eq!(cat.labs().count(), 1);
        assert_eq!(cat.id_of(&l1).map(|i| i.index()), Some(0));
    }

    #[test]
    fn test_duplicate_and_orphan_adds() {
        let (mut cat, l1, _, _) = sample();
        assert_eq!(cat.add(Item::lecture("CPSC", 433, 1)), cat.id_of(&l1));
        assert_eq!(cat.len(), 3);
        // Parent lecture 5 does not exist
        assert_eq!(cat.add(Item::lab_of("CPSC", 433, 5, 2)), None);
        assert_eq!(cat.len(), 3);
        // Parent-less labs are always accepted
        assert!(cat.add(Item::lab("CPSC", 433, 3)).is_some());
    }

    #[test]
    fn test_edges_are_symmetric() {
        let (mut cat, l1, l2, t1) = sample();
        assert!(cat.add_incompatibility(&l1, &t1));
        assert!(!cat.add_incompatibility(&t1, &l1)); // duplicate
        assert!(!cat.add_incompatibility(&l1, &l1)); // self-loop
        assert!(cat.add_pair(&l2, &t1));

        let (a, b, c) = (
            cat.id_of(&l1).unwrap(),
            cat.id_of(&l2).unwrap(),
            cat.id_of(&t1).unwrap(),
        );
        assert!(cat.are_incompatible(a, c));
        assert!(cat.are_incompatible(c, a));
        assert!(!cat.are_incompatible(a, b));
        assert_eq!(cat.partners(b).collect::<Vec<_>>(), vec![c]);
        assert_eq!(cat.partners(c).collect::<Vec<_>>(), vec![b]);
        assert!(!cat.has_partners(a));
        assert_eq!(cat.pairs().edges().collect::<Vec<_>>(), vec![(b, c)]);
        assert_eq!(cat.incompatibilities().len(), 1);
    }

    #[test]
    fn test_missing_endpoint_is_noop() {
        let (mut cat, l1, _, _) = sample();
        let ghost = ItemKey::lecture("SENG", 300, 1);
        let slot = SlotKey::at(SlotKind::MwfLecture, 8, 0);
        assert!(!cat.add_incompatibility(&l1, &ghost));
        assert!(!cat.add_pair(&ghost, &l1));
        assert!(!cat.add_preference(&ghost, slot, 5));
        assert!(!cat.add_unwanted(&ghost, slot));
        assert!(cat.incompatibilities().is_empty());
        assert!(cat.pairs().is_empty());
    }

    #[test]
    fn test_preferences_and_unwanted() {
        let (mut cat, l1, _, _) = sample();
        let s8 = SlotKey::at(SlotKind::MwfLecture, 8, 0);
        let s9 = SlotKey::at(SlotKind::MwfLecture, 9, 0);
        let s10 = SlotKey::at(SlotKind::MwfLecture, 10, 0);
        cat.add_preference(&l1, s8, 10);
        cat.add_preference(&l1, s9, 3);
        cat.add_preference(&l1, s9, 4); // replaces
        cat.add_unwanted(&l1, s10);

        let id = cat.id_of(&l1).unwrap();
        assert_eq!(cat.preference(id, &s8), 10);
        assert_eq!(cat.preference(id, &s10), 0);
        assert_eq!(cat.preference_elsewhere(id, &s8), 4);
        assert_eq!(cat.preference_elsewhere(id, &s10), 14);
        assert_eq!(cat.preferences(id).count(), 2);
        assert!(cat.is_unwanted(id, &s10));
        assert!(!cat.is_unwanted(id, &s8));
        assert_eq!(cat.unwanted(id).collect::<Vec<_>>(), vec![s10]);
    }
}
