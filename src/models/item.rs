//! Schedulable item model.
//!
//! An item is one section of a course: a lecture (`LEC`) or a lab/tutorial
//! (`TUT`). Labs may belong to a specific lecture section of the same
//! course; a lab without a parent belongs to every section.
//!
//! Constraint relations (incompatibility, pairs, preferences, unwanted
//! slots) are not stored on the item. They live in the
//! [`ItemCatalogue`](super::ItemCatalogue), which owns the constraint graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense index of an item inside its catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position in the catalogue.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Lecture or lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    /// Lecture section.
    Lecture,
    /// Lab or tutorial section.
    Lab,
}

/// Identity of an item: course, number, kind and section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    /// Department code (e.g. "CPSC", "SENG").
    pub course: String,
    /// Course number (e.g. 433).
    pub number: u16,
    /// Lecture or lab.
    pub kind: ItemKind,
    /// Section number (LEC # or TUT #).
    pub section: u16,
}

impl ItemKey {
    /// Key of a lecture section.
    pub fn lecture(course: impl Into<String>, number: u16, section: u16) -> Self {
        Self {
            course: course.into(),
            number,
            kind: ItemKind::Lecture,
            section,
        }
    }

    /// Key of a lab section.
    pub fn lab(course: impl Into<String>, number: u16, section: u16) -> Self {
        Self {
            course: course.into(),
            number,
            kind: ItemKind::Lab,
            section,
        }
    }

    /// Whether both keys refer to the same course (name and number).
    #[inline]
    pub fn same_course(&self, other: &ItemKey) -> bool {
        self.number == other.number && self.course == other.course
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            ItemKind::Lecture => "LEC",
            ItemKind::Lab => "TUT",
        };
        write!(f, "{} {} {} {:02}", self.course, self.number, tag, self.section)
    }
}

/// A lecture or lab section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item identity.
    pub key: ItemKey,
    /// Parent lecture section number. Only meaningful for labs.
    pub parent: Option<u16>,
}

impl Item {
    /// Creates a lecture.
    pub fn lecture(course: impl Into<String>, number: u16, section: u16) -> Self {
        Self {
            key: ItemKey::lecture(course, number, section),
            parent: None,
        }
    }

    /// Creates a lab that belongs to every lecture section of its course.
    pub fn lab(course: impl Into<String>, number: u16, section: u16) -> Self {
        Self {
            key: ItemKey::lab(course, number, section),
            parent: None,
        }
    }

    /// Creates a lab attached to lecture section `lecture`.
    pub fn lab_of(course: impl Into<String>, number: u16, lecture: u16, section: u16) -> Self {
        Self {
            key: ItemKey::lab(course, number, section),
            parent: Some(lecture),
        }
    }

    #[inline]
    pub fn kind(&self) -> ItemKind {
        self.key.kind
    }

    #[inline]
    pub fn is_lecture(&self) -> bool {
        self.key.kind == ItemKind::Lecture
    }

    #[inline]
    pub fn is_lab(&self) -> bool {
        self.key.kind == ItemKind::Lab
    }

    /// Key of the parent lecture, for parented labs.
    pub fn parent_key(&self) -> Option<ItemKey> {
        match (self.key.kind, self.parent) {
            (ItemKind::Lab, Some(section)) => Some(ItemKey::lecture(
                self.key.course.clone(),
                self.key.number,
                section,
            )),
            _ => None,
        }
    }

    /// Evening sections are numbered 90-99.
    #[inline]
    pub fn is_evening(&self) -> bool {
        (90..=99).contains(&self.key.section)
    }

    /// Graduate-level course (500-599).
    #[inline]
    pub fn is_500_level(&self) -> bool {
        (500..=599).contains(&self.key.number)
    }

    /// Whether both items belong to the same course.
    #[inline]
    pub fn same_course(&self, other: &Item) -> bool {
        self.key.same_course(&other.key)
    }

    /// Whether this lab and `lecture` may not run at the same time.
    ///
    /// A parent-less lab clashes with every lecture of its course; a
    /// parented lab clashes only with its own lecture section.
    pub fn lab_clashes_with(&self, lecture: &Item) -> bool {
        if !self.is_lab() || !lecture.is_lecture() || !self.same_course(lecture) {
            return false;
        }
        match self.parent {
            None => true,
            Some(section) => section == lecture.key.section,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.key.kind, self.parent) {
            (ItemKind::Lab, Some(lecture)) => write!(
                f,
                "{} {} LEC {:02} TUT {:02}",
                self.key.course, self.key.number, lecture, self.key.section
            ),
            _ => fmt::Display::fmt(&self.key, f),
        }
    }
}
