// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Which polygon is currently being edited.

use std::fmt;

/// The three point-set collections a camera carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    MotionMasks,
    Zones,
    ObjectMasks,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::MotionMasks,
        CollectionKind::Zones,
        CollectionKind::ObjectMasks,
    ];

    /// Heading shown above the collection's listing (also the message id).
    pub fn title(self) -> &'static str {
        match self {
            CollectionKind::MotionMasks => "Motion masks",
            CollectionKind::Zones => "Zones",
            CollectionKind::ObjectMasks => "Object masks",
        }
    }
}

/// Address of exactly one polygon across the collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditTarget {
    MotionMask(usize),
    Zone(String),
    ObjectMask(String, usize),
}

impl EditTarget {
    pub fn kind(&self) -> CollectionKind {
        match self {
            EditTarget::MotionMask(_) => CollectionKind::MotionMasks,
            EditTarget::Zone(_) => CollectionKind::Zones,
            EditTarget::ObjectMask(..) => CollectionKind::ObjectMasks,
        }
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditTarget::MotionMask(index) => write!(f, "motion mask {}", index),
            EditTarget::Zone(name) => write!(f, "zone {}", name),
            EditTarget::ObjectMask(name, index) => write!(f, "{} mask {}", name, index),
        }
    }
}

/// The current selection. `None` means nothing is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingSession {
    pub target: Option<EditTarget>,
}

impl EditingSession {
    pub fn new(target: Option<EditTarget>) -> Self {
        Self { target }
    }

    pub fn is_editing(&self, target: &EditTarget) -> bool {
        self.target.as_ref() == Some(target)
    }

    /// Keep the selection pointing at the same polygon after
    /// `removed` was taken out of its collection.
    ///
    /// Indices after the removed one in the same list shift down by one;
    /// a selection of the removed polygon itself is cleared.
    pub fn polygon_removed(&mut self, removed: &EditTarget) {
        let Some(current) = self.target.take() else {
            return;
        };
        self.target = match (current, removed) {
            (EditTarget::MotionMask(i), EditTarget::MotionMask(r)) => match i.cmp(r) {
                std::cmp::Ordering::Less => Some(EditTarget::MotionMask(i)),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(EditTarget::MotionMask(i - 1)),
            },
            (EditTarget::Zone(name), EditTarget::Zone(r)) => {
                (name != *r).then_some(EditTarget::Zone(name))
            }
            (EditTarget::ObjectMask(name, i), EditTarget::ObjectMask(r_name, r)) if name == *r_name => {
                match i.cmp(r) {
                    std::cmp::Ordering::Less => Some(EditTarget::ObjectMask(name, i)),
                    std::cmp::Ordering::Equal => None,
                    std::cmp::Ordering::Greater => Some(EditTarget::ObjectMask(name, i - 1)),
                }
            }
            (current, _) => Some(current),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_before_selection_shifts_index() {
        let mut session = EditingSession::new(Some(EditTarget::MotionMask(2)));
        session.polygon_removed(&EditTarget::MotionMask(0));
        assert_eq!(session.target, Some(EditTarget::MotionMask(1)));
    }

    #[test]
    fn test_removal_of_selection_clears_it() {
        let mut session = EditingSession::new(Some(EditTarget::Zone("porch".into())));
        session.polygon_removed(&EditTarget::Zone("porch".into()));
        assert_eq!(session.target, None);

        let mut session = EditingSession::new(Some(EditTarget::ObjectMask("car".into(), 1)));
        session.polygon_removed(&EditTarget::ObjectMask("car".into(), 1));
        assert_eq!(session.target, None);
    }

    #[test]
    fn test_unrelated_removal_keeps_selection() {
        let mut session = EditingSession::new(Some(EditTarget::ObjectMask("car".into(), 1)));
        session.polygon_removed(&EditTarget::ObjectMask("person".into(), 0));
        session.polygon_removed(&EditTarget::MotionMask(0));
        session.polygon_removed(&EditTarget::ObjectMask("car".into(), 3));
        assert_eq!(session.target, Some(EditTarget::ObjectMask("car".into(), 1)));

        session.polygon_removed(&EditTarget::ObjectMask("car".into(), 0));
        assert_eq!(session.target, Some(EditTarget::ObjectMask("car".into(), 0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(EditTarget::MotionMask(0).to_string(), "motion mask 0");
        assert_eq!(EditTarget::ObjectMask("person".into(), 2).to_string(), "person mask 2");
        assert_eq!(EditTarget::Zone("porch".into()).kind(), CollectionKind::Zones);
    }
}
