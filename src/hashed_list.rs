//! ## Hashed Linked List Implementation
//!
//! This module implements an order-preserving hashed sequence: a doubly
//! linked list whose nodes are stored in a hash map keyed by the element
//! itself. Membership, neighbor lookup, and insertion anchored on an
//! existing element are all O(1); element identity must therefore be unique
//! (duplicate insertion is rejected).
//!
//! Plain traversal uses [`HashedLinkedList::iter`], which borrows the list
//! and is statically safe. The detached [`Cursor`] exists for callers that
//! interleave traversal and mutation: it snapshots the list's modification
//! counter and refuses to advance once the list has been structurally
//! modified behind its back, while its own [`Cursor::remove`] resynchronizes.
//!
//! ### Example
//!
//! ```
//! use metrum::hashed_list::HashedLinkedList;
//!
//! let mut list = HashedLinkedList::new();
//! list.push_back(1).unwrap();
//! list.push_back(2).unwrap();
//! list.insert_after(12, &1).unwrap();
//! let order: Vec<i32> = list.iter().copied().collect();
//! assert_eq!(order, vec![1, 12, 2]);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::errors::MetrumError;

/// Links of one sequence node. The payload itself is the map key.
#[derive(Debug, Clone)]
struct Node<T> {
    prev: Option<T>,
    next: Option<T>,
}

/// A doubly-linked sequence with O(1) membership and anchored insertion.
#[derive(Debug, Clone)]
pub struct HashedLinkedList<T: Eq + Hash + Clone + std::fmt::Debug> {
    nodes: HashMap<T, Node<T>>,
    head: Option<T>,
    tail: Option<T>,
    mod_count: u64,
}

impl<T: Eq + Hash + Clone + std::fmt::Debug> Default for HashedLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone + std::fmt::Debug> HashedLinkedList<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        HashedLinkedList {
            nodes: HashMap::new(),
            head: None,
            tail: None,
            mod_count: 0,
        }
    }

    /// Number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `element` is a member of the sequence.
    pub fn contains(&self, element: &T) -> bool {
        self.nodes.contains_key(element)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.mod_count += 1;
    }

    /// The first element.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::EmptySequence` when the sequence is empty.
    pub fn front(&self) -> Result<&T, MetrumError> {
        match &self.head {
            Some(head) => match self.nodes.get_key_value(head) {
                Some((element, _)) => Ok(element),
                None => unreachable!("head element missing from the node map"),
            },
            None => Err(MetrumError::EmptySequence),
        }
    }

    /// The last element.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::EmptySequence` when the sequence is empty.
    pub fn back(&self) -> Result<&T, MetrumError> {
        match &self.tail {
            Some(tail) => match self.nodes.get_key_value(tail) {
                Some((element, _)) => Ok(element),
                None => unreachable!("tail element missing from the node map"),
            },
            None => Err(MetrumError::EmptySequence),
        }
    }

    /// Inserts `element` at the front of the sequence.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::DuplicateElement` if `element` is already
    /// present.
    pub fn push_front(&mut self, element: T) -> Result<(), MetrumError> {
        if self.nodes.contains_key(&element) {
            return Err(MetrumError::DuplicateElement {
                element: format!("{:?}", element),
            });
        }
        debug!("Inserting {:?} at the front", element);
        let old_head = self.head.take();
        if let Some(ref head) = old_head {
            if let Some(node) = self.nodes.get_mut(head) {
                node.prev = Some(element.clone());
            }
        } else {
            self.tail = Some(element.clone());
        }
        self.nodes.insert(
            element.clone(),
            Node {
                prev: None,
                next: old_head,
            },
        );
        self.head = Some(element);
        self.mod_count += 1;
        Ok(())
    }

    /// Inserts `element` at the back of the sequence.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::DuplicateElement` if `element` is already
    /// present.
    pub fn push_back(&mut self, element: T) -> Result<(), MetrumError> {
        if self.nodes.contains_key(&element) {
            return Err(MetrumError::DuplicateElement {
                element: format!("{:?}", element),
            });
        }
        debug!("Inserting {:?} at the back", element);
        let old_tail = self.tail.take();
        if let Some(ref tail) = old_tail {
            if let Some(node) = self.nodes.get_mut(tail) {
                node.next = Some(element.clone());
            }
        } else {
            self.head = Some(element.clone());
        }
        self.nodes.insert(
            element.clone(),
            Node {
                prev: old_tail,
                next: None,
            },
        );
        self.tail = Some(element);
        self.mod_count += 1;
        Ok(())
    }

    /// The element immediately before `element`.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::ElementNotFound` if `element` is not a member
    /// and `MetrumError::NoSuchElement` if `element` is the first element.
    pub fn neighbor_before(&self, element: &T) -> Result<&T, MetrumError> {
        let node = self
            .nodes
            .get(element)
            .ok_or_else(|| MetrumError::ElementNotFound {
                element: format!("{:?}", element),
            })?;
        match &node.prev {
            Some(prev) => match self.nodes.get_key_value(prev) {
                Some((found, _)) => Ok(found),
                None => unreachable!("prev link points at a missing node"),
            },
            None => Err(MetrumError::NoSuchElement),
        }
    }

    /// The element immediately after `element`.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::ElementNotFound` if `element` is not a member
    /// and `MetrumError::NoSuchElement` if `element` is the last element.
    pub fn neighbor_after(&self, element: &T) -> Result<&T, MetrumError> {
        let node = self
            .nodes
            .get(element)
            .ok_or_else(|| MetrumError::ElementNotFound {
                element: format!("{:?}", element),
            })?;
        match &node.next {
            Some(next) => match self.nodes.get_key_value(next) {
                Some((found, _)) => Ok(found),
                None => unreachable!("next link points at a missing node"),
            },
            None => Err(MetrumError::NoSuchElement),
        }
    }

    /// Inserts `element` immediately before `anchor`.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::ElementNotFound` if `anchor` is not a member and
    /// `MetrumError::DuplicateElement` if `element` already is.
    pub fn insert_before(&mut self, element: T, anchor: &T) -> Result<(), MetrumError> {
        if !self.nodes.contains_key(anchor) {
            return Err(MetrumError::ElementNotFound {
                element: format!("{:?}", anchor),
            });
        }
        if self.nodes.contains_key(&element) {
            return Err(MetrumError::DuplicateElement {
                element: format!("{:?}", element),
            });
        }
        debug!("Inserting {:?} before {:?}", element, anchor);
        let prev = match self.nodes.get_mut(anchor) {
            Some(node) => std::mem::replace(&mut node.prev, Some(element.clone())),
            None => unreachable!("anchor checked above"),
        };
        match &prev {
            Some(prev_element) => {
                if let Some(node) = self.nodes.get_mut(prev_element) {
                    node.next = Some(element.clone());
                }
            }
            // The anchor was the first element.
            None => self.head = Some(element.clone()),
        }
        self.nodes.insert(
            element,
            Node {
                prev,
                next: Some(anchor.clone()),
            },
        );
        self.mod_count += 1;
        Ok(())
    }

    /// Inserts `element` immediately after `anchor`.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::ElementNotFound` if `anchor` is not a member and
    /// `MetrumError::DuplicateElement` if `element` already is.
    pub fn insert_after(&mut self, element: T, anchor: &T) -> Result<(), MetrumError> {
        if !self.nodes.contains_key(anchor) {
            return Err(MetrumError::ElementNotFound {
                element: format!("{:?}", anchor),
            });
        }
        if self.nodes.contains_key(&element) {
            return Err(MetrumError::DuplicateElement {
                element: format!("{:?}", element),
            });
        }
        debug!("Inserting {:?} after {:?}", element, anchor);
        let next = match self.nodes.get_mut(anchor) {
            Some(node) => std::mem::replace(&mut node.next, Some(element.clone())),
            None => unreachable!("anchor checked above"),
        };
        match &next {
            Some(next_element) => {
                if let Some(node) = self.nodes.get_mut(next_element) {
                    node.prev = Some(element.clone());
                }
            }
            // The anchor was the last element.
            None => self.tail = Some(element.clone()),
        }
        self.nodes.insert(
            element,
            Node {
                prev: Some(anchor.clone()),
                next,
            },
        );
        self.mod_count += 1;
        Ok(())
    }

    /// Removes `element`, returning whether it was present.
    pub fn remove(&mut self, element: &T) -> bool {
        let Some(node) = self.nodes.remove(element) else {
            return false;
        };
        debug!("Removing {:?}", element);
        match &node.prev {
            Some(prev) => {
                if let Some(prev_node) = self.nodes.get_mut(prev) {
                    prev_node.next = node.next.clone();
                }
            }
            None => self.head = node.next.clone(),
        }
        match &node.next {
            Some(next) => {
                if let Some(next_node) = self.nodes.get_mut(next) {
                    next_node.prev = node.prev.clone();
                }
            }
            None => self.tail = node.prev.clone(),
        }
        self.mod_count += 1;
        true
    }

    /// Forward traversal from the first element.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head.clone(),
        }
    }

    /// Forward traversal starting at `element` (inclusive). The seek is O(1).
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::ElementNotFound` if `element` is not a member.
    pub fn iter_from(&self, element: &T) -> Result<Iter<'_, T>, MetrumError> {
        if !self.nodes.contains_key(element) {
            return Err(MetrumError::ElementNotFound {
                element: format!("{:?}", element),
            });
        }
        Ok(Iter {
            list: self,
            next: Some(element.clone()),
        })
    }

    /// Creates a detached cursor positioned before the first element.
    pub fn cursor(&self) -> Cursor<T> {
        Cursor {
            current: None,
            removable: false,
            expected_mod_count: self.mod_count,
        }
    }
}

/// Borrow-based forward iterator.
#[derive(Debug)]
pub struct Iter<'a, T: Eq + Hash + Clone + std::fmt::Debug> {
    list: &'a HashedLinkedList<T>,
    next: Option<T>,
}

impl<'a, T: Eq + Hash + Clone + std::fmt::Debug> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let current = self.next.take()?;
        let (element, node) = self.list.nodes.get_key_value(&current)?;
        self.next = node.next.clone();
        Some(element)
    }
}

/// A detached traversal position over a [`HashedLinkedList`].
///
/// The cursor holds no borrow of the list; every call revalidates against
/// the list's modification counter. A structural change made outside the
/// cursor invalidates it: the next [`Cursor::next`] fails with
/// `ConcurrentModification`. Removing through [`Cursor::remove`] is a legal
/// modification and leaves the cursor synchronized.
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    /// The element whose `next` link the cursor follows; `None` means the
    /// position before the first element.
    current: Option<T>,
    /// Whether the element at `current` was returned by `next` and may be
    /// removed.
    removable: bool,
    expected_mod_count: u64,
}

impl<T: Eq + Hash + Clone + std::fmt::Debug> Cursor<T> {
    /// Advances to the next element and returns it, or `None` past the end.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::ConcurrentModification` if the list was
    /// structurally modified since this cursor was created or last
    /// resynchronized.
    pub fn next<'a>(
        &mut self,
        list: &'a HashedLinkedList<T>,
    ) -> Result<Option<&'a T>, MetrumError> {
        if self.expected_mod_count != list.mod_count {
            return Err(MetrumError::ConcurrentModification);
        }
        let upcoming = match &self.current {
            Some(current) => match list.nodes.get(current) {
                Some(node) => node.next.clone(),
                None => unreachable!("cursor position missing from the list"),
            },
            None => list.head.clone(),
        };
        match upcoming {
            Some(element) => match list.nodes.get_key_value(&element) {
                Some((found, _)) => {
                    self.current = Some(found.clone());
                    self.removable = true;
                    Ok(Some(found))
                }
                None => unreachable!("link points at a missing node"),
            },
            // Past the end: the position is left on the last element so a
            // trailing `remove` still targets it.
            None => Ok(None),
        }
    }

    /// Removes the element last returned by [`Cursor::next`] and
    /// resynchronizes the cursor with the list.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::NoSuchElement` if `next` has not returned an
    /// element since the last removal, and
    /// `MetrumError::ConcurrentModification` if the list was modified outside
    /// this cursor.
    pub fn remove(&mut self, list: &mut HashedLinkedList<T>) -> Result<(), MetrumError> {
        if self.expected_mod_count != list.mod_count {
            return Err(MetrumError::ConcurrentModification);
        }
        if !self.removable {
            return Err(MetrumError::NoSuchElement);
        }
        let Some(current) = self.current.take() else {
            unreachable!("removable cursor with no position");
        };
        // Step back so the following `next` resumes with the element after
        // the removed one (or the new head when the head was removed).
        let previous = list.nodes.get(&current).and_then(|node| node.prev.clone());
        if !list.remove(&current) {
            unreachable!("cursor position missing from the list");
        }
        self.current = previous;
        self.removable = false;
        self.expected_mod_count = list.mod_count;
        Ok(())
    }
}
