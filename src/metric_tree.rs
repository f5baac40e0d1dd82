//! ## Metric Tree Implementation
//!
//! This module implements an M-tree-style index over an arbitrary metric
//! space. Interior nodes are spheres: a center key, a radius large enough to
//! enclose every descendant key, and either a bounded bag of entries (leaf)
//! or exactly two child spheres (inner node). A hash side-map from key to its
//! leaf gives O(1) exact lookup, value replacement, and removal; kNN and
//! range searches walk the sphere hierarchy with an explicit stack and prune
//! subtrees whose sphere cannot intersect the query ball.
//!
//! ### Example
//!
//! ```
//! use metrum::geometry::EuclideanDistance;
//! use metrum::metric_tree::MetricTree;
//!
//! let mut tree: MetricTree<(i64, i64), &str, EuclideanDistance> = MetricTree::new();
//! tree.put((1, 2), "a").unwrap();
//! tree.put((4, 6), "b").unwrap();
//! tree.put((7, 7), "c").unwrap();
//!
//! let nearest = tree.nearest(&(1, 3)).unwrap().unwrap();
//! assert_eq!(nearest.key, (1, 2));
//! assert_eq!(nearest.distance, 1.0);
//! ```

use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;
use std::marker::PhantomData;

use ordered_float::OrderedFloat;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::errors::MetrumError;
use crate::geometry::DistanceMetric;
use crate::selectors::{CenterSelector, MaxOfRandomSamples};

/// Default number of entries a leaf sphere holds before it is split.
pub const DEFAULT_LEAF_CAPACITY: usize = 50;

/// Smallest accepted leaf capacity.
pub const MIN_LEAF_CAPACITY: usize = 4;

/// A single search result: the matched key, its value, and its distance from
/// the query key.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<K, V> {
    pub key: K,
    pub value: V,
    pub distance: f64,
}

/// Leaf vs. inner variant of a sphere.
#[derive(Debug, Clone)]
enum SphereKind<K, V> {
    Leaf(Vec<(K, V)>),
    Inner { left: usize, right: usize },
}

/// A node of the tree: a center key, an enclosing radius, and the variant.
///
/// The center is a routing key fixed at sphere creation. It keeps that role
/// even if the key itself is later removed from the index. The radius only
/// ever grows: insertion may widen it, removal never shrinks it.
#[derive(Debug, Clone)]
struct Sphere<K, V> {
    center: K,
    radius: f64,
    kind: SphereKind<K, V>,
}

/// Entry in the search result heap.
///
/// The heap is a max-heap on distance, so the worst result so far is always
/// `peek()` and evicting it is a plain `pop()`. This inversion is intentional:
/// the heap doubles as the result set, and the final ordering is produced
/// once at the end by `into_sorted_vec`.
#[derive(Debug)]
struct HeapEntry<K, V> {
    distance: OrderedFloat<f64>,
    key: K,
    value: V,
}

impl<K, V> PartialEq for HeapEntry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.distance.eq(&other.distance)
    }
}

impl<K, V> Eq for HeapEntry<K, V> {}

impl<K, V> PartialOrd for HeapEntry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> Ord for HeapEntry<K, V> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance.cmp(&other.distance)
    }
}

/// Which of the two search modes the shared driver is running.
#[derive(Debug, Clone, Copy)]
enum SearchMode {
    Nearest(usize),
    Range(f64),
}

/// An M-tree variant mapping keys to values in an arbitrary metric space.
///
/// # Type Parameters
///
/// * `K`: The key type; doubles as a point in the metric space.
/// * `V`: The value type stored alongside each key.
/// * `M`: The distance metric, selected at compile time.
/// * `S`: The center-point selection strategy used on leaf splits.
#[derive(Debug)]
pub struct MetricTree<K, V, M, S = MaxOfRandomSamples> {
    spheres: Vec<Sphere<K, V>>,
    root: Option<usize>,
    leaf_of: HashMap<K, usize>,
    capacity: usize,
    selector: S,
    rng: SmallRng,
    _metric: PhantomData<M>,
}

impl<K, V, M, S> Default for MetricTree<K, V, M, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
    M: DistanceMetric<K>,
    S: CenterSelector + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, M, S> MetricTree<K, V, M, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
    M: DistanceMetric<K>,
    S: CenterSelector,
{
    /// Creates an empty tree with the default leaf capacity and a
    /// default-constructed selector.
    pub fn new() -> Self
    where
        S: Default,
    {
        match Self::with_options(DEFAULT_LEAF_CAPACITY, S::default(), None) {
            Ok(tree) => tree,
            Err(_) => unreachable!("default capacity is valid"),
        }
    }

    /// Creates an empty tree with the given leaf capacity.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::InvalidCapacity` if `capacity` is below
    /// [`MIN_LEAF_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Result<Self, MetrumError>
    where
        S: Default,
    {
        Self::with_options(capacity, S::default(), None)
    }

    /// Creates an empty tree with full control over capacity, selector, and
    /// the seed of the instance-owned random generator (used by
    /// [`MetricTree::rebalance`]). Passing a seed makes rebuilds reproducible.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::InvalidCapacity` if `capacity` is below
    /// [`MIN_LEAF_CAPACITY`].
    pub fn with_options(
        capacity: usize,
        selector: S,
        seed: Option<u64>,
    ) -> Result<Self, MetrumError> {
        if capacity < MIN_LEAF_CAPACITY {
            return Err(MetrumError::InvalidCapacity { capacity });
        }
        info!("Creating new MetricTree with leaf capacity: {}", capacity);
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(MetricTree {
            spheres: Vec::new(),
            root: None,
            leaf_of: HashMap::new(),
            capacity,
            selector,
            rng,
            _metric: PhantomData,
        })
    }

    /// Number of entries in the index.
    pub fn len(&self) -> usize {
        self.leaf_of.len()
    }

    /// Returns true if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.leaf_of.is_empty()
    }

    /// Number of spheres in the current tree. Diagnostic: a single leaf tree
    /// reports 1; every split adds two new leaves.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// The configured leaf capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry and sphere.
    pub fn clear(&mut self) {
        self.spheres.clear();
        self.root = None;
        self.leaf_of.clear();
    }

    /// Returns true if `key` is a member of the index.
    pub fn contains(&self, key: &K) -> bool {
        self.leaf_of.contains_key(key)
    }

    /// Exact-match lookup through the side map.
    pub fn get(&self, key: &K) -> Option<&V> {
        let leaf_id = *self.leaf_of.get(key)?;
        match &self.spheres[leaf_id].kind {
            SphereKind::Leaf(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            SphereKind::Inner { .. } => unreachable!("side map points at an inner sphere"),
        }
    }

    /// Inserts `key` with `value`, returning the prior value if the key was
    /// already present.
    ///
    /// A present key only has its value replaced; the tree structure is not
    /// touched. A new key descends from the root, widening the radius of
    /// every sphere it routes through, and lands in a leaf; a full leaf is
    /// split and the descent restarts at the promoted node.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::InvalidDistance` if the metric produces NaN or a
    /// negative value anywhere along the descent.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>, MetrumError> {
        if let Some(&leaf_id) = self.leaf_of.get(&key) {
            let entries = match &mut self.spheres[leaf_id].kind {
                SphereKind::Leaf(entries) => entries,
                SphereKind::Inner { .. } => {
                    unreachable!("side map points at an inner sphere")
                }
            };
            for entry in entries.iter_mut() {
                if entry.0 == key {
                    debug!("Replacing value for existing key {:?}", key);
                    return Ok(Some(std::mem::replace(&mut entry.1, value)));
                }
            }
            unreachable!("side map entry missing from its leaf");
        }

        let Some(start) = self.root else {
            let id = self.alloc_leaf(key.clone());
            match &mut self.spheres[id].kind {
                SphereKind::Leaf(entries) => entries.push((key.clone(), value)),
                SphereKind::Inner { .. } => unreachable!("freshly allocated leaf"),
            }
            self.root = Some(id);
            self.leaf_of.insert(key, id);
            return Ok(None);
        };

        let mut current = start;
        let leaf_id = loop {
            let d = Self::checked_distance(&key, &self.spheres[current].center)?;
            if d > self.spheres[current].radius {
                self.spheres[current].radius = d;
            }
            enum Step {
                Descend(usize, usize),
                Store,
                Split,
            }
            let step = match &self.spheres[current].kind {
                SphereKind::Inner { left, right } => Step::Descend(*left, *right),
                SphereKind::Leaf(entries) => {
                    if entries.len() < self.capacity {
                        Step::Store
                    } else {
                        Step::Split
                    }
                }
            };
            match step {
                Step::Descend(left, right) => {
                    let dl = Self::checked_distance(&key, &self.spheres[left].center)?;
                    let dr = Self::checked_distance(&key, &self.spheres[right].center)?;
                    // Ties route to the first child.
                    current = if dl <= dr { left } else { right };
                }
                Step::Store => break current,
                // The descent restarts at the promoted node and lands in
                // exactly one of the two new leaves.
                Step::Split => self.split(current)?,
            }
        };

        match &mut self.spheres[leaf_id].kind {
            SphereKind::Leaf(entries) => entries.push((key.clone(), value)),
            SphereKind::Inner { .. } => unreachable!("descent ended on an inner sphere"),
        }
        self.leaf_of.insert(key, leaf_id);
        Ok(None)
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// Only membership is removed: if the key also serves as a sphere center
    /// it keeps that routing role, and no radius shrinks.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let leaf_id = self.leaf_of.remove(key)?;
        let entries = match &mut self.spheres[leaf_id].kind {
            SphereKind::Leaf(entries) => entries,
            SphereKind::Inner { .. } => unreachable!("side map points at an inner sphere"),
        };
        let idx = match entries.iter().position(|(k, _)| k == key) {
            Some(idx) => idx,
            None => unreachable!("side map entry missing from its leaf"),
        };
        let (removed, value) = entries.remove(idx);
        debug!("Removed key {:?} from its leaf", removed);
        Some(value)
    }

    /// Returns the single nearest entry to `key`, or `None` on an empty
    /// index. An indexed key is its own nearest entry at distance 0.
    pub fn nearest(&self, key: &K) -> Result<Option<Neighbor<K, V>>, MetrumError> {
        Ok(self.knn_search(key, 1)?.into_iter().next())
    }

    /// Returns up to `count` entries closest to `key`, ordered from nearest
    /// to farthest. Ties are broken arbitrarily but deterministically.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::InvalidNeighborCount` if `count` is zero and
    /// `MetrumError::InvalidDistance` if the metric misbehaves.
    pub fn knn_search(&self, key: &K, count: usize) -> Result<Vec<Neighbor<K, V>>, MetrumError> {
        if count < 1 {
            return Err(MetrumError::InvalidNeighborCount { count });
        }
        debug!("Performing kNN search with k={}", count);
        self.search(key, SearchMode::Nearest(count))
    }

    /// Returns every entry within `radius` of `key`, ordered from nearest to
    /// farthest.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::InvalidRadius` if `radius` is not strictly
    /// positive and finite, and `MetrumError::InvalidDistance` if the metric
    /// misbehaves.
    pub fn range_search(&self, key: &K, radius: f64) -> Result<Vec<Neighbor<K, V>>, MetrumError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(MetrumError::InvalidRadius { radius });
        }
        debug!("Performing range search with radius={}", radius);
        self.search(key, SearchMode::Range(radius))
    }

    /// Iterates over all entries, in arena order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.spheres
            .iter()
            .filter_map(|sphere| match &sphere.kind {
                SphereKind::Leaf(entries) => Some(entries.iter().map(|(k, v)| (k, v))),
                SphereKind::Inner { .. } => None,
            })
            .flatten()
    }

    /// Iterates over all keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries().map(|(k, _)| k)
    }

    /// Iterates over all values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries().map(|(_, v)| v)
    }

    /// Builds a fresh tree holding the same entries, inserted in a uniformly
    /// shuffled order.
    ///
    /// The tree never rebalances itself on insertion, so ordered insertion
    /// sequences can degrade its shape; a shuffled rebuild restores the
    /// expected shape.
    ///
    /// # Panics
    ///
    /// Panics if the rebuilt tree does not hold exactly the same number of
    /// entries, which would indicate an internal invariant violation.
    pub fn balanced_copy(&mut self) -> Result<Self, MetrumError>
    where
        S: Clone,
    {
        let mut items: Vec<(K, V)> = self
            .entries()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        items.shuffle(&mut self.rng);
        info!("Rebuilding MetricTree from {} shuffled entries", items.len());
        let mut copy = MetricTree {
            spheres: Vec::new(),
            root: None,
            leaf_of: HashMap::new(),
            capacity: self.capacity,
            selector: self.selector.clone(),
            rng: SmallRng::seed_from_u64(self.rng.gen()),
            _metric: PhantomData,
        };
        for (key, value) in items {
            copy.put(key, value)?;
        }
        assert_eq!(
            copy.len(),
            self.len(),
            "rebuild changed the entry count: {} != {}",
            copy.len(),
            self.len()
        );
        Ok(copy)
    }

    /// Replaces the tree with a [`MetricTree::balanced_copy`] of itself.
    pub fn rebalance(&mut self) -> Result<(), MetrumError>
    where
        S: Clone,
    {
        let copy = self.balanced_copy()?;
        *self = copy;
        Ok(())
    }

    /// The shared iterative search driver behind kNN and range queries.
    ///
    /// Spheres are visited through an explicit LIFO stack (the tree can be
    /// deeper than the host stack tolerates on degenerate data). A sphere is
    /// skipped when the query ball and the sphere are provably disjoint:
    /// δ(query, center) > radius + ρ, where ρ is the current inclusion
    /// radius. At an inner node the farther child is pushed first so the
    /// closer child is popped next, tightening ρ as early as possible.
    fn search(&self, query: &K, mode: SearchMode) -> Result<Vec<Neighbor<K, V>>, MetrumError> {
        let Some(root) = self.root else {
            return Ok(Vec::new());
        };
        let mut results: BinaryHeap<HeapEntry<K, V>> = BinaryHeap::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let sphere = &self.spheres[id];
            let center_distance = Self::checked_distance(query, &sphere.center)?;
            if center_distance > sphere.radius + Self::inclusion_radius(&results, mode) {
                continue;
            }
            match &sphere.kind {
                SphereKind::Leaf(entries) => {
                    for (key, value) in entries {
                        let d = Self::checked_distance(query, key)?;
                        if d <= Self::inclusion_radius(&results, mode) {
                            results.push(HeapEntry {
                                distance: OrderedFloat(d),
                                key: key.clone(),
                                value: value.clone(),
                            });
                            if let SearchMode::Nearest(count) = mode {
                                if results.len() > count {
                                    results.pop();
                                }
                            }
                        }
                    }
                }
                SphereKind::Inner { left, right } => {
                    let dl = Self::checked_distance(query, &self.spheres[*left].center)?;
                    let dr = Self::checked_distance(query, &self.spheres[*right].center)?;
                    if dl <= dr {
                        stack.push(*right);
                        stack.push(*left);
                    } else {
                        stack.push(*left);
                        stack.push(*right);
                    }
                }
            }
        }
        Ok(results
            .into_sorted_vec()
            .into_iter()
            .map(|entry| Neighbor {
                key: entry.key,
                value: entry.value,
                distance: entry.distance.into_inner(),
            })
            .collect())
    }

    /// Current inclusion radius ρ: fixed in range mode; in kNN mode, infinite
    /// until the heap is full, then the distance of the worst result held.
    fn inclusion_radius(results: &BinaryHeap<HeapEntry<K, V>>, mode: SearchMode) -> f64 {
        match mode {
            SearchMode::Range(radius) => radius,
            SearchMode::Nearest(count) => {
                if results.len() < count {
                    f64::INFINITY
                } else {
                    match results.peek() {
                        Some(worst) => worst.distance.into_inner(),
                        None => f64::INFINITY,
                    }
                }
            }
        }
    }

    /// Splits a full leaf into two new leaves under the promoted sphere.
    ///
    /// The partition is fully computed before any mutation, so a misbehaving
    /// metric fails the operation without leaving the sphere half-split.
    fn split(&mut self, sphere_id: usize) -> Result<(), MetrumError> {
        let keys: Vec<K> = match &self.spheres[sphere_id].kind {
            SphereKind::Leaf(entries) => entries.iter().map(|(k, _)| k.clone()).collect(),
            SphereKind::Inner { .. } => unreachable!("split requested on an inner sphere"),
        };
        let (first, second) = self.selector.choose_two::<K, M>(&keys)?;
        let left_center = keys[first].clone();
        let right_center = keys[second].clone();

        // Per-entry side and distance, alternating on exact ties. Without the
        // alternation, data sets where many keys sit at distance 0 from both
        // centers re-split one side forever.
        let mut assignments: Vec<(bool, f64)> = Vec::with_capacity(keys.len());
        let mut tie_to_left = true;
        for key in &keys {
            let dl = Self::checked_distance(key, &left_center)?;
            let dr = Self::checked_distance(key, &right_center)?;
            if dl < dr {
                assignments.push((true, dl));
            } else if dr < dl {
                assignments.push((false, dr));
            } else {
                assignments.push((tie_to_left, dl));
                tie_to_left = !tie_to_left;
            }
        }

        info!(
            "Splitting leaf sphere {} with {} entries",
            sphere_id,
            keys.len()
        );
        let entries = match &mut self.spheres[sphere_id].kind {
            SphereKind::Leaf(entries) => std::mem::take(entries),
            SphereKind::Inner { .. } => unreachable!("split requested on an inner sphere"),
        };
        let left_id = self.alloc_leaf(left_center);
        let right_id = self.alloc_leaf(right_center);
        for ((key, value), (to_left, d)) in entries.into_iter().zip(assignments) {
            let target = if to_left { left_id } else { right_id };
            let sphere = &mut self.spheres[target];
            if d > sphere.radius {
                sphere.radius = d;
            }
            match &mut sphere.kind {
                SphereKind::Leaf(entries) => entries.push((key.clone(), value)),
                SphereKind::Inner { .. } => unreachable!("freshly allocated leaf"),
            }
            self.leaf_of.insert(key, target);
        }
        self.spheres[sphere_id].kind = SphereKind::Inner {
            left: left_id,
            right: right_id,
        };
        Ok(())
    }

    /// Allocates a fresh empty leaf centered at `center`.
    fn alloc_leaf(&mut self, center: K) -> usize {
        let id = self.spheres.len();
        self.spheres.push(Sphere {
            center,
            radius: 0.0,
            kind: SphereKind::Leaf(Vec::new()),
        });
        id
    }

    /// Observes one metric value, rejecting NaN and negative results before
    /// they can reach the tree structure.
    fn checked_distance(a: &K, b: &K) -> Result<f64, MetrumError> {
        let d = M::distance(a, b);
        if d.is_nan() || d < 0.0 {
            return Err(MetrumError::InvalidDistance { value: d });
        }
        Ok(d)
    }
}

/// The set form of the metric tree: keys without values.
///
/// ### Example
///
/// ```
/// use metrum::geometry::EuclideanDistance;
/// use metrum::metric_tree::MetricSet;
///
/// let mut set: MetricSet<(i64, i64), EuclideanDistance> = MetricSet::new();
/// set.insert((0, 0)).unwrap();
/// set.insert((5, 5)).unwrap();
/// assert!(set.contains(&(0, 0)));
/// let (key, distance) = set.nearest(&(1, 1)).unwrap().unwrap();
/// assert_eq!(key, (0, 0));
/// assert!((distance - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct MetricSet<K, M, S = MaxOfRandomSamples> {
    tree: MetricTree<K, (), M, S>,
}

impl<K, M, S> Default for MetricSet<K, M, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    M: DistanceMetric<K>,
    S: CenterSelector + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, M, S> MetricSet<K, M, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    M: DistanceMetric<K>,
    S: CenterSelector,
{
    /// Creates an empty set with the default leaf capacity.
    pub fn new() -> Self
    where
        S: Default,
    {
        MetricSet {
            tree: MetricTree::new(),
        }
    }

    /// Creates an empty set with the given leaf capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self, MetrumError>
    where
        S: Default,
    {
        Ok(MetricSet {
            tree: MetricTree::with_capacity(capacity)?,
        })
    }

    /// Creates an empty set with full control over capacity, selector, and
    /// rebuild seed.
    pub fn with_options(
        capacity: usize,
        selector: S,
        seed: Option<u64>,
    ) -> Result<Self, MetrumError> {
        Ok(MetricSet {
            tree: MetricTree::with_options(capacity, selector, seed)?,
        })
    }

    /// Inserts `key`, returning true if it was not already a member.
    pub fn insert(&mut self, key: K) -> Result<bool, MetrumError> {
        Ok(self.tree.put(key, ())?.is_none())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Removes `key`, returning whether it was a member.
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    pub fn sphere_count(&self) -> usize {
        self.tree.sphere_count()
    }

    /// Iterates over the stored keys.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.tree.keys()
    }

    /// Returns the nearest member to `key` with its distance.
    pub fn nearest(&self, key: &K) -> Result<Option<(K, f64)>, MetrumError> {
        Ok(self
            .tree
            .nearest(key)?
            .map(|neighbor| (neighbor.key, neighbor.distance)))
    }

    /// Returns up to `count` members closest to `key`, nearest first.
    pub fn knn_search(&self, key: &K, count: usize) -> Result<Vec<(K, f64)>, MetrumError> {
        Ok(self
            .tree
            .knn_search(key, count)?
            .into_iter()
            .map(|neighbor| (neighbor.key, neighbor.distance))
            .collect())
    }

    /// Returns every member within `radius` of `key`, nearest first.
    pub fn range_search(&self, key: &K, radius: f64) -> Result<Vec<(K, f64)>, MetrumError> {
        Ok(self
            .tree
            .range_search(key, radius)?
            .into_iter()
            .map(|neighbor| (neighbor.key, neighbor.distance))
            .collect())
    }

    /// Replaces the set with a shuffled rebuild of itself.
    pub fn rebalance(&mut self) -> Result<(), MetrumError>
    where
        S: Clone,
    {
        self.tree.rebalance()
    }
}
