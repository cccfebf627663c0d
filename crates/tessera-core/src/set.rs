//! Set algebra over entities.
//!
//! [`Set::union`] and [`Set::intersection`] simplify when the result is
//! decidable from the operands and otherwise build a lazy node. The identity
//! laws always hold: `Empty` is neutral for union and absorbing for
//! intersection.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use tessera_numbers::Number;

use crate::entity::Entity;

/// A finite collection of distinct entities.
///
/// Order is irrelevant to equality; duplicates are dropped by value.
#[derive(Debug, Clone, Default)]
pub struct FiniteSet(Vec<Entity>);

impl FiniteSet {
    /// The empty finite set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `element` unless an equal one is already present.
    pub fn insert(&mut self, element: Entity) -> bool {
        if self.contains_exact(&element) {
            return false;
        }
        self.0.push(element);
        true
    }

    /// Returns true if a structurally equal element is present.
    #[must_use]
    pub fn contains_exact(&self, element: &Entity) -> bool {
        self.0.iter().any(|e| e == element)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.0.iter()
    }
}

impl PartialEq for FiniteSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|e| other.contains_exact(e))
    }
}

impl FromIterator<Entity> for FiniteSet {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut set = Self::new();
        for element in iter {
            set.insert(element);
        }
        set
    }
}

impl IntoIterator for FiniteSet {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A contiguous real range with independently open or closed ends.
///
/// Bounds may be symbolic, so the constructor does not check `left <= right`.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Lower bound.
    pub left: Entity,
    /// Whether the lower bound belongs to the interval.
    pub left_closed: bool,
    /// Upper bound.
    pub right: Entity,
    /// Whether the upper bound belongs to the interval.
    pub right_closed: bool,
}

impl Interval {
    /// An interval with explicit closedness on each side.
    #[must_use]
    pub fn new(left: Entity, left_closed: bool, right: Entity, right_closed: bool) -> Self {
        Self {
            left,
            left_closed,
            right,
            right_closed,
        }
    }

    /// `(left, right)`.
    #[must_use]
    pub fn open(left: Entity, right: Entity) -> Self {
        Self::new(left, false, right, false)
    }

    /// `[left, right]`.
    #[must_use]
    pub fn closed(left: Entity, right: Entity) -> Self {
        Self::new(left, true, right, true)
    }

    /// The whole real line, `(-oo, +oo)`.
    #[must_use]
    pub fn reals() -> Self {
        Self::open(Entity::negative_infinity(), Entity::infinity())
    }

    /// Membership of a point, if decidable.
    #[must_use]
    pub fn contains(&self, element: &Entity) -> Option<bool> {
        let x = element.eval_numerical().ok()?;
        if !x.is_real() {
            return Some(false);
        }
        let above_left = match self.left_ordering(&x)? {
            Ordering::Less => true,
            Ordering::Equal => self.left_closed,
            Ordering::Greater => false,
        };
        let below_right = match compare_point(&x, &self.right)? {
            Ordering::Less => true,
            Ordering::Equal => self.right_closed,
            Ordering::Greater => false,
        };
        Some(above_left && below_right)
    }

    fn left_ordering(&self, x: &Number) -> Option<Ordering> {
        compare_point(x, &self.left).map(Ordering::reverse)
    }

    fn intersect(&self, other: &Interval) -> Option<Set> {
        let (left, left_closed) = match compare_bounds(&self.left, &other.left)? {
            Ordering::Greater => (&self.left, self.left_closed),
            Ordering::Less => (&other.left, other.left_closed),
            Ordering::Equal => (&self.left, self.left_closed && other.left_closed),
        };
        let (right, right_closed) = match compare_bounds(&self.right, &other.right)? {
            Ordering::Less => (&self.right, self.right_closed),
            Ordering::Greater => (&other.right, other.right_closed),
            Ordering::Equal => (&self.right, self.right_closed && other.right_closed),
        };
        let empty = match compare_bounds(left, right)? {
            Ordering::Greater => true,
            Ordering::Equal => !(left_closed && right_closed),
            Ordering::Less => false,
        };
        Some(if empty {
            Set::Empty
        } else {
            Set::Interval(Interval::new(left.clone(), left_closed, right.clone(), right_closed))
        })
    }
}

fn compare_point(x: &Number, bound: &Entity) -> Option<Ordering> {
    x.compare(&bound.eval_numerical().ok()?)
}

fn compare_bounds(a: &Entity, b: &Entity) -> Option<Ordering> {
    a.eval_numerical().ok()?.compare(&b.eval_numerical().ok()?)
}

/// A set of entities.
#[derive(Debug, Clone, PartialEq)]
pub enum Set {
    /// The empty set.
    Empty,
    /// A finite set of values.
    Finite(FiniteSet),
    /// A real interval.
    Interval(Interval),
    /// Elements in either operand.
    Union(Arc<Set>, Arc<Set>),
    /// Elements in both operands.
    Intersection(Arc<Set>, Arc<Set>),
}

impl Set {
    /// A finite set, deduplicated by value. No elements give `Empty`.
    pub fn finite(elements: impl IntoIterator<Item = Entity>) -> Self {
        Self::from(elements.into_iter().collect::<FiniteSet>())
    }

    /// Returns true if this set is syntactically empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Set::Empty => true,
            Set::Finite(f) => f.is_empty(),
            _ => false,
        }
    }

    /// `self ∪ other`.
    #[must_use]
    pub fn union(self, other: Set) -> Set {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() || self == other {
            return self;
        }
        match (self, other) {
            (Set::Finite(mut a), Set::Finite(b)) => {
                for element in b {
                    a.insert(element);
                }
                Set::Finite(a)
            }
            (Set::Interval(i), Set::Finite(f)) | (Set::Finite(f), Set::Interval(i)) => {
                absorb_points(i, f)
            }
            (a, b) => Set::Union(Arc::new(a), Arc::new(b)),
        }
    }

    /// `self ∩ other`.
    #[must_use]
    pub fn intersection(self, other: Set) -> Set {
        if self.is_empty() || other.is_empty() {
            return Set::Empty;
        }
        if self == other {
            return self;
        }
        match (self, other) {
            (Set::Finite(a), Set::Finite(b)) => {
                Set::finite(a.into_iter().filter(|e| b.contains_exact(e)))
            }
            (Set::Finite(f), other) | (other, Set::Finite(f)) => {
                let decided: Option<Vec<bool>> = f.iter().map(|e| other.contains(e)).collect();
                match decided {
                    Some(keep) => Set::finite(
                        f.into_iter()
                            .zip(keep)
                            .filter_map(|(e, k)| k.then_some(e)),
                    ),
                    None => Set::Intersection(Arc::new(Set::Finite(f)), Arc::new(other)),
                }
            }
            (Set::Interval(a), Set::Interval(b)) => match a.intersect(&b) {
                Some(set) => set,
                None => Set::Intersection(Arc::new(Set::Interval(a)), Arc::new(Set::Interval(b))),
            },
            (a, b) => Set::Intersection(Arc::new(a), Arc::new(b)),
        }
    }

    /// Membership of `element`, if decidable.
    #[must_use]
    pub fn contains(&self, element: &Entity) -> Option<bool> {
        match self {
            Set::Empty => Some(false),
            Set::Finite(f) => {
                if f.contains_exact(element) {
                    return Some(true);
                }
                let x = element.eval_numerical().ok()?;
                let mut undecided = false;
                for member in f.iter() {
                    match member.eval_numerical() {
                        Ok(m) if m == x || m.compare(&x) == Some(Ordering::Equal) => {
                            return Some(true)
                        }
                        Ok(_) => {}
                        Err(_) => undecided = true,
                    }
                }
                (!undecided).then_some(false)
            }
            Set::Interval(i) => i.contains(element),
            Set::Union(a, b) => match (a.contains(element), b.contains(element)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
            Set::Intersection(a, b) => match (a.contains(element), b.contains(element)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
        }
    }

    /// All entities mentioned by the set: elements and interval bounds.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        match self {
            Set::Empty => Vec::new(),
            Set::Finite(f) => f.iter().cloned().collect(),
            Set::Interval(i) => vec![i.left.clone(), i.right.clone()],
            Set::Union(a, b) | Set::Intersection(a, b) => {
                let mut all = a.entities();
                all.extend(b.entities());
                all
            }
        }
    }

    /// Rebuilds the set with every mentioned entity passed through `f`.
    ///
    /// The structure is kept as is; no simplification happens.
    #[must_use]
    pub fn map_entities(&self, f: &mut dyn FnMut(&Entity) -> Entity) -> Set {
        match self {
            Set::Empty => Set::Empty,
            Set::Finite(elements) => Set::Finite(elements.iter().map(|e| f(e)).collect()),
            Set::Interval(i) => {
                let left = f(&i.left);
                Set::Interval(Interval::new(left, i.left_closed, f(&i.right), i.right_closed))
            }
            Set::Union(a, b) => {
                let a = a.map_entities(f);
                Set::Union(Arc::new(a), Arc::new(b.map_entities(f)))
            }
            Set::Intersection(a, b) => {
                let a = a.map_entities(f);
                Set::Intersection(Arc::new(a), Arc::new(b.map_entities(f)))
            }
        }
    }
}

/// Merges points into an interval: points on an open end close it, points
/// inside vanish, and the rest stay beside the interval.
fn absorb_points(mut interval: Interval, points: FiniteSet) -> Set {
    let mut rest = FiniteSet::new();
    for point in points {
        if !interval.left_closed && point == interval.left {
            interval.left_closed = true;
        } else if !interval.right_closed && point == interval.right {
            interval.right_closed = true;
        } else if interval.contains(&point) != Some(true) {
            rest.insert(point);
        }
    }
    if rest.is_empty() {
        Set::Interval(interval)
    } else {
        Set::Union(Arc::new(Set::Interval(interval)), Arc::new(Set::Finite(rest)))
    }
}

/// Unites a sequence of sets left to right. No sets give `Empty`.
pub fn unite(sets: impl IntoIterator<Item = Set>) -> Set {
    sets.into_iter().fold(Set::Empty, Set::union)
}

/// Intersects a sequence of sets left to right. No sets give `Empty`.
pub fn intersect(sets: impl IntoIterator<Item = Set>) -> Set {
    sets.into_iter().reduce(Set::intersection).unwrap_or(Set::Empty)
}

impl From<FiniteSet> for Set {
    fn from(value: FiniteSet) -> Self {
        if value.is_empty() {
            Set::Empty
        } else {
            Set::Finite(value)
        }
    }
}

impl From<Interval> for Set {
    fn from(value: Interval) -> Self {
        Set::Interval(value)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.left_closed { '[' } else { '(' };
        let close = if self.right_closed { ']' } else { ')' };
        write!(f, "{open}{}, {}{close}", self.left, self.right)
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Set::Empty => f.write_str("{}"),
            Set::Finite(elements) => {
                f.write_str("{ ")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{e}")?;
                }
                f.write_str(" }")
            }
            Set::Interval(i) => write!(f, "{i}"),
            Set::Union(a, b) => write!(f, "{a} \\/ {b}"),
            Set::Intersection(a, b) => write!(f, "({a}) /\\ ({b})"),
        }
    }
}
