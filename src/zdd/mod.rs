//! # Zdd<K>
//!
//! `Zdd` is a handle on a node of a zero-suppressed decision diagram.
//! Handles are cheap to clone and don't depend on the engine that
//! created them: they are essentially smart-pointers into a shared,
//! immutable DAG. A node is either one of the two terminals or an
//! internal decision node `(key, then, else)`, where the "then" edge
//! leads to the families containing `key` and the "else" edge to the
//! families without it.
//!
//! Because the engine interns every node, two handles denote the same
//! family if and only if they are the same node. `PartialEq` and
//! `Hash` are therefore pointer identity, and all the structural
//! queries on a handle (`contains`, `subset`, `iter`) run without
//! touching the engine.
//!
//! ```
//! use zedd::Engine;
//!
//! let mut engine = Engine::new();
//! let dd = engine.from_family([vec![1, 3, 9], vec![0, 2, 4]]);
//!
//! assert!(dd.contains([1, 3, 9]));
//! assert_eq!(dd.iter().count(), 2);
//! ```

pub mod iter;

use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt,
    hash::Hash,
    rc::Rc,
};

use ahash::AHashMap as HashMap;

use self::iter::FamilyIter;

pub(crate) enum Kind<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	Zero,
	One,
	Node {
		key: K,
		then_: Zdd<K>,
		else_: Zdd<K>,
	},
}

pub(crate) struct Inner<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	pub(crate) engine: u64,
	pub(crate) kind: Kind<K>,
}

/// A shared handle on a canonical ZDD node.
pub struct Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	inner: Rc<Inner<K>>,
}

impl<K> Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	pub(crate) fn terminal(engine: u64, one: bool) -> Self {
		Zdd {
			inner: Rc::new(Inner {
				engine,
				kind: if one { Kind::One } else { Kind::Zero },
			}),
		}
	}

	pub(crate) fn node(engine: u64, key: K, then_: Zdd<K>, else_: Zdd<K>) -> Self {
		Zdd {
			inner: Rc::new(Inner {
				engine,
				kind: Kind::Node { key, then_, else_ },
			}),
		}
	}

	pub(crate) fn from_inner(inner: Rc<Inner<K>>) -> Self {
		Zdd { inner }
	}

	pub(crate) fn inner_rc(&self) -> &Rc<Inner<K>> {
		&self.inner
	}

	pub(crate) fn engine_id(&self) -> u64 {
		self.inner.engine
	}

	/// The identity of the node. Stable for as long as the node is
	/// alive; equal identities imply equal families.
	pub fn id(&self) -> usize {
		Rc::as_ptr(&self.inner) as *const () as usize
	}

	/// Returns `true` if the handle is the zero terminal, i.e. the
	/// empty family.
	pub fn is_zero(&self) -> bool {
		matches!(self.inner.kind, Kind::Zero)
	}

	/// Returns `true` if the handle is the one terminal, i.e. the
	/// family containing only the empty set.
	pub fn is_one(&self) -> bool {
		matches!(self.inner.kind, Kind::One)
	}

	/// Returns `true` if the handle is either terminal.
	pub fn is_terminal(&self) -> bool {
		!matches!(self.inner.kind, Kind::Node { .. })
	}

	/// Returns the decision key of an internal node.
	pub fn key(&self) -> Option<&K> {
		match &self.inner.kind {
			Kind::Node { key, .. } => Some(key),
			_ => None,
		}
	}

	/// Returns the "then" child of an internal node.
	pub fn then_edge(&self) -> Option<&Zdd<K>> {
		match &self.inner.kind {
			Kind::Node { then_, .. } => Some(then_),
			_ => None,
		}
	}

	/// Returns the "else" child of an internal node.
	pub fn else_edge(&self) -> Option<&Zdd<K>> {
		match &self.inner.kind {
			Kind::Node { else_, .. } => Some(else_),
			_ => None,
		}
	}

	/// Destructures an internal node into `(key, then, else)`.
	pub fn as_node(&self) -> Option<(&K, &Zdd<K>, &Zdd<K>)> {
		match &self.inner.kind {
			Kind::Node { key, then_, else_ } => Some((key, then_, else_)),
			_ => None,
		}
	}

	pub(crate) fn parts(&self) -> (&K, &Zdd<K>, &Zdd<K>) {
		match &self.inner.kind {
			Kind::Node { key, then_, else_ } => (key, then_, else_),
			_ => unreachable!("terminals are handled before destructuring"),
		}
	}

	/// Follows else-edges down to the terminal that ends the spine.
	/// The result is the one terminal exactly when the empty set
	/// belongs to the family.
	pub fn else_most(&self) -> &Zdd<K> {
		let mut node = self;
		while let Some(else_) = node.else_edge() {
			node = else_;
		}
		node
	}

	/// Checks whether the given set belongs to the family. Duplicates
	/// in the input are ignored.
	///
	/// # Example
	///
	/// ```
	/// use zedd::Engine;
	///
	/// let mut engine = Engine::new();
	/// let dd = engine.from_family([vec![1, 3, 9], vec![0, 2, 4]]);
	///
	/// assert!(dd.contains([1, 3, 9]));
	/// assert!(dd.contains([9, 3, 1, 1]));
	/// assert!(!dd.contains([1, 3]));
	/// ```
	pub fn contains<I>(&self, item: I) -> bool
	where
		I: IntoIterator<Item = K>,
	{
		let elements: BTreeSet<K> = item.into_iter().collect();
		let mut required = elements.iter();
		let mut next = required.next();

		// Walk down the diagram consuming required keys in ascending
		// order. A required key smaller than the current node's key
		// cannot occur further down, since keys only grow along edges.
		let mut node = self;
		while let Some((key, then_, else_)) = node.as_node() {
			match next {
				Some(el) => match el.cmp(key) {
					Ordering::Equal => {
						node = then_;
						next = required.next();
					}
					Ordering::Greater => node = else_,
					Ordering::Less => return false,
				},
				None => node = else_,
			}
		}
		next.is_none() && node.is_one()
	}

	/// Checks whether every member of this family also belongs to
	/// `other`.
	///
	/// # Example
	///
	/// ```
	/// use zedd::Engine;
	///
	/// let mut engine = Engine::new();
	/// let a = engine.from_family([vec![1, 3]]);
	/// let b = engine.from_family([vec![1, 3], vec![2, 4]]);
	///
	/// assert!(a.subset(&b));
	/// assert!(!b.subset(&a));
	/// ```
	pub fn subset(&self, other: &Zdd<K>) -> bool {
		let mut seen = HashMap::new();
		subset_rec(self, other, &mut seen)
	}

	/// Checks whether this family is a subset of `other` and the two
	/// are not the same family.
	pub fn proper_subset(&self, other: &Zdd<K>) -> bool {
		self != other && self.subset(other)
	}

	/// Returns a lazy iterator over the members of the family. Each
	/// member is produced as a vector of keys in ascending order.
	///
	/// # Example
	///
	/// ```
	/// use zedd::Engine;
	///
	/// let mut engine = Engine::new();
	/// let dd = engine.from_set([9, 3, 1]);
	///
	/// assert_eq!(dd.iter().collect::<Vec<_>>(), vec![vec![1, 3, 9]]);
	/// ```
	pub fn iter(&self) -> FamilyIter<K> {
		FamilyIter::new(self.clone())
	}
}

fn subset_rec<K>(
	a: &Zdd<K>,
	b: &Zdd<K>,
	seen: &mut HashMap<(usize, usize), bool>,
) -> bool
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	if a.is_zero() || a == b {
		return true;
	}
	if a.is_one() {
		return b.else_most().is_one();
	}
	let (bk, bt, be) = match b.as_node() {
		Some(parts) => parts,
		None => return false,
	};
	let memo_key = (a.id(), b.id());
	if let Some(&rv) = seen.get(&memo_key) {
		return rv;
	}
	let (ak, at, ae) = a.parts();
	let rv = match ak.cmp(bk) {
		Ordering::Less => false,
		Ordering::Equal => subset_rec(at, bt, seen) && subset_rec(ae, be, seen),
		Ordering::Greater => subset_rec(a, be, seen),
	};
	seen.insert(memo_key, rv);
	rv
}

impl<K> Clone for Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	fn clone(&self) -> Self {
		Zdd {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<K> PartialEq for Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<K> Eq for Zdd<K> where K: Clone + Hash + PartialEq + Eq + Ord {}

impl<K> Hash for Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl<K> fmt::Debug for Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord + fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.inner.kind {
			Kind::Zero => write!(f, "$0"),
			Kind::One => write!(f, "$1"),
			Kind::Node { key, then_, else_ } => {
				write!(f, "{:?} -> (then: {:?}, else: {:?})", key, then_, else_)
			}
		}
	}
}

impl<'a, K> IntoIterator for &'a Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	type Item = Vec<K>;
	type IntoIter = FamilyIter<K>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
