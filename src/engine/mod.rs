//! # Engine
//!
//! The engine owns the unique table and the operation caches of a
//! diagram universe. Every node construction goes through
//! [`Engine::make_node`], which applies the zero-suppression rule and
//! interns the result, so that a family of sets has exactly one node
//! identity and equality checks are pointer comparisons.
//!
//! The four binary operations recurse over the key-aligned positions
//! of their operands and memoise by operand identity, which keeps them
//! polynomial in the size of the operand DAGs. Commutative operations
//! normalise their cache key by ordering the two identities, roughly
//! doubling the hit rate.
//!
//! An engine is single-threaded; handles from two different engines
//! must never be mixed (this is asserted).
//!
//! ```
//! use zedd::Engine;
//!
//! let mut engine = Engine::new();
//! let a = engine.from_family([vec![1, 3, 9], vec![0, 2, 4]]);
//! let b = engine.from_family([vec![1, 3, 9], vec![5, 6, 7]]);
//! let both = engine.intersection(&a, &b);
//!
//! assert_eq!(both.iter().collect::<Vec<_>>(), vec![vec![1, 3, 9]]);
//! ```

mod table;

use std::{
    cmp::Ordering,
    collections::BTreeSet,
    hash::Hash,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
};

use ahash::AHashMap as HashMap;

use crate::zdd::Zdd;

use self::table::UniqueTable;

static ENGINE_IDS: AtomicU64 = AtomicU64::new(0);

/// Construction options for an [`Engine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
	/// Hold unique-table entries weakly, allowing nodes to be
	/// reclaimed once no handle or cache entry keeps them alive. The
	/// default is a strong table: nodes live until the engine does.
	pub weak_table: bool,
}

/// Constructs canonical ZDDs and combines them with the set-algebraic
/// operations.
pub struct Engine<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	id: u64,
	zero: Zdd<K>,
	one: Zdd<K>,
	table: UniqueTable<K>,
	union_cache: HashMap<(Zdd<K>, Zdd<K>), Zdd<K>>,
	intersection_cache: HashMap<(Zdd<K>, Zdd<K>), Zdd<K>>,
	difference_cache: HashMap<(Zdd<K>, Zdd<K>), Zdd<K>>,
	symmetric_difference_cache: HashMap<(Zdd<K>, Zdd<K>), Zdd<K>>,
	len_cache: HashMap<Zdd<K>, u64>,
}

impl<K> Engine<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	/// Creates an engine with a strong unique table.
	pub fn new() -> Self {
		Self::with_options(EngineOptions::default())
	}

	/// Creates an engine with the given options.
	pub fn with_options(options: EngineOptions) -> Self {
		let id = ENGINE_IDS.fetch_add(1, AtomicOrdering::Relaxed);
		Engine {
			id,
			zero: Zdd::terminal(id, false),
			one: Zdd::terminal(id, true),
			table: UniqueTable::new(options.weak_table),
			union_cache: HashMap::new(),
			intersection_cache: HashMap::new(),
			difference_cache: HashMap::new(),
			symmetric_difference_cache: HashMap::new(),
			len_cache: HashMap::new(),
		}
	}

	/// The zero terminal: the empty family.
	pub fn zero(&self) -> Zdd<K> {
		self.zero.clone()
	}

	/// The one terminal: the family containing only the empty set.
	pub fn one(&self) -> Zdd<K> {
		self.one.clone()
	}

	/// Returns the one terminal for `true`, the zero terminal for
	/// `false`.
	pub fn terminal(&self, one: bool) -> Zdd<K> {
		if one {
			self.one()
		} else {
			self.zero()
		}
	}

	/// The number of interned internal nodes (terminals not counted).
	pub fn node_count(&self) -> usize {
		self.table.len()
	}

	/// Builds the family containing exactly the given set. Duplicate
	/// elements are ignored; the empty input yields the one terminal.
	///
	/// # Example
	///
	/// ```
	/// use zedd::Engine;
	///
	/// let mut engine = Engine::new();
	/// let a = engine.from_set([9, 3, 1, 1]);
	/// let b = engine.from_set([1, 3, 9]);
	///
	/// assert!(a == b);
	/// assert_eq!(engine.cardinality(&a), 1);
	/// ```
	pub fn from_set<I>(&mut self, set: I) -> Zdd<K>
	where
		I: IntoIterator<Item = K>,
	{
		let elements: BTreeSet<K> = set.into_iter().collect();

		// Fold greatest-first so every node is created below its key.
		let mut rv = self.one();
		for el in elements.into_iter().rev() {
			let zero = self.zero();
			rv = self.make_node(el, rv, zero);
		}
		rv
	}

	/// Builds the family containing every given set, folding
	/// [`Engine::from_set`] through [`Engine::union`]. The empty input
	/// yields the zero terminal.
	pub fn from_family<I, S>(&mut self, family: I) -> Zdd<K>
	where
		I: IntoIterator<Item = S>,
		S: IntoIterator<Item = K>,
	{
		let mut rv = self.zero();
		for set in family {
			let dd = self.from_set(set);
			rv = self.union(&rv, &dd);
		}
		rv
	}

	/// Interns the node `(key, then, else)`, creating it if absent.
	///
	/// The zero-suppression rule is applied first: a node whose "then"
	/// edge is the zero terminal denotes the same family as its "else"
	/// child, so the child is returned instead. `key` must order
	/// strictly below the keys of both children.
	pub fn make_node(&mut self, key: K, then_: Zdd<K>, else_: Zdd<K>) -> Zdd<K> {
		debug_assert!(
			then_.engine_id() == self.id && else_.engine_id() == self.id,
			"children belong to a different engine"
		);
		if then_.is_zero() {
			return else_;
		}
		debug_assert!(
			then_.key().map_or(true, |k| key < *k),
			"key ordering violated on the then-edge"
		);
		debug_assert!(
			else_.key().map_or(true, |k| key < *k),
			"key ordering violated on the else-edge"
		);

		let table_key = (key, then_.id(), else_.id());
		if let Some(node) = self.table.get(&table_key) {
			return node;
		}
		let node = Zdd::node(self.id, table_key.0.clone(), then_, else_);
		self.table.insert(table_key, &node);
		node
	}

	/// The family containing the members of either operand.
	///
	/// # Example
	///
	/// ```
	/// use zedd::Engine;
	///
	/// let mut engine = Engine::new();
	/// let a = engine.from_set([1, 3, 9]);
	/// let b = engine.from_set([1, 3, 8]);
	/// let ab = engine.union(&a, &b);
	///
	/// assert_eq!(engine.cardinality(&ab), 2);
	/// assert!(ab.contains([1, 3, 8]));
	/// ```
	pub fn union(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> Zdd<K> {
		self.check_operand(left);
		self.check_operand(right);
		self.union_rec(left, right)
	}

	/// The family containing the members of both operands.
	pub fn intersection(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> Zdd<K> {
		self.check_operand(left);
		self.check_operand(right);
		self.intersection_rec(left, right)
	}

	/// The family containing the members of `left` that are not
	/// members of `right`.
	pub fn difference(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> Zdd<K> {
		self.check_operand(left);
		self.check_operand(right);
		self.difference_rec(left, right)
	}

	/// The family containing the members of exactly one operand.
	pub fn symmetric_difference(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> Zdd<K> {
		self.check_operand(left);
		self.check_operand(right);
		self.symmetric_difference_rec(left, right)
	}

	/// The number of members of the family, memoised by node identity.
	pub fn cardinality(&mut self, node: &Zdd<K>) -> u64 {
		self.check_operand(node);
		self.cardinality_rec(node)
	}

	/// Checks whether the two families have no member in common.
	pub fn disjoint(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> bool {
		self.intersection(left, right).is_zero()
	}

	fn check_operand(&self, node: &Zdd<K>) {
		assert!(
			node.engine_id() == self.id,
			"operand was created by a different engine"
		);
	}

	fn union_rec(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> Zdd<K> {
		if right.is_one() {
			// Merging in the one terminal only adds the empty set,
			// which lives at the end of the else-spine.
			let one = self.one();
			return self.splice_else_most(left, &one);
		}
		if right.is_zero() {
			return left.clone();
		}
		if left.is_one() {
			let one = self.one();
			return self.splice_else_most(right, &one);
		}
		if left.is_zero() {
			return right.clone();
		}

		let cache_key = commuted(left, right);
		if let Some(hit) = self.union_cache.get(&cache_key) {
			return hit.clone();
		}

		let (lk, lt, le) = left.parts();
		let (rk, rt, re) = right.parts();
		let rv = match rk.cmp(lk) {
			// The right operand has no member containing the left's
			// root key, so that layer survives unchanged and only the
			// left's else-child meets the right operand.
			Ordering::Greater => {
				let else_ = self.union_rec(le, right);
				self.make_node(lk.clone(), lt.clone(), else_)
			}
			Ordering::Equal => {
				let then_ = self.union_rec(lt, rt);
				let else_ = self.union_rec(le, re);
				self.make_node(lk.clone(), then_, else_)
			}
			Ordering::Less => {
				let else_ = self.union_rec(left, re);
				self.make_node(rk.clone(), rt.clone(), else_)
			}
		};
		self.union_cache.insert(cache_key, rv.clone());
		rv
	}

	fn intersection_rec(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> Zdd<K> {
		if left.is_zero() || right.is_zero() {
			return self.zero();
		}
		if right.is_one() {
			// Only the empty set can survive; it is present in the
			// left operand exactly when its else-spine ends on one.
			return left.else_most().clone();
		}
		if left.is_one() {
			return right.else_most().clone();
		}

		let cache_key = commuted(left, right);
		if let Some(hit) = self.intersection_cache.get(&cache_key) {
			return hit.clone();
		}

		let (lk, lt, le) = left.parts();
		let (rk, rt, re) = right.parts();
		let rv = match rk.cmp(lk) {
			// No member of the right operand contains the left's root
			// key, so the left's then-child cannot contribute.
			Ordering::Greater => self.intersection_rec(le, right),
			Ordering::Equal => {
				let then_ = self.intersection_rec(lt, rt);
				let else_ = self.intersection_rec(le, re);
				self.make_node(lk.clone(), then_, else_)
			}
			Ordering::Less => self.intersection_rec(left, re),
		};
		self.intersection_cache.insert(cache_key, rv.clone());
		rv
	}

	fn difference_rec(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> Zdd<K> {
		if right.is_zero() {
			return left.clone();
		}
		if right.is_one() {
			// Removing the one terminal removes exactly the empty set.
			let zero = self.zero();
			return self.splice_else_most(left, &zero);
		}
		if left.is_zero() {
			return left.clone();
		}
		if left.is_one() {
			return if right.else_most().is_zero() {
				self.one()
			} else {
				self.zero()
			};
		}

		let cache_key = (left.clone(), right.clone());
		if let Some(hit) = self.difference_cache.get(&cache_key) {
			return hit.clone();
		}

		let (lk, lt, le) = left.parts();
		let (rk, rt, re) = right.parts();
		let rv = match rk.cmp(lk) {
			Ordering::Greater => {
				let else_ = self.difference_rec(le, right);
				self.make_node(lk.clone(), lt.clone(), else_)
			}
			Ordering::Equal => {
				let then_ = self.difference_rec(lt, rt);
				let else_ = self.difference_rec(le, re);
				self.make_node(lk.clone(), then_, else_)
			}
			Ordering::Less => self.difference_rec(left, re),
		};
		self.difference_cache.insert(cache_key, rv.clone());
		rv
	}

	fn symmetric_difference_rec(&mut self, left: &Zdd<K>, right: &Zdd<K>) -> Zdd<K> {
		if right.is_zero() {
			return left.clone();
		}
		if right.is_one() {
			return self.toggle_empty_set(left);
		}
		if left.is_zero() {
			return right.clone();
		}
		if left.is_one() {
			return self.toggle_empty_set(right);
		}

		let cache_key = commuted(left, right);
		if let Some(hit) = self.symmetric_difference_cache.get(&cache_key) {
			return hit.clone();
		}

		let (lk, lt, le) = left.parts();
		let (rk, rt, re) = right.parts();
		let rv = match rk.cmp(lk) {
			Ordering::Greater => {
				let else_ = self.symmetric_difference_rec(le, right);
				self.make_node(lk.clone(), lt.clone(), else_)
			}
			Ordering::Equal => {
				let then_ = self.symmetric_difference_rec(lt, rt);
				let else_ = self.symmetric_difference_rec(le, re);
				self.make_node(lk.clone(), then_, else_)
			}
			Ordering::Less => {
				let else_ = self.symmetric_difference_rec(left, re);
				self.make_node(rk.clone(), rt.clone(), else_)
			}
		};
		self.symmetric_difference_cache.insert(cache_key, rv.clone());
		rv
	}

	fn cardinality_rec(&mut self, node: &Zdd<K>) -> u64 {
		if node.is_zero() {
			return 0;
		}
		if node.is_one() {
			return 1;
		}
		if let Some(&n) = self.len_cache.get(node) {
			return n;
		}
		let (_, then_, else_) = node.parts();
		let (then_, else_) = (then_.clone(), else_.clone());
		let n = self.cardinality_rec(&then_) + self.cardinality_rec(&else_);
		self.len_cache.insert(node.clone(), n);
		n
	}

	/// Rebuilds `node` with the terminal ending its else-spine
	/// replaced by `child`, re-interning every node above the splice
	/// point.
	fn splice_else_most(&mut self, node: &Zdd<K>, child: &Zdd<K>) -> Zdd<K> {
		if node.is_terminal() {
			return child.clone();
		}
		let (key, then_, else_) = node.parts();
		let (key, then_, else_) = (key.clone(), then_.clone(), else_.clone());
		let spliced = self.splice_else_most(&else_, child);
		self.make_node(key, then_, spliced)
	}

	/// Flips the membership of the empty set: the symmetric difference
	/// of a family with the one terminal.
	fn toggle_empty_set(&mut self, node: &Zdd<K>) -> Zdd<K> {
		let terminal = self.terminal(node.else_most().is_zero());
		self.splice_else_most(node, &terminal)
	}
}

impl<K> Default for Engine<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	fn default() -> Self {
		Self::new()
	}
}

fn commuted<K>(left: &Zdd<K>, right: &Zdd<K>) -> (Zdd<K>, Zdd<K>)
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	if left.id() <= right.id() {
		(left.clone(), right.clone())
	} else {
		(right.clone(), left.clone())
	}
}
