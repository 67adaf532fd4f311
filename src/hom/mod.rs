//! # Homomorphisms
//!
//! A homomorphism is a function over ZDDs, built compositionally: the
//! leaves either pass the operand through ([`Hom::Identity`]), replace
//! it with a terminal ([`Hom::Accept`], [`Hom::Reject`]) or rewrite it
//! against a minterm pattern ([`Hom::Update`], [`Hom::Filter`]); inner
//! nodes combine the results of their children with the set-algebraic
//! operations.
//!
//! ```
//! use zedd::{Engine, Hom, Pattern, Symbol};
//!
//! let mut engine = Engine::new();
//! let dd = engine.from_family([vec![1, 2], vec![2, 3]]);
//!
//! // Insert key 4 into every member, then drop key 2.
//! let pattern = Pattern::of([Symbol::positive(4), Symbol::negative(2)]);
//! let update = Hom::update(&pattern).unwrap();
//! let rv = update.apply(&mut engine, &dd);
//!
//! assert!(rv.contains([1, 4]));
//! assert!(rv.contains([3, 4]));
//! ```

pub mod pattern;

use std::{cmp::Ordering, hash::Hash};

use crate::engine::Engine;
use crate::error::Error;
use crate::zdd::Zdd;

use self::pattern::{Pattern, Symbol};

/// A composable operation on ZDDs.
pub enum Hom<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	/// Returns the operand unchanged.
	Identity,
	/// Returns the one terminal regardless of the operand.
	Accept,
	/// Returns the zero terminal regardless of the operand.
	Reject,
	/// The union of both children applied to the operand.
	Union(Box<Hom<K>>, Box<Hom<K>>),
	/// The intersection of both children applied to the operand.
	Intersection(Box<Hom<K>>, Box<Hom<K>>),
	/// The difference of both children applied to the operand.
	Difference(Box<Hom<K>>, Box<Hom<K>>),
	/// The symmetric difference of both children applied to the
	/// operand.
	SymmetricDifference(Box<Hom<K>>, Box<Hom<K>>),
	/// Sets the positive keys and unsets the negative keys of a single
	/// minterm in every member of the operand. Built with
	/// [`Hom::update`], which keeps the symbols sorted.
	Update(Vec<Symbol<K>>),
	/// Selects the members matching at least one minterm of the
	/// pattern, then applies the inner homomorphism to the selection.
	Filter(Pattern<K>, Box<Hom<K>>),
}

impl<K> Hom<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	pub fn union(left: Hom<K>, right: Hom<K>) -> Self {
		Hom::Union(Box::new(left), Box::new(right))
	}

	pub fn intersection(left: Hom<K>, right: Hom<K>) -> Self {
		Hom::Intersection(Box::new(left), Box::new(right))
	}

	pub fn difference(left: Hom<K>, right: Hom<K>) -> Self {
		Hom::Difference(Box::new(left), Box::new(right))
	}

	pub fn symmetric_difference(left: Hom<K>, right: Hom<K>) -> Self {
		Hom::SymmetricDifference(Box::new(left), Box::new(right))
	}

	/// Builds an update homomorphism from a pattern holding exactly
	/// one minterm; any other pattern is ill-defined for an update.
	pub fn update(pattern: &Pattern<K>) -> Result<Self, Error> {
		let mut minterms = pattern.minterms().iter();
		let minterm = match minterms.next() {
			Some(minterm) => minterm,
			None => return Err(Error::IllDefinedPattern),
		};
		if minterms.next().is_some() {
			return Err(Error::IllDefinedPattern);
		}
		Ok(Hom::Update(minterm.iter().cloned().collect()))
	}

	pub fn filter(pattern: Pattern<K>, inner: Hom<K>) -> Self {
		Hom::Filter(pattern, Box::new(inner))
	}

	/// Applies the homomorphism to `dd` on the given engine.
	pub fn apply(&self, engine: &mut Engine<K>, dd: &Zdd<K>) -> Zdd<K> {
		match self {
			Hom::Identity => dd.clone(),
			Hom::Accept => engine.one(),
			Hom::Reject => engine.zero(),
			Hom::Union(left, right) => {
				let a = left.apply(engine, dd);
				let b = right.apply(engine, dd);
				engine.union(&a, &b)
			}
			Hom::Intersection(left, right) => {
				let a = left.apply(engine, dd);
				let b = right.apply(engine, dd);
				engine.intersection(&a, &b)
			}
			Hom::Difference(left, right) => {
				let a = left.apply(engine, dd);
				let b = right.apply(engine, dd);
				engine.difference(&a, &b)
			}
			Hom::SymmetricDifference(left, right) => {
				let a = left.apply(engine, dd);
				let b = right.apply(engine, dd);
				engine.symmetric_difference(&a, &b)
			}
			Hom::Update(symbols) => {
				if dd.is_zero() {
					return dd.clone();
				}
				let mut rv = dd.clone();
				for symbol in symbols {
					rv = if symbol.enabled() {
						set_key(engine, symbol.key(), &rv)
					} else {
						unset_key(engine, symbol.key(), &rv)
					};
				}
				rv
			}
			Hom::Filter(pattern, inner) => {
				let mut satisfied = engine.zero();
				for minterm in pattern.minterms() {
					let symbols: Vec<Symbol<K>> = minterm.iter().cloned().collect();
					let selected = filter_minterm(engine, dd, &symbols);
					satisfied = engine.union(&satisfied, &selected);
				}
				inner.apply(engine, &satisfied)
			}
		}
	}
}

/// Rewrites every member of `dd` to contain `key`.
fn set_key<K>(engine: &mut Engine<K>, key: &K, dd: &Zdd<K>) -> Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	if dd.is_zero() {
		return dd.clone();
	}
	if dd.is_one() {
		let zero = engine.zero();
		return engine.make_node(key.clone(), dd.clone(), zero);
	}
	let (dk, dt, de) = dd.parts();
	let (dk, dt, de) = (dk.clone(), dt.clone(), de.clone());
	match dk.cmp(key) {
		Ordering::Greater => {
			let zero = engine.zero();
			engine.make_node(key.clone(), dd.clone(), zero)
		}
		Ordering::Equal => {
			// Members with and without the key collapse onto the same
			// extended members.
			let merged = engine.union(&dt, &de);
			let zero = engine.zero();
			engine.make_node(dk, merged, zero)
		}
		Ordering::Less => {
			let then_ = set_key(engine, key, &dt);
			let else_ = set_key(engine, key, &de);
			engine.make_node(dk, then_, else_)
		}
	}
}

/// Rewrites every member of `dd` to not contain `key`.
fn unset_key<K>(engine: &mut Engine<K>, key: &K, dd: &Zdd<K>) -> Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	if dd.is_zero() || dd.is_one() {
		return dd.clone();
	}
	let (dk, dt, de) = dd.parts();
	let (dk, dt, de) = (dk.clone(), dt.clone(), de.clone());
	match dk.cmp(key) {
		Ordering::Greater => dd.clone(),
		Ordering::Equal => engine.union(&dt, &de),
		Ordering::Less => {
			let then_ = unset_key(engine, key, &dt);
			let else_ = unset_key(engine, key, &de);
			engine.make_node(dk, then_, else_)
		}
	}
}

/// Selects the members of `dd` whose characteristic function satisfies
/// the minterm. The symbols must be sorted ascending.
fn filter_minterm<K>(engine: &mut Engine<K>, dd: &Zdd<K>, minterm: &[Symbol<K>]) -> Zdd<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	if dd.is_zero() || minterm.is_empty() {
		return dd.clone();
	}
	let symbol = &minterm[0];

	if symbol.enabled() {
		// The key is required: members lacking it are rejected.
		if dd.is_one() {
			return engine.zero();
		}
		let (dk, dt, de) = dd.parts();
		let (dk, dt, de) = (dk.clone(), dt.clone(), de.clone());
		match dk.cmp(symbol.key()) {
			Ordering::Greater => engine.zero(),
			Ordering::Equal => {
				let then_ = filter_minterm(engine, &dt, &minterm[1..]);
				let zero = engine.zero();
				engine.make_node(dk, then_, zero)
			}
			Ordering::Less => {
				let then_ = filter_minterm(engine, &dt, minterm);
				let else_ = filter_minterm(engine, &de, minterm);
				engine.make_node(dk, then_, else_)
			}
		}
	} else {
		// The key is forbidden: members holding it are rejected.
		if dd.is_one() {
			return filter_minterm(engine, dd, &minterm[1..]);
		}
		let (dk, dt, de) = dd.parts();
		let (dk, dt, de) = (dk.clone(), dt.clone(), de.clone());
		match dk.cmp(symbol.key()) {
			Ordering::Greater => filter_minterm(engine, dd, &minterm[1..]),
			Ordering::Equal => filter_minterm(engine, &de, &minterm[1..]),
			Ordering::Less => {
				let then_ = filter_minterm(engine, &dt, minterm);
				let else_ = filter_minterm(engine, &de, minterm);
				engine.make_node(dk, then_, else_)
			}
		}
	}
}
