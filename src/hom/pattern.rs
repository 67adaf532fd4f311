//! Minterm patterns.
//!
//! A [`Pattern`] is a disjunction of minterms, each minterm a
//! conjunction of positive or negative key [`Symbol`]s. Patterns drive
//! the [`Update`](crate::hom::Hom::Update) and
//! [`Filter`](crate::hom::Hom::Filter) homomorphisms: a set matches a
//! minterm when it contains every positive key and none of the
//! negative ones.
//!
//! The operators mirror boolean algebra in disjunctive normal form:
//! `|` unions the minterms, `&` distributes pairwise, `!` applies
//! De Morgan.
//!
//! ```
//! use zedd::Symbol;
//!
//! let fork_taken = Symbol::positive("fork");
//! let not_eating = Symbol::negative("eating");
//! let pattern = zedd::Pattern::of([fork_taken, not_eating]);
//!
//! assert_eq!(pattern.minterms().len(), 1);
//! ```

use std::{
    collections::BTreeSet,
    fmt,
    ops::{BitAnd, BitOr, Not},
};

/// A positive or negative occurrence of a key in a minterm.
///
/// Symbols order by key first; at equal keys the negative symbol
/// comes before the positive one.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol<K>
where
	K: Clone + Ord,
{
	key: K,
	enabled: bool,
}

impl<K> Symbol<K>
where
	K: Clone + Ord,
{
	/// A symbol requiring the key to be present.
	pub fn positive(key: K) -> Self {
		Symbol { key, enabled: true }
	}

	/// A symbol requiring the key to be absent.
	pub fn negative(key: K) -> Self {
		Symbol { key, enabled: false }
	}

	pub fn key(&self) -> &K {
		&self.key
	}

	/// `true` for a positive symbol.
	pub fn enabled(&self) -> bool {
		self.enabled
	}
}

impl<K> Not for Symbol<K>
where
	K: Clone + Ord,
{
	type Output = Symbol<K>;

	fn not(self) -> Symbol<K> {
		Symbol {
			key: self.key,
			enabled: !self.enabled,
		}
	}
}

impl<K> fmt::Display for Symbol<K>
where
	K: Clone + Ord + fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if !self.enabled {
			write!(f, "~")?;
		}
		write!(f, "{}", self.key)
	}
}

pub type Minterm<K> = BTreeSet<Symbol<K>>;

/// A disjunction of minterms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern<K>
where
	K: Clone + Ord,
{
	minterms: BTreeSet<Minterm<K>>,
}

impl<K> Pattern<K>
where
	K: Clone + Ord,
{
	/// The pattern matching nothing: an empty disjunction.
	pub fn empty() -> Self {
		Pattern {
			minterms: BTreeSet::new(),
		}
	}

	/// The pattern matching everything: the single empty minterm.
	pub fn always() -> Self {
		let mut minterms = BTreeSet::new();
		minterms.insert(Minterm::new());
		Pattern { minterms }
	}

	/// The pattern consisting of a single minterm over the given
	/// symbols.
	pub fn of<I>(symbols: I) -> Self
	where
		I: IntoIterator<Item = Symbol<K>>,
	{
		let mut minterms = BTreeSet::new();
		minterms.insert(symbols.into_iter().collect());
		Pattern { minterms }
	}

	pub fn minterms(&self) -> &BTreeSet<Minterm<K>> {
		&self.minterms
	}
}

impl<K> BitOr for Pattern<K>
where
	K: Clone + Ord,
{
	type Output = Pattern<K>;

	fn bitor(mut self, other: Pattern<K>) -> Pattern<K> {
		self.minterms.extend(other.minterms);
		self
	}
}

impl<K> BitAnd for Pattern<K>
where
	K: Clone + Ord,
{
	type Output = Pattern<K>;

	fn bitand(self, other: Pattern<K>) -> Pattern<K> {
		let mut minterms = BTreeSet::new();
		for left in &self.minterms {
			for right in &other.minterms {
				minterms.insert(left.union(right).cloned().collect());
			}
		}
		Pattern { minterms }
	}
}

impl<K> Not for Pattern<K>
where
	K: Clone + Ord,
{
	type Output = Pattern<K>;

	fn not(self) -> Pattern<K> {
		// De Morgan: negate each minterm into a disjunction of negated
		// symbols, then conjoin the results. The fold starts from the
		// always-true pattern, the identity of `&`, which also makes
		// the negation of the empty disjunction come out as always.
		let mut rv = Pattern::always();
		for minterm in &self.minterms {
			rv = rv & negate_minterm(minterm);
		}
		rv
	}
}

fn negate_minterm<K>(minterm: &Minterm<K>) -> Pattern<K>
where
	K: Clone + Ord,
{
	let mut rv = Pattern::empty();
	for symbol in minterm {
		rv = rv | Pattern::of([!symbol.clone()]);
	}
	rv
}

impl<K> fmt::Display for Pattern<K>
where
	K: Clone + Ord + fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let minterms: Vec<String> = self
			.minterms
			.iter()
			.map(|mt| {
				mt.iter()
					.map(|sym| sym.to_string())
					.collect::<Vec<_>>()
					.join(" & ")
			})
			.collect();
		write!(f, "{}", minterms.join(" | "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pos(key: i32) -> Symbol<i32> {
		Symbol::positive(key)
	}

	fn neg(key: i32) -> Symbol<i32> {
		Symbol::negative(key)
	}

	#[test]
	fn symbol_ordering() {
		let mut symbols = BTreeSet::new();
		symbols.insert(pos(2));
		symbols.insert(neg(2));
		symbols.insert(pos(1));

		let ordered: Vec<Symbol<i32>> = symbols.into_iter().collect();
		assert_eq!(ordered, vec![pos(1), neg(2), pos(2)]);
	}

	#[test]
	fn disjunction_and_conjunction() {
		let p = Pattern::of([pos(1)]) | Pattern::of([pos(2)]);
		assert_eq!(p.minterms().len(), 2);

		let q = p & Pattern::of([neg(3)]);
		assert_eq!(q.minterms().len(), 2);
		for mt in q.minterms() {
			assert!(mt.contains(&neg(3)));
		}
	}

	#[test]
	fn de_morgan() {
		let p = !Pattern::of([pos(1), pos(2)]);
		assert_eq!(p, Pattern::of([neg(1)]) | Pattern::of([neg(2)]));

		let q = !(Pattern::of([pos(1)]) | Pattern::of([pos(2)]));
		assert_eq!(q, Pattern::of([neg(1), neg(2)]));
	}

	#[test]
	fn degenerate_negations() {
		assert_eq!(!Pattern::<i32>::empty(), Pattern::always());
		assert_eq!(!Pattern::<i32>::always(), Pattern::empty());
	}
}
