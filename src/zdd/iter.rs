//! Lazy enumeration of the members of a family.
//!
//! The traversal sees the DAG as a tree and walks it in-order with an
//! explicit stack of "then"-parents, so arbitrarily deep diagrams are
//! enumerated without recursion. A member is emitted every time the
//! walk reaches the one terminal; popping a parent restores the prefix
//! of keys that is still decided at that depth.

use std::hash::Hash;

use super::Zdd;

/// Iterator over the members of a family, produced as vectors of keys
/// in ascending order. Created by [`Zdd::iter`].
pub struct FamilyIter<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	stack: Vec<Zdd<K>>,
	prefix: Vec<K>,
	node: Option<Zdd<K>>,
}

impl<K> FamilyIter<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	pub(crate) fn new(root: Zdd<K>) -> Self {
		FamilyIter {
			stack: vec![],
			prefix: vec![],
			node: Some(root),
		}
	}
}

impl<K> Iterator for FamilyIter<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	type Item = Vec<K>;

	fn next(&mut self) -> Option<Vec<K>> {
		loop {
			let node = self.node.take()?;
			if node.is_zero() {
				return None;
			}
			if node.is_one() {
				let item = self.prefix.clone();
				if let Some(parent) = self.stack.pop() {
					let (key, then_, _) = parent.parts();
					let (key, then_) = (key.clone(), then_.clone());
					self.prefix.retain(|el| *el < key);
					self.prefix.push(key);
					self.node = Some(then_);
				}
				return Some(item);
			}
			let (key, then_, else_) = node.parts();
			if !else_.is_zero() {
				let else_ = else_.clone();
				self.stack.push(node.clone());
				self.node = Some(else_);
			} else {
				self.prefix.push(key.clone());
				self.node = Some(then_.clone());
			}
		}
	}
}
