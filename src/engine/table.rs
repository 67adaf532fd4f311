//! The unique table backing an engine.
//!
//! Every internal node is interned under its structural triple
//! `(key, then-identity, else-identity)`, which is what makes equal
//! families pointer-equal. Child identities are raw node identities
//! rather than recursive hashes: canonicity guarantees that identical
//! children are the same node, and a live entry pins its children
//! through the node record, so an identity in a live key can never be
//! reused by another node.
//!
//! The weak variant holds its values through `Weak` references, which
//! lets nodes disappear once every external handle (and every cache
//! entry) is gone; the table purges stale slots itself, so a reclaimed
//! triple can be interned again without breaking canonicity.

use std::{hash::Hash, rc::Weak};

use ahash::AHashMap as HashMap;
use weak_table::WeakValueHashMap;

use crate::zdd::{Inner, Zdd};

pub(crate) type TableKey<K> = (K, usize, usize);

pub(crate) enum UniqueTable<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	Strong(HashMap<TableKey<K>, Zdd<K>>),
	Weak(WeakValueHashMap<TableKey<K>, Weak<Inner<K>>, ahash::RandomState>),
}

impl<K> UniqueTable<K>
where
	K: Clone + Hash + PartialEq + Eq + Ord,
{
	pub(crate) fn new(weak: bool) -> Self {
		if weak {
			UniqueTable::Weak(WeakValueHashMap::with_hasher(ahash::RandomState::new()))
		} else {
			UniqueTable::Strong(HashMap::new())
		}
	}

	pub(crate) fn get(&self, key: &TableKey<K>) -> Option<Zdd<K>> {
		match self {
			UniqueTable::Strong(map) => map.get(key).cloned(),
			UniqueTable::Weak(map) => map.get(key).map(Zdd::from_inner),
		}
	}

	pub(crate) fn insert(&mut self, key: TableKey<K>, node: &Zdd<K>) {
		match self {
			UniqueTable::Strong(map) => {
				map.insert(key, node.clone());
			}
			UniqueTable::Weak(map) => {
				map.insert(key, node.inner_rc().clone());
			}
		}
	}

	pub(crate) fn len(&self) -> usize {
		match self {
			UniqueTable::Strong(map) => map.len(),
			UniqueTable::Weak(map) => map.len(),
		}
	}
}
