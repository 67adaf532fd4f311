//! # Zedd
//!
//! Zedd is a zero-suppressed decision diagram (ZDD) library: a compact
//! canonical representation for families of finite sets over a totally
//! ordered key domain.
//!
//! An [`Engine`] owns a hash-consed node store and builds diagrams in
//! canonical form, so two handles denote the same family exactly when
//! they are the same node and comparing them is a pointer comparison.
//! The set-algebraic operations (union, intersection, difference,
//! symmetric difference) recurse over the key-aligned structure of
//! their operands and are memoised by operand identity.
//!
//! [`Zdd`] handles are cheap-to-clone smart pointers that answer the
//! structural queries (membership, subset, enumeration) on their own.
//! [`Hom`] builds composable transformations over diagrams from
//! minterm [`Pattern`]s, and the [`petri`] module uses the engine to
//! explore Petri-net state spaces.
//!
//! ```
//! use zedd::Engine;
//!
//! let mut engine = Engine::new();
//! let a = engine.from_family([vec![1, 3, 9], vec![1, 3, 8]]);
//! let b = engine.from_family([vec![1, 3, 9]]);
//! let ab = engine.union(&a, &b);
//!
//! assert!(ab == a);
//! assert_eq!(engine.cardinality(&ab), 2);
//! assert!(b.subset(&a));
//! ```

pub mod engine;
pub mod error;
pub mod hom;
pub mod petri;
pub mod zdd;

pub use crate::engine::{Engine, EngineOptions};
pub use crate::error::Error;
pub use crate::hom::pattern::{Pattern, Symbol};
pub use crate::hom::Hom;
pub use crate::zdd::Zdd;
