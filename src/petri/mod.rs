//! # Petri-net drivers
//!
//! Consumers of the engine that compute the reachable state space of a
//! Petri net as a ZDD. Two place representations are supported:
//!
//! - [`SafePetriNet`] encodes 1-safe nets over plain place numbers; a
//!   marking is the set of marked places. Nets can be loaded from PNML
//!   through [`pnml`].
//! - [`MarkedPetriNet`] encodes counted tokens with [`Place`] keys; a
//!   marking carries every place together with its token count. The
//!   dining-philosophers net is built analytically on top of it.
//!
//! Both drivers share the same fixpoint loop: starting from the
//! initial marking, every transition is fired on the markings that
//! enable it and the successors are merged in until the set stops
//! growing. Because equal families are pointer-equal, the fixpoint
//! test is a pointer comparison.

pub mod marked;
pub mod pnml;
pub mod safe;

pub use self::marked::{MarkedPetriNet, Place};
pub use self::safe::SafePetriNet;

/// A transition with its pre- and post-condition weights, indexed by
/// place number.
#[derive(Clone, Debug)]
pub struct Transition {
	pub label: String,
	pub pre: Vec<u64>,
	pub post: Vec<u64>,
}
