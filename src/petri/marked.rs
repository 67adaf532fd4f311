//! Counted-token Petri nets.
//!
//! Here a marking carries every place of the net together with its
//! token count, so the key domain is a [`Place`] pair ordered by place
//! number first. Firing rebuilds the whole place spine, applying the
//! token delta of the transition at each level; enabling keeps the
//! then-children wherever the count covers the pre-condition.

use std::fmt;

use ahash::AHashMap as HashMap;

use crate::engine::Engine;
use crate::error::Error;
use crate::zdd::Zdd;

use super::Transition;

/// A place of the net with its token count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Place {
	pub name: usize,
	pub tokens: u64,
}

impl Place {
	pub fn new(name: usize, tokens: u64) -> Self {
		Place { name, tokens }
	}
}

impl fmt::Display for Place {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.name, self.tokens)
	}
}

/// A Petri net with counted tokens and its initial marking.
pub struct MarkedPetriNet {
	places: usize,
	transitions: Vec<Transition>,
	m0: Zdd<Place>,
	filter_cache: HashMap<(Zdd<Place>, usize, usize), Zdd<Place>>,
	fire_cache: HashMap<(Zdd<Place>, usize, usize), Zdd<Place>>,
}

impl MarkedPetriNet {
	pub fn new(places: usize, transitions: Vec<Transition>, m0: Zdd<Place>) -> Self {
		MarkedPetriNet {
			places,
			transitions,
			m0,
			filter_cache: HashMap::new(),
			fire_cache: HashMap::new(),
		}
	}

	/// Builds the dining-philosophers net: three places per
	/// philosopher (thinking, fork, eating) on a ring of forks, an
	/// `e` transition taking both forks to eat and a `t` transition
	/// returning them.
	pub fn philosophers(engine: &mut Engine<Place>, count: usize) -> Self {
		assert!(count > 0, "at least one philosopher is required");
		let places = 3 * count;

		let mut transitions = Vec::with_capacity(2 * count);
		for ph in 0..count {
			let mut eat = vec![0u64; places];
			eat[ph * 3] = 1;
			eat[ph * 3 + 1] = 1;
			eat[(ph * 3 + 4) % places] = 1;

			let mut think = vec![0u64; places];
			think[ph * 3 + 2] = 1;

			transitions.push(Transition {
				label: format!("e{}", ph),
				pre: eat.clone(),
				post: think.clone(),
			});
			transitions.push(Transition {
				label: format!("t{}", ph),
				pre: think,
				post: eat,
			});
		}

		let m0 = engine.from_set((0..places).map(|name| Place {
			name,
			tokens: if name % 3 != 2 { 1 } else { 0 },
		}));

		Self::new(places, transitions, m0)
	}

	pub fn initial_marking(&self) -> &Zdd<Place> {
		&self.m0
	}

	/// Computes the family of reachable markings.
	pub fn state_space(&mut self, engine: &mut Engine<Place>) -> Result<Zdd<Place>, Error> {
		let mut rounds = 0u64;
		let mut x = self.m0.clone();
		let mut y = {
			let successors = self.step(engine, &x)?;
			engine.union(&x, &successors)
		};
		while x != y {
			rounds += 1;
			log::debug!(
				"fixpoint round {}: {} marking(s)",
				rounds,
				engine.cardinality(&y)
			);
			x = y.clone();
			let successors = self.step(engine, &x)?;
			y = engine.union(&x, &successors);
		}
		Ok(y)
	}

	/// One transition relation step.
	pub fn step(
		&mut self,
		engine: &mut Engine<Place>,
		markings: &Zdd<Place>,
	) -> Result<Zdd<Place>, Error> {
		let mut rv = engine.zero();
		for transition in 0..self.transitions.len() {
			let enabled = self.filter_markings(engine, markings, transition, 0);
			let fired = self.fire(engine, &enabled, transition, 0)?;
			rv = engine.union(&rv, &fired);
		}
		Ok(rv)
	}

	/// Restricts `markings` to those whose token counts cover the
	/// pre-conditions of `transition`.
	fn filter_markings(
		&mut self,
		engine: &mut Engine<Place>,
		markings: &Zdd<Place>,
		transition: usize,
		place: usize,
	) -> Zdd<Place> {
		if markings.is_zero() || place >= self.places {
			return markings.clone();
		}
		let (key, then_, else_) = match markings.as_node() {
			Some(parts) => parts,
			None => return markings.clone(),
		};
		let (key, then_, else_) = (*key, then_.clone(), else_.clone());

		let cache_key = (markings.clone(), transition, place);
		if let Some(hit) = self.filter_cache.get(&cache_key) {
			return hit.clone();
		}

		let rv = if self.transitions[transition].pre[place] <= key.tokens {
			let then_ = self.filter_markings(engine, &then_, transition, place + 1);
			let else_ = self.filter_markings(engine, &else_, transition, place);
			engine.make_node(key, then_, else_)
		} else {
			self.filter_markings(engine, &else_, transition, place)
		};
		self.filter_cache.insert(cache_key, rv.clone());
		rv
	}

	/// Fires `transition` on a family of enabling markings, rebuilding
	/// the place spine with the token deltas applied.
	fn fire(
		&mut self,
		engine: &mut Engine<Place>,
		markings: &Zdd<Place>,
		transition: usize,
		place: usize,
	) -> Result<Zdd<Place>, Error> {
		if markings.is_zero() || place >= self.places {
			return Ok(markings.clone());
		}
		let cache_key = (markings.clone(), transition, place);
		if let Some(hit) = self.fire_cache.get(&cache_key) {
			return Ok(hit.clone());
		}

		let (key, then_, else_) = match markings.as_node() {
			Some(parts) => parts,
			None => return Err(Error::InvalidMarkings),
		};
		let (key, then_, else_) = (*key, then_.clone(), else_.clone());
		if key.name != place {
			return Err(Error::InvalidMarkings);
		}

		let pre = self.transitions[transition].pre[place];
		let post = self.transitions[transition].post[place];
		let tokens = (key.tokens + post)
			.checked_sub(pre)
			.ok_or(Error::InvalidMarkings)?;

		let then_ = self.fire(engine, &then_, transition, place + 1)?;
		let else_ = self.fire(engine, &else_, transition, place)?;
		let rv = engine.make_node(Place::new(place, tokens), then_, else_);
		self.fire_cache.insert(cache_key, rv.clone());
		Ok(rv)
	}
}
