//! 1-safe Petri nets.
//!
//! A marking of a 1-safe net is the set of places holding a token, so
//! the key domain is the plain place number and the reachable state
//! space is a family of place sets. Enabling and firing are recursive
//! key-aligned rewrites of the marking family, memoised per
//! (family, transition, place) triple.

use std::{cmp::Ordering, path::Path};

use ahash::AHashMap as HashMap;

use crate::engine::Engine;
use crate::error::Error;
use crate::zdd::Zdd;

use super::pnml::{self, PnmlNet};
use super::Transition;

/// A 1-safe Petri net together with its initial marking.
#[derive(Debug)]
pub struct SafePetriNet {
	name: String,
	places: usize,
	transitions: Vec<Transition>,
	m0: Zdd<usize>,
	filter_cache: HashMap<(Zdd<usize>, usize, usize), Zdd<usize>>,
	fire_cache: HashMap<(Zdd<usize>, usize, usize), Zdd<usize>>,
}

impl SafePetriNet {
	pub fn new(
		name: impl Into<String>,
		places: usize,
		transitions: Vec<Transition>,
		m0: Zdd<usize>,
	) -> Self {
		SafePetriNet {
			name: name.into(),
			places,
			transitions,
			m0,
			filter_cache: HashMap::new(),
			fire_cache: HashMap::new(),
		}
	}

	/// Loads every net in a PNML file. A place with more than one
	/// initial token makes the net unusable for this driver.
	pub fn from_pnml(engine: &mut Engine<usize>, path: &Path) -> Result<Vec<Self>, Error> {
		let nets = pnml::parse_file(path)?;
		nets.into_iter()
			.map(|net| Self::from_parsed(engine, net))
			.collect()
	}

	/// Loads every net in a PNML document held in memory.
	pub fn from_pnml_str(engine: &mut Engine<usize>, xml: &str) -> Result<Vec<Self>, Error> {
		let nets = pnml::parse_str(xml)?;
		nets.into_iter()
			.map(|net| Self::from_parsed(engine, net))
			.collect()
	}

	fn from_parsed(engine: &mut Engine<usize>, net: PnmlNet) -> Result<Self, Error> {
		let places = net.places.len();

		let mut num_from_id = HashMap::new();
		for (num, place) in net.places.iter().enumerate() {
			if place.tokens > 1 {
				return Err(Error::NotOneSafe);
			}
			num_from_id.insert(place.id.as_str(), num);
		}
		let m0 = engine.from_set(
			net.places
				.iter()
				.enumerate()
				.filter(|(_, place)| place.tokens > 0)
				.map(|(num, _)| num),
		);

		let mut index_from_id = HashMap::new();
		let mut transitions: Vec<Transition> = net
			.transitions
			.iter()
			.enumerate()
			.map(|(index, transition)| {
				index_from_id.insert(transition.id.as_str(), index);
				Transition {
					label: transition
						.label
						.clone()
						.unwrap_or_else(|| transition.id.clone()),
					pre: vec![0; places],
					post: vec![0; places],
				}
			})
			.collect();

		// An arc leaving a place is a pre-condition of its target
		// transition; every other arc is a post-condition.
		for arc in &net.arcs {
			if let Some(&place) = num_from_id.get(arc.source.as_str()) {
				let transition = index_from_id.get(arc.target.as_str()).ok_or_else(|| {
					Error::Parse(format!("arc target '{}' is unknown", arc.target))
				})?;
				transitions[*transition].pre[place] = arc.weight;
			} else {
				let transition = index_from_id.get(arc.source.as_str()).ok_or_else(|| {
					Error::Parse(format!("arc source '{}' is unknown", arc.source))
				})?;
				let place = num_from_id.get(arc.target.as_str()).ok_or_else(|| {
					Error::Parse(format!("arc target '{}' is unknown", arc.target))
				})?;
				transitions[*transition].post[*place] = arc.weight;
			}
		}

		Ok(Self::new(net.id, places, transitions, m0))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn initial_marking(&self) -> &Zdd<usize> {
		&self.m0
	}

	/// Computes the family of reachable markings: the least fixpoint
	/// of merging every transition's successors into the frontier.
	pub fn state_space(&mut self, engine: &mut Engine<usize>) -> Result<Zdd<usize>, Error> {
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

	/// One transition relation step: the union over all transitions of
	/// firing on the markings that enable them.
	pub fn step(
		&mut self,
		engine: &mut Engine<usize>,
		markings: &Zdd<usize>,
	) -> Result<Zdd<usize>, Error> {
		let mut rv = engine.zero();
		for transition in 0..self.transitions.len() {
			let enabled = self.filter_markings(engine, markings, transition, 0);
			let fired = self.fire(engine, &enabled, transition, 0)?;
			rv = engine.union(&rv, &fired);
		}
		Ok(rv)
	}

	/// Restricts `markings` to those enabling `transition`: every
	/// place with a pre-condition must appear on the accepting path.
	fn filter_markings(
		&mut self,
		engine: &mut Engine<usize>,
		markings: &Zdd<usize>,
		transition: usize,
		place: usize,
	) -> Zdd<usize> {
		if markings.is_zero() || place >= self.places {
			return markings.clone();
		}
		let cache_key = (markings.clone(), transition, place);
		if let Some(hit) = self.filter_cache.get(&cache_key) {
			return hit.clone();
		}

		let required = self.transitions[transition].pre[place] > 0;
		let rv = if required {
			if markings.is_one() {
				engine.zero()
			} else {
				let (key, then_, else_) = markings.parts();
				let (key, then_, else_) = (*key, then_.clone(), else_.clone());
				match key.cmp(&place) {
					Ordering::Greater => engine.zero(),
					Ordering::Equal => {
						let then_ = self.filter_markings(engine, &then_, transition, place + 1);
						let zero = engine.zero();
						engine.make_node(place, then_, zero)
					}
					Ordering::Less => {
						let then_ = self.filter_markings(engine, &then_, transition, place);
						let else_ = self.filter_markings(engine, &else_, transition, place);
						engine.make_node(key, then_, else_)
					}
				}
			}
		} else {
			self.filter_markings(engine, markings, transition, place + 1)
		};
		self.filter_cache.insert(cache_key, rv.clone());
		rv
	}

	/// Fires `transition` on a family of enabling markings, producing
	/// and consuming tokens place by place.
	fn fire(
		&mut self,
		engine: &mut Engine<usize>,
		markings: &Zdd<usize>,
		transition: usize,
		place: usize,
	) -> Result<Zdd<usize>, Error> {
		if markings.is_zero() || place >= self.places {
			return Ok(markings.clone());
		}
		let cache_key = (markings.clone(), transition, place);
		if let Some(hit) = self.fire_cache.get(&cache_key) {
			return Ok(hit.clone());
		}

		let pre = self.transitions[transition].pre[place];
		let post = self.transitions[transition].post[place];
		let rv = if post > pre {
			// A token appears in `place`: insert the key in front of
			// everything the marking says about greater places.
			let ahead = match markings.as_node() {
				None => true,
				Some((key, _, _)) => *key > place,
			};
			if ahead {
				let then_ = self.fire(engine, markings, transition, place + 1)?;
				let zero = engine.zero();
				engine.make_node(place, then_, zero)
			} else {
				let (key, then_, else_) = markings.parts();
				let (key, then_, else_) = (*key, then_.clone(), else_.clone());
				if key == place {
					// The place already holds a token.
					return Err(Error::InvalidMarkings);
				}
				let then_ = self.fire(engine, &then_, transition, place)?;
				let else_ = self.fire(engine, &else_, transition, place)?;
				engine.make_node(key, then_, else_)
			}
		} else if post < pre {
			// The token in `place` is consumed: the key disappears.
			let (key, then_, else_) = match markings.as_node() {
				Some(parts) => parts,
				None => return Err(Error::InvalidMarkings),
			};
			let (key, then_, else_) = (*key, then_.clone(), else_.clone());
			match key.cmp(&place) {
				Ordering::Equal => self.fire(engine, &then_, transition, place + 1)?,
				Ordering::Less => {
					let then_ = self.fire(engine, &then_, transition, place)?;
					let else_ = self.fire(engine, &else_, transition, place)?;
					engine.make_node(key, then_, else_)
				}
				Ordering::Greater => return Err(Error::InvalidMarkings),
			}
		} else {
			self.fire(engine, markings, transition, place + 1)?
		};
		self.fire_cache.insert(cache_key, rv.clone());
		Ok(rv)
	}
}
