//! PNML reader.
//!
//! Reads the subset of PNML the drivers need: `net`, `place` (with an
//! optional `initialMarking/text` token count), `transition` and `arc`
//! (with an optional `inscription/text` weight, defaulting to 1).
//! Optional `name/text` labels fall back to the element id. Elements
//! are matched by local name, so namespaced documents parse the same
//! as plain ones, and places may live at any nesting depth below
//! their net.

use std::{fs, path::Path};

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Error;

#[derive(Clone, Debug)]
pub struct PnmlPlace {
	pub id: String,
	pub label: Option<String>,
	pub tokens: u64,
}

#[derive(Clone, Debug)]
pub struct PnmlTransition {
	pub id: String,
	pub label: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PnmlArc {
	pub source: String,
	pub target: String,
	pub weight: u64,
}

/// One `net` element, with places in document order.
#[derive(Clone, Debug)]
pub struct PnmlNet {
	pub id: String,
	pub places: Vec<PnmlPlace>,
	pub transitions: Vec<PnmlTransition>,
	pub arcs: Vec<PnmlArc>,
}

/// Parses every net in a PNML file.
pub fn parse_file(path: &Path) -> Result<Vec<PnmlNet>, Error> {
	let xml = fs::read_to_string(path)?;
	parse_str(&xml)
}

/// Parses every net in a PNML document.
pub fn parse_str(xml: &str) -> Result<Vec<PnmlNet>, Error> {
	let mut reader = Reader::from_str(xml);
	reader.trim_text(true);

	let mut parser = Parser::default();
	loop {
		match reader.read_event()? {
			Event::Start(el) => parser.open(&el)?,
			Event::Empty(el) => {
				// An empty element opens and closes in one step.
				let name = el.local_name().as_ref().to_vec();
				parser.open(&el)?;
				parser.close(&name);
			}
			Event::End(el) => parser.close(el.local_name().as_ref()),
			Event::Text(text) => {
				let text = text.unescape()?;
				parser.text(text.as_ref())?;
			}
			Event::Eof => break,
			_ => {}
		}
	}
	Ok(parser.nets)
}

#[derive(Default)]
struct Parser {
	nets: Vec<PnmlNet>,
	in_net: bool,
	in_place: bool,
	in_transition: bool,
	in_arc: bool,
	in_initial_marking: bool,
	in_name: bool,
	in_inscription: bool,
	in_text: bool,
}

impl Parser {
	fn open(&mut self, el: &BytesStart) -> Result<(), Error> {
		match el.local_name().as_ref() {
			b"net" => {
				let id = attribute(el, b"id")?
					.unwrap_or_else(|| format!("net{}", self.nets.len()));
				self.nets.push(PnmlNet {
					id,
					places: vec![],
					transitions: vec![],
					arcs: vec![],
				});
				self.in_net = true;
			}
			b"place" if self.in_net => {
				let id = required_attribute(el, b"id")?;
				if let Some(net) = self.nets.last_mut() {
					net.places.push(PnmlPlace {
						id,
						label: None,
						tokens: 0,
					});
				}
				self.in_place = true;
			}
			b"transition" if self.in_net => {
				let id = required_attribute(el, b"id")?;
				if let Some(net) = self.nets.last_mut() {
					net.transitions.push(PnmlTransition { id, label: None });
				}
				self.in_transition = true;
			}
			b"arc" if self.in_net => {
				let source = required_attribute(el, b"source")?;
				let target = required_attribute(el, b"target")?;
				if let Some(net) = self.nets.last_mut() {
					net.arcs.push(PnmlArc {
						source,
						target,
						weight: 1,
					});
				}
				self.in_arc = true;
			}
			b"initialMarking" => self.in_initial_marking = true,
			b"name" => self.in_name = true,
			b"inscription" => self.in_inscription = true,
			b"text" => self.in_text = true,
			_ => {}
		}
		Ok(())
	}

	fn close(&mut self, name: &[u8]) {
		match name {
			b"net" => self.in_net = false,
			b"place" => self.in_place = false,
			b"transition" => self.in_transition = false,
			b"arc" => self.in_arc = false,
			b"initialMarking" => self.in_initial_marking = false,
			b"name" => self.in_name = false,
			b"inscription" => self.in_inscription = false,
			b"text" => self.in_text = false,
			_ => {}
		}
	}

	fn text(&mut self, text: &str) -> Result<(), Error> {
		if !self.in_text || !self.in_net {
			return Ok(());
		}
		let net = match self.nets.last_mut() {
			Some(net) => net,
			None => return Ok(()),
		};
		if self.in_initial_marking && self.in_place {
			if let Some(place) = net.places.last_mut() {
				place.tokens = parse_int(text)?;
			}
		} else if self.in_inscription && self.in_arc {
			if let Some(arc) = net.arcs.last_mut() {
				arc.weight = parse_int(text)?;
			}
		} else if self.in_name && self.in_place {
			if let Some(place) = net.places.last_mut() {
				place.label = Some(text.to_string());
			}
		} else if self.in_name && self.in_transition {
			if let Some(transition) = net.transitions.last_mut() {
				transition.label = Some(text.to_string());
			}
		}
		Ok(())
	}
}

fn attribute(el: &BytesStart, name: &[u8]) -> Result<Option<String>, Error> {
	for attr in el.attributes() {
		let attr: Attribute = attr.map_err(|err| Error::Parse(err.to_string()))?;
		if attr.key.local_name().as_ref() == name {
			let value = attr
				.unescape_value()
				.map_err(|err| Error::Parse(err.to_string()))?;
			return Ok(Some(value.into_owned()));
		}
	}
	Ok(None)
}

fn required_attribute(el: &BytesStart, name: &[u8]) -> Result<String, Error> {
	attribute(el, name)?.ok_or_else(|| {
		Error::Parse(format!(
			"element '{}' lacks attribute '{}'",
			String::from_utf8_lossy(el.local_name().as_ref()),
			String::from_utf8_lossy(name)
		))
	})
}

fn parse_int(text: &str) -> Result<u64, Error> {
	text.trim()
		.parse::<u64>()
		.map_err(|_| Error::Parse(format!("invalid integer '{}'", text.trim())))
}
