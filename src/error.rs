use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("cannot update a family with a disjunctive pattern")]
	IllDefinedPattern,
	#[error("pnml file contains net that is not 1-safe")]
	NotOneSafe,
	#[error("invalid family of markings")]
	InvalidMarkings,
	#[error("malformed pnml: {0}")]
	Parse(String),
	#[error(transparent)]
	Xml(#[from] quick_xml::Error),
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
