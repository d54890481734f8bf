use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid edge description: {kind}")]
pub struct InvalidDescription {
    pub kind: InvalidDescriptionKind,
}

impl InvalidDescription {
    pub fn new(kind: InvalidDescriptionKind) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidDescriptionKind {
    EdgeIdNotInsertable,
    NonNumericWeight,
}

impl fmt::Display for InvalidDescriptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InvalidDescriptionKind::EdgeIdNotInsertable => {
                "an edge id does not describe the endpoints of a new edge"
            }
            InvalidDescriptionKind::NonNumericWeight => "the weight is not a number",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid attribute target: {kind}")]
pub struct InvalidTarget {
    pub kind: InvalidTargetKind,
}

impl InvalidTarget {
    pub fn new(kind: InvalidTargetKind) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidTargetKind {
    NodeAbsent,
    EdgeAbsent,
    Description(InvalidDescriptionKind),
}

impl fmt::Display for InvalidTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidTargetKind::NodeAbsent => f.write_str("node does not exist"),
            InvalidTargetKind::EdgeAbsent => f.write_str("edge does not exist"),
            InvalidTargetKind::Description(kind) => write!(f, "{kind}"),
        }
    }
}

impl From<InvalidDescription> for InvalidTarget {
    fn from(error: InvalidDescription) -> Self {
        Self::new(InvalidTargetKind::Description(error.kind))
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("{0}")]
    InvalidDescription(#[from] InvalidDescription),
    #[error("{0}")]
    InvalidTarget(#[from] InvalidTarget),
}
