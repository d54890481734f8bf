//! Handles identifying nodes and edges inside one graph.
//!
//! Caller-supplied node values are mapped to [`NodeId`] handles and every edge
//! instance gets an [`EdgeId`]. Both are issued from an arena that only grows:
//! a handle of a removed node or edge is never issued again within the same
//! graph, so a stale handle held by a caller can only ever resolve to nothing.
//! The exception is [`Graph::compact`](crate::graph::Graph::compact), which
//! reclaims the holes and renumbers the remaining handles.

use std::{fmt, hash::Hash};

/// An integer handle of a node or an edge.
///
/// Conceptually, a handle is an index to a contiguous arena, so algorithms can
/// use it for indexing into their own tables.
pub trait IdType: Copy + Ord + Hash + fmt::Debug {
    /// Converts the handle into the corresponding `usize`.
    fn as_usize(&self) -> usize;

    /// Converts an `usize` into the corresponding handle.
    fn from_usize(index: usize) -> Self;
}

/// Handle of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

/// Handle of one edge instance.
///
/// An undirected edge is represented by two instances, see
/// [`EdgeKind`](crate::core::edge::EdgeKind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u64);

macro_rules! impl_int_id {
    ($id_ty:ident, $prefix:literal) => {
        impl IdType for $id_ty {
            fn as_usize(&self) -> usize {
                self.0.try_into().expect("id type overflow")
            }

            fn from_usize(index: usize) -> Self {
                Self(index.try_into().expect("id type overflow"))
            }
        }

        impl From<usize> for $id_ty {
            fn from(index: usize) -> Self {
                Self::from_usize(index)
            }
        }

        impl From<$id_ty> for usize {
            fn from(id: $id_ty) -> Self {
                id.as_usize()
            }
        }

        impl fmt::Display for $id_ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

impl_int_id!(NodeId, "n");
impl_int_id!(EdgeId, "e");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usize_conversions() {
        let id = EdgeId::from_usize(7);
        assert_eq!(id.as_usize(), 7);
        assert_eq!(usize::from(NodeId::from(3)), 3);
        assert_eq!(id.to_string(), "e7");
    }
}
