use super::{
    error::{InvalidDescription, InvalidDescriptionKind},
    id::EdgeId,
    value::{Attrs, Value},
};

/// Distinguishes directed edges from the two instances of an undirected edge.
///
/// An undirected edge between `u` and `v` is stored as a forward instance
/// `u -> v` and a mirror instance `v -> u`, each pointing to the other.
/// Exactly one of the pair is canonical; enumeration of all edges yields only
/// canonical instances, whereas adjacency lookups see both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Directed,
    Undirected { mirror: EdgeId, canonical: bool },
}

impl EdgeKind {
    pub fn is_directed(&self) -> bool {
        matches!(self, EdgeKind::Directed)
    }

    pub fn mirror(&self) -> Option<EdgeId> {
        match self {
            EdgeKind::Directed => None,
            EdgeKind::Undirected { mirror, .. } => Some(*mirror),
        }
    }

    /// Directed edges are always canonical.
    pub fn is_canonical(&self) -> bool {
        match self {
            EdgeKind::Directed => true,
            EdgeKind::Undirected { canonical, .. } => *canonical,
        }
    }
}

/// A resolved edge instance as seen by readers of the graph.
#[derive(Debug, PartialEq)]
pub struct EdgeRef<'a, N> {
    pub id: EdgeId,
    pub src: &'a N,
    pub dst: &'a N,
    pub kind: EdgeKind,
    pub attrs: &'a Attrs,
}

impl<N> Clone for EdgeRef<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for EdgeRef<'_, N> {}

impl<'a, N> EdgeRef<'a, N> {
    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    /// Weight of the edge, `1` when the `weight` attribute is not set.
    pub fn weight(&self) -> Value {
        self.attrs.weight().cloned().unwrap_or(Value::Int(1))
    }
}

/// Caller-supplied description of an edge.
///
/// Every edge-targeting operation accepts anything convertible into a
/// description:
///
/// * an [`EdgeId`],
/// * a `(src, dst)` pair,
/// * a `(src, dst, weight)` triple where the weight is numeric,
/// * a `(src, dst, attrs)` triple with an attribute bag.
///
/// Lookups resolve a description to the first matching edge instance. A
/// weight triple matches an edge with exactly that weight, an attribute
/// triple matches an edge whose bag is a superset of the given one.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeDesc<N> {
    Id(EdgeId),
    Pair(N, N),
    Weighted(N, N, Value),
    Attributed(N, N, Attrs),
}

impl<N> EdgeDesc<N> {
    pub fn endpoints(&self) -> Option<(&N, &N)> {
        match self {
            EdgeDesc::Id(_) => None,
            EdgeDesc::Pair(src, dst)
            | EdgeDesc::Weighted(src, dst, _)
            | EdgeDesc::Attributed(src, dst, _) => Some((src, dst)),
        }
    }

    /// Attributes an edge must carry to match this description.
    ///
    /// A weight is coerced to `{weight: <value>}`.
    pub(crate) fn pattern(&self) -> Result<Option<Attrs>, InvalidDescription> {
        match self {
            EdgeDesc::Id(_) | EdgeDesc::Pair(..) => Ok(None),
            EdgeDesc::Weighted(_, _, weight) => {
                check_weight(weight)?;
                Ok(Some(Attrs::weighted(weight.clone())))
            }
            EdgeDesc::Attributed(_, _, attrs) => Ok(Some(attrs.clone())),
        }
    }

    /// Splits the description into the parts needed to insert an edge.
    pub(crate) fn into_parts(self) -> Result<(N, N, Option<Attrs>), InvalidDescription> {
        match self {
            EdgeDesc::Id(_) => Err(InvalidDescription::new(
                InvalidDescriptionKind::EdgeIdNotInsertable,
            )),
            EdgeDesc::Pair(src, dst) => Ok((src, dst, None)),
            EdgeDesc::Weighted(src, dst, weight) => {
                check_weight(&weight)?;
                Ok((src, dst, Some(Attrs::weighted(weight))))
            }
            EdgeDesc::Attributed(src, dst, attrs) => Ok((src, dst, Some(attrs))),
        }
    }
}

fn check_weight(weight: &Value) -> Result<(), InvalidDescription> {
    if weight.is_numeric() {
        Ok(())
    } else {
        Err(InvalidDescription::new(
            InvalidDescriptionKind::NonNumericWeight,
        ))
    }
}

impl<N> From<EdgeId> for EdgeDesc<N> {
    fn from(id: EdgeId) -> Self {
        EdgeDesc::Id(id)
    }
}

impl<N> From<(N, N)> for EdgeDesc<N> {
    fn from((src, dst): (N, N)) -> Self {
        EdgeDesc::Pair(src, dst)
    }
}

impl<N> From<(N, N, Attrs)> for EdgeDesc<N> {
    fn from((src, dst, attrs): (N, N, Attrs)) -> Self {
        EdgeDesc::Attributed(src, dst, attrs)
    }
}

macro_rules! impl_weighted_desc {
    ($($ty:ty),*) => {
        $(
            impl<N> From<(N, N, $ty)> for EdgeDesc<N> {
                fn from((src, dst, weight): (N, N, $ty)) -> Self {
                    EdgeDesc::Weighted(src, dst, weight.into())
                }
            }
        )*
    };
}

impl_weighted_desc!(Value, i64, i32, u32, u8, f64, f32);

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn weight_is_coerced_to_bag() {
        let desc = EdgeDesc::from(("a", "b", 3));
        assert_eq!(
            desc.into_parts(),
            Ok(("a", "b", Some(Attrs::from([("weight", 3)]))))
        );
    }

    #[test]
    fn invalid_descriptions() {
        assert_matches!(
            EdgeDesc::<&str>::from(EdgeId::from(0)).into_parts(),
            Err(InvalidDescription {
                kind: InvalidDescriptionKind::EdgeIdNotInsertable
            })
        );

        assert_matches!(
            EdgeDesc::from(("a", "b", Value::from("heavy"))).pattern(),
            Err(InvalidDescription {
                kind: InvalidDescriptionKind::NonNumericWeight
            })
        );

        assert_matches!(
            EdgeDesc::from(("a", "b", Value::from(true))).into_parts(),
            Err(InvalidDescription {
                kind: InvalidDescriptionKind::NonNumericWeight
            })
        );
    }

    #[test]
    fn non_finite_weights_are_numeric() {
        assert_eq!(
            EdgeDesc::from(("a", "b", f64::INFINITY)).pattern(),
            Ok(Some(Attrs::weighted(f64::INFINITY)))
        );
        assert!(EdgeDesc::from(("a", "b", f64::NAN)).into_parts().is_ok());
    }
}
