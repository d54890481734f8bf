//! Whole-graph transformations.

pub mod subgraph;
pub mod transpose;

#[doc(inline)]
pub use subgraph::Subgraph;
#[doc(inline)]
pub use transpose::Transpose;
