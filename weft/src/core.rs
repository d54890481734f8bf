pub mod edge;
pub mod error;
pub mod id;
pub mod marker;
pub mod mode;
pub mod value;

pub use edge::{EdgeDesc, EdgeKind, EdgeRef};
pub use error::{GraphError, InvalidDescription, InvalidTarget};
pub use id::{EdgeId, NodeId};
pub use mode::Mode;
pub use value::{Attrs, Value};
