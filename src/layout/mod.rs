/// Dataset layer: BIDS file-name parsing, tree indexing and read-only queries.
pub mod entities;
pub mod errors;
pub mod index;
pub mod query;

pub use entities::RunId;
pub use errors::LayoutError;
pub use index::{BidsLayout, LayoutConfig};
pub use query::{DatasetQuery, QueryFilter};
