pub mod aggregate;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod page;
pub mod pipeline;
pub mod report;
pub mod score;
pub mod source;
pub mod store;
pub mod xlsx;

pub use error::{DraftError, Result};
pub use model::*;
