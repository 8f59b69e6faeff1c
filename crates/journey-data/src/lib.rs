pub mod error;
pub mod model;

pub use error::DataError;
pub use model::*;
