pub mod error;
pub mod hashing;

pub use error::{Error, Result};
pub use hashing::{BucketView, ChainedMap, ChainedMapBuilder, FnvBuildHasher};
