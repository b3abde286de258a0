pub mod fnv;
pub mod separate;

pub use fnv::{FnvBuildHasher, FnvHasher};
pub use separate::{BucketView, ChainedMap, ChainedMapBuilder};
