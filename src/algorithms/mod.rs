pub mod common;
pub mod search;
pub mod sort;

pub use common::{Expansion, Progress, SearchStrategy, SortStrategy};
pub use search::{PathAlgorithm, Search};
pub use sort::{SortAlgorithm, SortSnapshot, Sorter};
