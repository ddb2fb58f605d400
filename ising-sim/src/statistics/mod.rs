mod stats;

pub use stats::Statistics;
