pub mod centrality;
pub mod report;

pub use centrality::GraphAnalytics;
pub use report::summarize;
