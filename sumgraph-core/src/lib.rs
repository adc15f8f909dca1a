//! sumgraph core library — summary parser, graph builder, store, and analytics.
//!
//! The write path is [`build::GraphBuilder`], which feeds summaries through
//! the [`parse`] state machine into a [`store::GraphStore`]. Read-side
//! queries live in [`analyze::GraphAnalytics`] and [`export`].

pub mod analyze;
pub mod build;
pub mod config;
pub mod error;
pub mod export;
pub mod parse;
pub mod store;
pub mod types;
