//! UI primitives for the PassLedger CLI.
//!
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Render**: Tables, key-value lines, hints

mod mode;
pub mod render;

pub use mode::OutputMode;
pub use render::{hint, kv, table, Column};
