//! Input/output helpers.
//!
//! - delimited-file ingest + validation (`ingest`)
//! - results table export (`export`)
//! - JSON fit summary read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
