//! Library side of the `genometa` binary: command bodies, report types and
//! logging setup.

pub mod commands;
pub mod logging;
pub mod types;

pub use commands::{run_etl, run_validate};
pub use types::{EntitySummary, EtlReport, EtlRequest};
