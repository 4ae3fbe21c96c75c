//! `dbc-calc` library crate.
//!
//! The binary (`dbc`) is a thin wrapper around this library so that:
//!
//! - the fitting core is testable without spawning processes
//! - the solver and model code stay reusable outside the CLI
//!
//! The core is [`fit::fit_sigmoid`]: a Levenberg–Marquardt fit of
//! `y = 1/(1 + exp(-k(x - x0)))` that also derives the 10% dynamic binding
//! capacity and a quality score.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
