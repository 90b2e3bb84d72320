//! Command line front end for the maternity indicators and REM report.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
