//! The command line front end of the request generator.
//!
//! This builds on top of [`reqgen_workload`] and turns a configuration
//! (defaults, YAML file, environment) into a set of request files on disk.

pub mod cli;
pub mod config;
pub mod observability;
pub mod report;
