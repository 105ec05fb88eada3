//! Synthetic request workloads for the pattern-matching benchmark.
//!
//! A [`Workload`] describes one request file: how many lines it holds, how
//! many categories each request carries, and how the regex patterns are
//! constructed. Patterns are either random alphanumeric strings of a fixed
//! length, or short cyclically-repeating two-character strings that shift
//! the load from per-request compute to request volume.
//!
//! In both modes, a quarter of all lines are verbatim duplicates of
//! previously emitted lines, mimicking the repeated requests a caching
//! server would see.
//!
//! All randomness flows through a single seedable RNG per workload, so
//! identical parameters and seed produce byte-identical request files.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod batch;
pub mod workload;

pub use crate::batch::Batch;
pub use crate::workload::{PatternKind, Workload, WorkloadBuilder, WorkloadError};
