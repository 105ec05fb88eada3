//! The `reqgen` binary: generates synthetic request files for the
//! pattern-matching benchmark from a declarative workload configuration.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use anyhow::Result;

fn main() -> Result<()> {
    reqgen_cli::cli::execute()
}
