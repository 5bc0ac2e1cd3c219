//! Kotlin parser command-line driver.
//!
//! `ktc lex`, `ktc parse` and `ktc check` read one source file, run the
//! lexer and parser over it and print what came out.
//!
//! # Tracing
//!
//! - `KTC_LOG=kt_parse=debug`: one event per parse (entry point, node and
//!   error counts) and per lazy reparse.
//! - `KTC_LOG=kt_parse=trace`: every token the cursor consumes and every
//!   recovery skip. Very verbose.
//!
//! `RUST_LOG` is read when `KTC_LOG` is not set.

pub mod commands;
mod error;
pub mod options;

use std::sync::Once;

pub use error::CliError;
pub use options::Options;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber. Does nothing unless `KTC_LOG` or
/// `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let Some(directives) = std::env::var("KTC_LOG")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
        else {
            return;
        };

        tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    });
}
