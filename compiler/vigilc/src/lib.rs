//! Vigil CLI library: command handlers and logging setup for the `vigil`
//! binary.

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber, once per process.
///
/// Does nothing unless `RUST_LOG` is set; its value is the filter.
/// `VIGIL_LOG_FORMAT=tree` switches from flat lines to an indented span
/// tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let tree = std::env::var("VIGIL_LOG_FORMAT").is_ok_and(|format| format == "tree");
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(tree.then(|| HierarchicalLayer::new(2).with_targets(true)))
                .with((!tree).then(|| {
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr)
                }))
                .with(filter)
                .init();
        }
    });
}
