use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=cimpl_codegen=trace`.
/// With `CIMPL_LOG_TREE` set, spans are drawn as an indented tree instead of
/// flat lines. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let tree = std::env::var_os("CIMPL_LOG_TREE").is_some();

        let tree_layer = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });
        let flat_layer = (!tree).then(|| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
        });

        tracing_subscriber::registry()
            .with(tree_layer)
            .with(flat_layer)
            .with(filter)
            .init();
    });
}
