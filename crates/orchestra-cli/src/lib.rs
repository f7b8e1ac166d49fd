//! Command-line front ends for orchestra.
//!
//! Two binaries share this library: `orchestra` routes task titles and slash
//! commands into job files, `wf` imports workflow definition folders into an
//! external automation server. Both can also run as MCP stdio servers.

pub mod cmd;
pub mod output;
pub mod remote;
pub mod root;
pub mod tools;

/// Install the stderr log subscriber. `RUST_LOG` directives are layered on
/// top of `default_level`.
pub fn init_tracing(default_level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
