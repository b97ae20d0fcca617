//! Structured logging to a file
//!
//! The interactive interface owns the terminal, so log events go to a JSON
//! lines file instead of stderr. `RUST_LOG` overrides the default filter.
//!
//! ```bash
//! RUST_LOG=adapter_chat=debug adapter-chat
//! tail -f ~/.adapter-chat/adapter-chat.log
//! ```

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "adapter_chat=info";

pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
