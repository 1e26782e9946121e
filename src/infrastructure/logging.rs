use std::io::{self, IsTerminal};

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

use crate::{config::AppConfig, infrastructure::directories::ResolvedPaths};

const LOG_FILE_PREFIX: &str = "triage.log";
const QUIET_DEPENDENCIES: [&str; 3] = ["hyper=warn", "reqwest=warn", "h2=warn"];

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths) -> Result<()> {
    if FILE_GUARD.get().is_some() {
        return Ok(());
    }

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(
        &paths.logs_dir,
        LOG_FILE_PREFIX,
    ));

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::registry()
        .with(build_filter(rust_log.as_deref(), &config.logging.level))
        .with(
            fmt::layer()
                .with_writer(io::stdout)
                .with_target(true)
                .with_ansi(io::stdout().is_terminal()),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()?;
    let _ = FILE_GUARD.set(guard);

    tracing::info!(
        target: "lifecycle",
        logs = %paths.logs_dir.display(),
        level = %config.logging.level,
        "tracing initialized"
    );
    Ok(())
}

/// `RUST_LOG` wins over `LOG_LEVEL`; an unparseable value falls back to
/// `info`. HTTP client internals are held at `warn` unless named explicitly.
fn build_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    let spec = rust_log.filter(|v| !v.trim().is_empty()).unwrap_or(level);
    let mut filter = EnvFilter::try_new(spec).unwrap_or_else(|_| EnvFilter::new("info"));
    for quiet in QUIET_DEPENDENCIES {
        let target = quiet.split('=').next().unwrap_or_default();
        if spec.contains(target) {
            continue;
        }
        if let Ok(directive) = quiet.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}
