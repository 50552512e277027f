//! Stderr logger for the labeling pipeline.
//!
//! Records from the `ilac*` crates pass at the requested level. Everything
//! else (image decoders, rayon) is held to `warn`. Lines look like
//! `[  0.012s  INFO chessboard::board] board 6x5: ...`, with the `ilac_`
//! prefix dropped from the target so the pipeline stage reads first.
//!
//! With the `tracing` feature, [`init_tracing`] installs a
//! `tracing-subscriber` with the same per-crate defaults instead.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const CRATE_PREFIX: &str = "ilac";
const FOREIGN_LEVEL: LevelFilter = LevelFilter::Warn;

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
#[cfg(feature = "tracing")]
const TRACING_DEFAULTS: &str = "warn,ilac=info,ilac_core=info,ilac_chessboard=info,ilac_marker=info";

fn is_pipeline_target(target: &str) -> bool {
    target == CRATE_PREFIX || target.starts_with("ilac_") || target.starts_with("ilac::")
}

/// `ilac_chessboard::board` becomes `chessboard::board`; foreign targets are
/// kept whole.
fn stage(target: &str) -> &str {
    target
        .strip_prefix("ilac_")
        .or_else(|| target.strip_prefix("ilac::"))
        .unwrap_or(target)
}

struct LabelLogger {
    pipeline: LevelFilter,
    started: Instant,
}

impl LabelLogger {
    fn threshold(&self, target: &str) -> LevelFilter {
        if is_pipeline_target(target) {
            self.pipeline
        } else {
            FOREIGN_LEVEL.min(self.pipeline)
        }
    }

    fn line(&self, secs: f64, level: Level, target: &str, args: &std::fmt::Arguments<'_>) -> String {
        format!("[{secs:8.3}s {level:>5} {}] {args}", stage(target))
    }
}

impl Log for LabelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.threshold(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<LabelLogger> = OnceLock::new();

/// Install the labeling logger; `level` applies to the `ilac*` crates.
///
/// Only the first call installs anything. Later calls return `Ok(())` and
/// keep the original level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| LabelLogger {
        pipeline: level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` subscriber. `RUST_LOG` overrides the per-crate
/// defaults. `json` switches to flattened JSON events for log shipping.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(TRACING_DEFAULTS));
    let base = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);
    let _ = if json {
        base.json()
            .flatten_event(true)
            .with_current_span(true)
            .finish()
            .try_init()
    } else {
        base.with_timer(fmt::time::Uptime::default())
            .compact()
            .finish()
            .try_init()
    };
}
