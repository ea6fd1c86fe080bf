use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "carledger.log";

/// Install the global subscriber: compact stderr output, plus daily-rotated
/// JSON lines when `log_file` is set. `RUST_LOG` overrides `verbose`.
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let file_layer = log_file.map(|path| {
        fmt::layer()
            .with_writer(file_appender(&path))
            .with_ansi(false)
            .json()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(file_layer)
        .init();
}

fn file_appender(path: &Path) -> RollingFileAppender {
    let (dir, name) = split_log_path(path);
    let _ = std::fs::create_dir_all(dir);
    rolling::daily(dir, name)
}

/// Directory and file-name prefix for the rolling appender.
fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(LOG_FILE_NAME));
    (dir, name)
}

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("carledger={},tower_http={}", level, level)
}

/// Default location for the log file when `--log-file` is given without a path.
pub fn default_log_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "carledger")
        .map(|dirs| dirs.data_local_dir().join("logs").join(LOG_FILE_NAME))
}
