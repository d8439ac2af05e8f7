use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "shortcut_hud.log";

/// Log file kept next to the settings file.
pub fn default_log_path() -> PathBuf {
    crate::settings::default_settings_dir().join(LOG_FILE_NAME)
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| LOG_FILE_NAME.to_string());
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
}

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// explicitly, in which case `RUST_LOG` may override the level.
///
/// When `file` is given, output goes to that file (its folder is created if
/// needed). If the file cannot be opened, logging falls back to stderr.
pub fn init(debug: bool, file: Option<PathBuf>) {
    // Without debug we force `info` regardless of `RUST_LOG` so a stray
    // variable in the user's environment cannot flood the output.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let (result, open_error) = match file.as_deref().map(|p| (p, file_appender(p))) {
        Some((_, Ok(appender))) => (builder.with_ansi(false).with_writer(appender).try_init(), None),
        Some((path, Err(e))) => (builder.try_init(), Some((path.to_path_buf(), e))),
        None => (builder.try_init(), None),
    };
    if let (Ok(()), Some((path, e))) = (result, open_error) {
        tracing::warn!(path = %path.display(), "cannot open log file, logging to stderr: {e}");
    }
}
