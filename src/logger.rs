//! Render log — one file per session capturing engine diagnostics.
//!
//! Everything the engine wants to report goes through the `log_info!` /
//! `log_warn!` / `log_err!` macros: LUT rebuild timings, adjustment values
//! that had to be clamped, CLI batch progress and failures. Lines are
//! stamped with the time since `init()` rather than wall-clock time, which
//! is the useful axis when reading a slider-rate render trace.
//!
//! The file lives at `<data dir>/filmgrade/render.log` and is truncated on
//! every launch; set `FILMGRADE_LOG` to redirect it. Until `init()` runs,
//! logging is a no-op, so embedding the library costs nothing.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

struct Sink {
    file: Mutex<File>,
    started: Instant,
}

static SINK: OnceLock<Sink> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Location of the active render log, if `init` succeeded.
pub fn log_path() -> Option<&'static PathBuf> {
    LOG_PATH.get()
}

/// Append one tagged line. I/O failures are swallowed; diagnostics must
/// never take a render down with them.
pub fn write(level: &str, msg: &str) {
    let Some(sink) = SINK.get() else { return };
    let elapsed = sink.started.elapsed().as_secs_f64();
    if let Ok(mut file) = sink.file.lock() {
        let _ = writeln!(file, "{:>9.3}s {:<5} {}", elapsed, level, msg);
    }
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::write("info", &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::write("warn", &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_err {
    ($($arg:tt)*) => {
        $crate::logger::write("error", &format!($($arg)*));
    };
}

/// Open (and truncate) the render log. Call once at startup; repeated
/// calls keep the first sink.
pub fn init() {
    let path = resolve_log_path();
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let file = match File::create(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("filmgrade: cannot open render log {}: {}", path.display(), e);
            return;
        }
    };

    let sink = Sink { file: Mutex::new(file), started: Instant::now() };
    if SINK.set(sink).is_ok() {
        let _ = LOG_PATH.set(path);
        write("info", concat!("filmgrade ", env!("CARGO_PKG_VERSION")));
    }
}

fn resolve_log_path() -> PathBuf {
    if let Some(over) = std::env::var_os("FILMGRADE_LOG") {
        return PathBuf::from(over);
    }
    data_dir().join("filmgrade").join("render.log")
}

/// Per-platform user data directory, with the temp dir as the last resort.
fn data_dir() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);

    if cfg!(target_os = "windows") {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata);
        }
    } else if cfg!(target_os = "macos") {
        if let Some(home) = &home {
            return home.join("Library").join("Application Support");
        }
    } else {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg);
        }
        if let Some(home) = &home {
            return home.join(".local").join("share");
        }
    }

    std::env::temp_dir()
}
