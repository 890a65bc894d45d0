use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Scope-based timing for the cancellation passes.
///
/// Logs the elapsed time when dropped and appends a line to the per-user
/// profile log so long batch runs can be compared after the fact.
pub struct ProfileScope {
    label: String,
    start: Instant,
}

impl ProfileScope {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;

        log::info!("[PROFILE] {} - {:.3}ms", self.label, elapsed_ms);

        if let Err(e) = append_profile_line(&self.label, elapsed_ms) {
            log::warn!("Failed to write profile log: {}", e);
        }
    }
}

/// Location of the persistent profile log
pub fn profile_log_path() -> PathBuf {
    let app_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("anc-rs");

    std::fs::create_dir_all(&app_dir).ok();
    app_dir.join("profile.log")
}

fn append_profile_line(label: &str, duration_ms: f64) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(profile_log_path())?;

    writeln!(
        file,
        "{} {} {:.3}ms",
        chrono::Utc::now().to_rfc3339(),
        label,
        duration_ms
    )
}

/// Macro for easy profiling
#[macro_export]
macro_rules! profile_scope {
    ($label:expr) => {
        let _profile_scope = $crate::profiling::ProfileScope::new($label);
    };
}
