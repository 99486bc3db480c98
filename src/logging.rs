use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

pub fn resolve_desktop_log_path(log_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    match log_dir {
        Some(dir) => dir.join(file_name),
        None => std::env::temp_dir().join("gangio-desktop").join(file_name),
    }
}

pub(crate) fn format_log_line(timestamp: &str, category: &str, message: &str) -> String {
    let message = message.trim_end().replace('\n', " | ");
    format!("[{timestamp}] [{category}] {message}\n")
}

pub fn append_log_line(path: &Path, category: &str, message: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!("Failed to create log directory {}: {}", parent.display(), error)
        })?;
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
    let line = format_log_line(&timestamp, category, message);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    file.write_all(line.as_bytes())
        .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}
