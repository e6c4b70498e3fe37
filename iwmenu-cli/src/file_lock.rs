use fs2::FileExt;
use std::fs::File;
use std::path::PathBuf;

const LOCK_FILE: &str = "iwmenu.lock";

fn lock_path() -> PathBuf {
    let mut path = dirs::runtime_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or(std::env::temp_dir());
    path.push(LOCK_FILE);
    path
}

/// Outcome of trying to become the only running menu.
pub enum AppLock {
    /// Lock held until the file is dropped.
    Acquired(File),
    AlreadyRunning,
}

pub fn acquire_app_lock() -> Result<AppLock, String> {
    let path = lock_path();
    let file = File::create(&path)
        .map_err(|e| format!("Failed to create lock file {}: {e}", path.display()))?;

    // Exclusive lock; fails if another instance holds it
    match file.try_lock_exclusive() {
        Ok(()) => Ok(AppLock::Acquired(file)),
        Err(_) => Ok(AppLock::AlreadyRunning),
    }
}
