use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the daemon socket location.
pub const SOCKET_ENV: &str = "YOWL_SOCKET_PATH";

/// Resolve the daemon socket from the process environment.
///
/// The daemon resolves its listening path the same way, so both sides agree
/// without any handshake.
pub fn socket_path() -> PathBuf {
    resolve_socket_path(
        std::env::var_os(SOCKET_ENV),
        &std::env::temp_dir(),
        current_uid(),
    )
}

/// Pure resolution: a non-empty override wins, otherwise
/// `<temp_dir>/yowl-<uid>.sock`.
pub fn resolve_socket_path(override_path: Option<OsString>, temp_dir: &Path, uid: u32) -> PathBuf {
    match override_path {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => temp_dir.join(format!("yowl-{uid}.sock")),
    }
}

pub fn current_uid() -> u32 {
    // SAFETY: getuid has no preconditions and cannot fail.
    unsafe { libc::getuid() }
}
