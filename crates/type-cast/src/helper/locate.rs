//! Locates the `keystroke-helperd` binary shipped alongside the host process.

use std::path::PathBuf;

const HELPER_BIN_NAME: &str = "keystroke-helperd";

/// Resolve the helper binary's path relative to the current executable
/// (`§6` packaging: "the engine locates it via a resource path").
///
/// Falls back to the bare binary name (resolved via `PATH` at spawn time) if
/// no file exists next to the current executable, which is the normal case
/// in a cargo-built development tree where binaries land in a shared
/// `target/<profile>/` directory rather than next to the library crate.
#[must_use]
pub fn locate_helper() -> PathBuf {
    let exe_name = if cfg!(windows) {
        format!("{HELPER_BIN_NAME}.exe")
    } else {
        HELPER_BIN_NAME.to_string()
    };

    if let Ok(current_exe) = std::env::current_exe() {
        if let Some(dir) = current_exe.parent() {
            let candidate = dir.join(&exe_name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }

    PathBuf::from(exe_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_bare_name_without_a_sibling_binary() {
        let path = locate_helper();
        assert!(!path.as_os_str().is_empty());
    }
}
