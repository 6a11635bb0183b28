//! Opening the rendered page with the platform's default handler.

use std::path::{Path, PathBuf};
use std::process::Command;

/// An opener program and the arguments that precede the target path.
#[derive(Debug, Clone, PartialEq)]
pub struct Opener {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Opener candidates for the current platform, in lookup order.
fn candidates() -> Vec<(&'static str, Vec<String>)> {
    if cfg!(target_os = "macos") {
        vec![("open", vec![])]
    } else if cfg!(target_os = "windows") {
        vec![("cmd", vec!["/C".to_string(), "start".to_string(), String::new()])]
    } else {
        vec![("xdg-open", vec![]), ("gio", vec!["open".to_string()])]
    }
}

/// Find the first opener available in PATH.
pub fn find_opener() -> Option<Opener> {
    candidates().into_iter().find_map(|(name, args)| {
        which::which(name).ok().map(|program| Opener { program, args })
    })
}

/// Launch `path` in the default browser. Failures are logged, never fatal.
pub fn open_in_browser(path: &Path) {
    let Some(opener) = find_opener() else {
        log::warn!("No browser opener found; open {} manually", path.display());
        return;
    };

    log::debug!("Opening {} with {}", path.display(), opener.program.display());
    match Command::new(&opener.program).args(&opener.args).arg(path).spawn() {
        Ok(_) => {}
        Err(e) => log::warn!("Failed to open {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_not_empty() {
        assert!(!candidates().is_empty());
    }

    #[test]
    fn test_found_opener_exists_on_disk() {
        if let Some(opener) = find_opener() {
            assert!(opener.program.exists());
        }
    }
}
