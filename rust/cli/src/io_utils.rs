//! File I/O helpers shared by commands.
//!
//! I/O errors are converted to `String` so commands can wrap them with
//! their own context.

use std::io::Read;
use std::path::Path;

/// Reads a whole text file, or stdin when `path` is `-`. A leading UTF-8
/// BOM is stripped.
///
/// # Example
///
/// ```rust,no_run
/// # use luckydraw_cli::io_utils::read_text;
/// let names = read_text("names.txt").unwrap();
/// ```
pub fn read_text(path: &str) -> Result<String, String> {
    let mut content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
///
/// ```rust,no_run
/// use std::path::Path;
/// # use luckydraw_cli::io_utils::ensure_parent_dir;
/// ensure_parent_dir(Path::new("state/luckydraw-state.json")).unwrap();
/// ```
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}

/// Writes `contents` to a sibling temp file, then renames it over `path`,
/// so readers never see a half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    std::fs::write(&tmp, contents)
        .map_err(|e| format!("Failed to write {}: {}", tmp.display(), e))?;
    std::fs::rename(&tmp, path)
        .map_err(|e| format!("Failed to replace {}: {}", path.display(), e))
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
