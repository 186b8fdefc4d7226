//! File and stdin helpers shared by the commands.
//!
//! Round histories may be plain JSONL or Zstandard-compressed (`.zst`);
//! [`read_text_auto`] picks the right reader from the extension.

use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Reads one line and trims it. `None` on EOF or a read error.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// # use bjtrainer_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new(&b" +3 \nquit\n"[..]);
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("+3"));
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("quit"));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Upper bound for a decompressed history file.
const MAX_DECOMPRESSED: usize = 64 * 1024 * 1024;

/// Reads a text file, decompressing it first when the name ends in `.zst`.
/// A leading UTF-8 BOM is dropped.
pub fn read_text_auto(path: &Path) -> Result<String, String> {
    let is_zst = path.extension().is_some_and(|e| e == "zst");
    let mut content = if is_zst {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, MAX_DECOMPRESSED).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    if content.starts_with('\u{feff}') {
        content.drain(..'\u{feff}'.len_utf8());
    }
    Ok(content)
}

/// Every `*.jsonl` / `*.jsonl.zst` file under `dir`, recursively, sorted by path.
pub fn collect_history_files(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(d) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&d) else {
            continue;
        };
        for p in entries.filter_map(Result::ok).map(|e| e.path()) {
            if p.is_dir() {
                stack.push(p);
            } else if p
                .file_name()
                .and_then(|f| f.to_str())
                .is_some_and(|f| f.ends_with(".jsonl") || f.ends_with(".jsonl.zst"))
            {
                found.push(p);
            }
        }
    }
    found.sort();
    found
}
