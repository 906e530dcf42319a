//! Content-addressed file storage inside the media directory.
//!
//! Files are named `<sha256-hex>.<ext>` and never change once written, so a
//! file that already exists under the target name is left alone.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `known.json` → `known.json.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// `<hash>.<extension>`.
pub fn content_filename(hash_hex: &str, extension: &str) -> String {
    format!("{}.{}", hash_hex, extension)
}

/// Write `data` to `dir/filename` unless that file already exists.
/// Returns `true` if a new file was written.
pub fn store_content(dir: &Path, filename: &str, data: &[u8]) -> std::io::Result<bool> {
    let final_path = dir.join(filename);
    if final_path.is_file() {
        return Ok(false);
    }
    let tmp = temp_path(&final_path);
    write_then_rename(&tmp, &final_path, data).inspect_err(|_| {
        let _ = std::fs::remove_file(&tmp);
    })?;
    Ok(true)
}

fn write_then_rename(tmp: &Path, final_path: &Path, data: &[u8]) -> std::io::Result<()> {
    {
        let mut f = File::create(tmp)?;
        f.write_all(data)?;
        f.sync_all()?;
    }
    std::fs::rename(tmp, final_path)
}
