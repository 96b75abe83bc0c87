//! Cross-filesystem fallback:
//! - Copies to a temp file in the destination directory (never clobbers; O_EXCL)
//! - Fsyncs the temp file, then renames it onto the final name
//! - Removes the temp file if anything fails

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use super::atomic::try_atomic_move;
use super::util::unique_temp_path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> temp in `dest`'s directory, then rename temp -> `dest`.
/// Returns the number of bytes copied. The source is left in place.
pub(super) fn copy_and_rename(src: &Path, dest: &Path, overwrite: bool) -> io::Result<u64> {
    let dest_dir = dest.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent")
    })?;
    let tmp = unique_temp_path(dest_dir);

    let result = copy_to_new(src, &tmp).and_then(|bytes| {
        try_atomic_move(&tmp, dest, overwrite)?;
        Ok(bytes)
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn copy_to_new(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut reader = BufReader::with_capacity(BUF_SIZE, File::open(src)?);
    let out = OpenOptions::new().write(true).create_new(true).open(dst)?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, out);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    let out = writer.into_inner().map_err(|e| e.into_error())?;
    out.sync_all()?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_content_and_leaves_no_temp() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.bin");
        fs::write(&src, b"payload").unwrap();
        let dest_dir = td.path().join("out");
        fs::create_dir_all(&dest_dir).unwrap();
        let dest = dest_dir.join("dest.bin");

        let n = copy_and_rename(&src, &dest, false).unwrap();
        assert_eq!(n, 7);
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
        assert!(src.exists(), "copy must not remove the source");
        for entry in fs::read_dir(&dest_dir).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(!name.to_string_lossy().ends_with(".tmp"));
        }
    }

    #[test]
    fn missing_source_cleans_up() {
        let td = tempdir().unwrap();
        let dest = td.path().join("dest.bin");
        assert!(copy_and_rename(&td.path().join("nope"), &dest, false).is_err());
        assert_eq!(fs::read_dir(td.path()).unwrap().count(), 0);
    }
}
