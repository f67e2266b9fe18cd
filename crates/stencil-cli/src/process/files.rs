use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;

use camino::Utf8Path;
use tempfile::Builder;

pub(super) const PID_FILE_MODE: u32 = 0o644;

/// Writes `contents` to `path` through a temporary file in the same directory.
///
/// Missing parent directories are created. Data is fsync'd before the rename
/// so readers never observe a partial pid.
pub(super) fn atomic_write(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let directory = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "target path did not have a parent directory",
        )
    })?;
    fs::create_dir_all(directory)?;

    let mut builder = Builder::new();
    builder.prefix(path.file_name().unwrap_or("stencil"));

    let mut file = builder.tempfile_in(directory)?;
    file.write_all(contents)?;
    // fchmod is not subject to the umask.
    file.as_file()
        .set_permissions(Permissions::from_mode(PID_FILE_MODE))?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|error| error.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::*;

    fn root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path")
    }

    #[test]
    fn creates_parent_directories_and_replaces_content() {
        let dir = TempDir::new().expect("temp dir");
        let path = root(&dir).join("nested/run/stencil.pid");

        atomic_write(&path, b"41\n").expect("first write");
        atomic_write(&path, b"42\n").expect("second write");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "42\n");
    }

    #[test]
    fn pid_file_is_world_readable() {
        let dir = TempDir::new().expect("temp dir");
        let path = root(&dir).join("stencil.pid");

        atomic_write(&path, b"7\n").expect("write");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, PID_FILE_MODE);
    }
}
