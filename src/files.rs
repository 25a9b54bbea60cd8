//! Release file persistence.
//!
//! Both release files are replaced through a temp file in the same directory
//! followed by a rename, so a failed write leaves the previous content intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::ReleaseVersion;
use crate::error::Result;

/// Replace `path` with `contents` in one rename
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    // Temp files are created 0600; keep the mode of the file being replaced
    match fs::metadata(path) {
        Ok(existing) => file.as_file().set_permissions(existing.permissions())?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Write the agent version file (`<version>\n`)
pub fn write_version_file(path: &Path, version: &ReleaseVersion) -> Result<()> {
    write_atomic(path, &format!("{}\n", version))
}

/// Read the current release notes
///
/// # Returns
/// * `Ok(Some(text))` - The notes file content
/// * `Ok(None)` - The notes file does not exist
/// * `Err` - Any other read failure, including invalid UTF-8
pub fn read_notes(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("releaseNote.md");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("releaseNote.md");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, "new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o664)).unwrap();
        write_atomic(&path, "newer").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
    }

    #[test]
    fn test_write_atomic_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("releaseNote.md");
        assert!(write_atomic(&path, "new").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_version_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agentversion");
        let version = ReleaseVersion::validate("2.150.0").unwrap();

        write_version_file(&path, &version).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2.150.0\n");
    }

    #[test]
    fn test_read_notes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("releaseNote.md");
        assert_eq!(read_notes(&path).unwrap(), None);

        fs::write(&path, "# old\n").unwrap();
        assert_eq!(read_notes(&path).unwrap().as_deref(), Some("# old\n"));
    }

    #[test]
    fn test_read_notes_invalid_utf8_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("releaseNote.md");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(read_notes(&path).is_err());
    }
}
