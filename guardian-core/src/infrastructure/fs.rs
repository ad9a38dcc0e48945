// guardian-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write content to a file atomically using a temporary file.
///
/// This function:
/// 1. Creates the parent directories when they are missing.
/// 2. Writes the content to a temporary file in the same directory.
/// 3. Persists (renames) the temporary file to the target path.
///
/// The target is either fully written or untouched. On any early return the
/// temporary file is dropped, which removes it from disk.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(InfrastructureError::Io)?;

    // Same directory as the target so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("schema.yml");

        atomic_write(&file_path, "version: 2\n")?;

        assert_eq!(fs::read_to_string(file_path)?, "version: 2\n");
        Ok(())
    }

    #[test]
    fn test_atomic_write_creates_missing_parents() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("models").join("staging").join("schema.yml");

        atomic_write(&file_path, "version: 2\n")?;

        assert!(file_path.exists());
        // No stray temp file left next to the target
        assert_eq!(fs::read_dir(file_path.parent().unwrap())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("schema.yml");

        atomic_write(&file_path, "Initial")?;
        atomic_write(&file_path, "Updated")?;

        assert_eq!(fs::read_to_string(file_path)?, "Updated");
        Ok(())
    }
}
