//! Writes a page to `.VDT` files, one per character ROM.
//!
//! A `.VDT` file is the raw byte stream a terminal would receive; it can be
//! replayed later with [`Minitel::send`](minitel_session::Minitel::send).

use std::path::{Path, PathBuf};

use minitel_core::{VideotexPage, VisualizationModule};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File name used for `name` rendered for `vm`: `<name>_VGP5_.VDT`.
pub fn file_name(name: &str, vm: VisualizationModule) -> String {
    format!("{name}_{}_.VDT", vm.name())
}

/// Renders `page` once per ROM revision and writes the results into `dir`,
/// overwriting existing files.  Returns the written paths in
/// [`VisualizationModule::ALL`] order.
pub fn write_files(
    page: &VideotexPage,
    dir: &Path,
    name: &str,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(VisualizationModule::ALL.len());
    for vm in VisualizationModule::ALL {
        let path = dir.join(file_name(name, vm));
        let bytes = page.render(vm);
        std::fs::write(&path, &bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "exported {vm} page");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "minitel-export-{label}-{}",
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(file_name("menu", VisualizationModule::Vgp2), "menu_VGP2_.VDT");
        assert_eq!(file_name("menu", VisualizationModule::Vgp5), "menu_VGP5_.VDT");
    }

    #[test]
    fn test_write_files_renders_each_rom() {
        // Arrange
        let dir = scratch_dir("roms");
        let mut page = VideotexPage::new();
        page.set_text("§ 1", 3, 2, None).unwrap();

        // Act
        let paths = write_files(&page, &dir, "legal").unwrap();

        // Assert
        assert_eq!(paths.len(), 2);
        let vgp2 = std::fs::read(&paths[0]).unwrap();
        let vgp5 = std::fs::read(&paths[1]).unwrap();
        assert_eq!(vgp2, page.render(VisualizationModule::Vgp2));
        assert_eq!(vgp5, page.render(VisualizationModule::Vgp5));
        assert!(vgp5.windows(2).any(|w| w == [0x19, 0x27]));
        assert!(!vgp2.windows(2).any(|w| w == [0x19, 0x27]));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_files_overwrites() {
        // Arrange: a stale, longer file already present
        let dir = scratch_dir("overwrite");
        let stale = dir.join(file_name("page", VisualizationModule::Vgp5));
        std::fs::write(&stale, vec![0u8; 4096]).unwrap();

        // Act
        write_files(&VideotexPage::new(), &dir, "page").unwrap();

        // Assert
        assert_eq!(
            std::fs::read(&stale).unwrap(),
            VideotexPage::new().render(VisualizationModule::Vgp5)
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unwritable_target_reports_path() {
        // Arrange: a regular file where the directory should be
        let dir = scratch_dir("blocked");
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        // Act
        let result = write_files(&VideotexPage::new(), &blocker, "page");

        // Assert
        match result {
            Err(ExportError::Io { path, .. }) => assert_eq!(path, blocker),
            other => panic!("expected an I/O error, got {other:?}"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
