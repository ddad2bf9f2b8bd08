//! Preview copies for the host UI, which can only show files under its own
//! output directory.

use crate::common::file_utils::has_preview_image_extension;
use crate::errors::{HousekeepingError, SaveError};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const NOTICE_FILE_NAME: &str = "README.txt";

const NOTICE_TEXT: &str = "[OwlV Temporary Preview Files]

这是 Save Image (Dir) 🦉| OwlV 节点的临时预览文件夹。

说明：
- 当启用自定义路径保存时，为了在节点面板显示预览，会在此文件夹保存临时副本
- 原始文件已保存到您指定的自定义路径中
- 此文件夹的文件会在每次运行时自动清理
- 最后一次运行的图像会保留在此文件夹中

管理建议：
- 可以不管它，隔段时间统一清理
- 也可以手动删除此文件夹（不影响自定义路径中的原始文件）
- 删除后节点会在下次运行时自动重新创建

--------------------
This is the temporary preview folder for Save Image (Dir) 🦉| OwlV node.

Note:
- When custom path is enabled, temporary copies are saved here for panel preview
- Original files are saved to your specified custom path
- Files in this folder are automatically cleaned on each run
- The last run's images will remain in this folder

Management Tips:
- You can ignore it and clean up periodically
- You can manually delete this folder (won't affect original files)
- The folder will be automatically recreated on next run
";

#[derive(Debug)]
pub struct PreviewMirror {
    folder: PathBuf,
    subfolder: String,
}

#[derive(Debug, Default)]
pub struct PrepareReport {
    pub removed: usize,
    pub failures: Vec<HousekeepingError>,
}

impl PreviewMirror {
    /// Creates `<output_dir>/<folder_name>`, purges stale images and rewrites
    /// the notice. Only folder creation can fail; the rest is reported.
    pub fn prepare(output_dir: &Path, folder_name: &str) -> std::io::Result<(Self, PrepareReport)> {
        let folder = output_dir.join(folder_name);
        fs::create_dir_all(&folder)?;

        let mut report = PrepareReport::default();
        purge_stale_images(&folder, &mut report);

        let notice_path = folder.join(NOTICE_FILE_NAME);
        if let Err(source) = fs::write(&notice_path, NOTICE_TEXT) {
            report.failures.push(HousekeepingError::WriteNotice {
                path: notice_path,
                source,
            });
        }

        for failure in &report.failures {
            warn!("⚠️ Preview folder housekeeping: {}", failure);
        }
        debug!("Preview folder '{}' ready, {} stale file(s) removed.", folder.display(), report.removed);

        let mirror = PreviewMirror {
            folder,
            subfolder: folder_name.to_string(),
        };
        Ok((mirror, report))
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Subfolder name reported to the host alongside each filename.
    pub fn subfolder(&self) -> &str {
        &self.subfolder
    }

    pub fn mirror(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
        let path = self.folder.join(filename);
        fs::write(&path, bytes).map_err(|source| SaveError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn purge_stale_images(folder: &Path, report: &mut PrepareReport) {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(source) => {
            report.failures.push(HousekeepingError::ListFolder {
                path: folder.to_path_buf(),
                source,
            });
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || !has_preview_image_extension(&path) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => report.removed += 1,
            Err(source) => report.failures.push(HousekeepingError::RemoveFile { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn prepare_creates_folder_and_notice() {
        let dir = tempdir().unwrap();
        let (mirror, report) = PreviewMirror::prepare(dir.path(), "preview").unwrap();
        assert!(mirror.folder().is_dir());
        assert_eq!(mirror.subfolder(), "preview");
        assert!(mirror.folder().join(NOTICE_FILE_NAME).is_file());
        assert_eq!(report.removed, 0);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn prepare_purges_only_image_files() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("preview");
        fs::create_dir_all(&folder).unwrap();
        for name in ["a.png", "b.JPG", "c.jpeg", "d.webp", "keep.txt", "keep.gif"] {
            fs::write(folder.join(name), b"x").unwrap();
        }
        fs::write(folder.join(NOTICE_FILE_NAME), b"old").unwrap();

        let (_, report) = PreviewMirror::prepare(dir.path(), "preview").unwrap();

        assert_eq!(report.removed, 4);
        assert!(folder.join("keep.txt").exists());
        assert!(folder.join("keep.gif").exists());
        assert!(!folder.join("a.png").exists());
        let notice = fs::read_to_string(folder.join(NOTICE_FILE_NAME)).unwrap();
        assert!(notice.starts_with("[OwlV Temporary Preview Files]"));
    }

    #[test]
    fn mirror_writes_identical_bytes() {
        let dir = tempdir().unwrap();
        let (mirror, _) = PreviewMirror::prepare(dir.path(), "preview").unwrap();
        let path = mirror.mirror("x_00001_.png", b"payload").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"payload");
    }

    #[test]
    fn failed_mirror_write_is_a_save_error() {
        let dir = tempdir().unwrap();
        let (mirror, _) = PreviewMirror::prepare(dir.path(), "preview").unwrap();
        fs::remove_dir_all(mirror.folder()).unwrap();

        let result = mirror.mirror("x_00001_.png", b"payload");

        assert!(matches!(result, Err(SaveError::Write { .. })));
    }

    #[test]
    fn prepare_fails_when_folder_name_is_taken_by_a_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("preview"), b"file").unwrap();
        assert!(PreviewMirror::prepare(dir.path(), "preview").is_err());
    }
}
