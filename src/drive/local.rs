//! Directory-backed `FileStore`: folder ids and file ids are paths.

use crate::drive::{FileStore, RemoteFile};
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct LocalDrive;

impl LocalDrive {
    pub fn new() -> Self {
        Self
    }

    fn target_in(file_id: &str, folder_id: &str) -> AppResult<PathBuf> {
        let src = Path::new(file_id);
        let name = src
            .file_name()
            .ok_or_else(|| AppError::Transport(format!("not a file: {file_id}")))?;
        Ok(Path::new(folder_id).join(name))
    }
}

impl FileStore for LocalDrive {
    fn list_files(&mut self, folder: &str, name_filter: &str) -> AppResult<Vec<RemoteFile>> {
        let mut out = Vec::new();

        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !name.to_ascii_lowercase().ends_with(".csv") || !name.contains(name_filter) {
                continue;
            }

            out.push(RemoteFile {
                id: entry.path().to_string_lossy().to_string(),
                name,
            });
        }

        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    fn ensure_folder(&mut self, parent: &str, name: &str) -> AppResult<String> {
        let dir = Path::new(parent).join(name);
        fs::create_dir_all(&dir)?;
        Ok(dir.to_string_lossy().to_string())
    }

    fn download(&mut self, file_id: &str, dest: &Path) -> AppResult<()> {
        fs::copy(file_id, dest)?;
        Ok(())
    }

    fn move_to(&mut self, file_id: &str, folder_id: &str) -> AppResult<()> {
        let target = Self::target_in(file_id, folder_id)?;
        fs::rename(file_id, &target)
            .map_err(|e| AppError::Transport(format!("move {file_id} failed: {e}")))
    }

    fn copy_to(&mut self, file_id: &str, folder_id: &str) -> AppResult<()> {
        let target = Self::target_in(file_id, folder_id)?;
        fs::copy(file_id, &target)
            .map(|_| ())
            .map_err(|e| AppError::Transport(format!("copy {file_id} failed: {e}")))
    }
}
