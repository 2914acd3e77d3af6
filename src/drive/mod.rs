//! File intake: listing, downloading and relocating export files.

mod local;

pub use local::LocalDrive;

use crate::errors::AppResult;
use std::path::Path;

/// A file as listed by a `FileStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
}

/// Remote file-listing/download/move service.
pub trait FileStore {
    /// CSV files directly inside `folder` whose name contains `name_filter`.
    fn list_files(&mut self, folder: &str, name_filter: &str) -> AppResult<Vec<RemoteFile>>;

    /// Id of the child folder `name` of `parent`, created when absent.
    fn ensure_folder(&mut self, parent: &str, name: &str) -> AppResult<String>;

    /// Write the content of `file_id` to `dest`.
    fn download(&mut self, file_id: &str, dest: &Path) -> AppResult<()>;

    /// Replace the parents of `file_id` with `folder_id`.
    fn move_to(&mut self, file_id: &str, folder_id: &str) -> AppResult<()>;

    /// Put a copy of `file_id` in `folder_id`, leaving the original in place.
    fn copy_to(&mut self, file_id: &str, folder_id: &str) -> AppResult<()>;
}
