//! Filesystem-backed object bucket for showroom logos.
//!
//! Objects are flat files under `{storage_root}/showroom-logos/`. The router
//! serves that directory read-only at `/storage/showroom-logos/`, so the
//! public URL of an object is `{public_base_url}/storage/showroom-logos/{name}`.

use std::io;
use std::path::{Path, PathBuf};

use repairdesk_core::storage::{
    flattened_name, is_safe_object_name, key_from_public_url, object_from_public_url, public_url,
    LOGO_BUCKET,
};
use repairdesk_db::repositories::ShowroomRepo;
use repairdesk_db::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid object name '{0}'")]
    InvalidName(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A nested object moved to a flat name by [`LogoStore::flatten`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedObject {
    pub from: String,
    pub to: String,
}

/// Logo bucket rooted on the local filesystem.
#[derive(Debug, Clone)]
pub struct LogoStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LogoStore {
    pub fn new(storage_root: &Path, public_base_url: &str) -> Self {
        Self {
            dir: storage_root.join(LOGO_BUCKET),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Directory holding the bucket's objects.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn public_url(&self, object: &str) -> String {
        public_url(&self.public_base_url, LOGO_BUCKET, object)
    }

    /// Object name referenced by a stored `logo_url`, if it points into this bucket.
    pub fn object_for_url(&self, url: &str) -> Option<String> {
        object_from_public_url(url, LOGO_BUCKET)
    }

    /// Write an object (overwriting) and return its public URL.
    pub async fn put(&self, object: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let path = self.object_path(object)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, bytes).await?;
        Ok(self.public_url(object))
    }

    /// Delete an object. A missing object is not an error.
    pub async fn remove(&self, object: &str) -> Result<(), StorageError> {
        let path = self.object_path(object)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Every file in the bucket as a `/`-separated path relative to the bucket,
    /// sorted. Nested files are included.
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        if !tokio::fs::try_exists(&self.dir).await? {
            return Ok(Vec::new());
        }
        let mut names = list_files(&self.dir).await?;
        names.sort();
        Ok(names)
    }

    /// Move nested objects (`a/b/c.png`) to the flat name of their first path
    /// segment (`a`).
    ///
    /// When several files share a first segment the first in sort order wins
    /// and the directory is removed with the rest.
    pub async fn flatten(&self) -> Result<Vec<FlattenedObject>, StorageError> {
        let mut moved: Vec<FlattenedObject> = Vec::new();
        for name in self.list().await? {
            let Some(target) = flattened_name(&name) else {
                continue;
            };
            if moved.iter().any(|m| m.to == target) {
                continue;
            }
            let target = target.to_string();
            let dest = self.object_path(&target)?;
            // The directory and the object share a name, so stage the bytes
            // beside it and only swap once the copy is on disk.
            let staged = self.dir.join(format!(".{target}.flatten"));
            tokio::fs::copy(self.dir.join(&name), &staged).await?;
            tokio::fs::remove_dir_all(&dest).await?;
            tokio::fs::rename(&staged, &dest).await?;
            tracing::debug!(from = %name, to = %target, "Flattened logo object");
            moved.push(FlattenedObject { from: name, to: target });
        }
        Ok(moved)
    }

    /// Copy every file below `source` into the bucket, overwriting existing
    /// objects. Nested paths are kept. Returns the object names written.
    pub async fn import_dir(&self, source: &Path) -> Result<Vec<String>, StorageError> {
        let mut imported = Vec::new();
        for relative in list_files(source).await? {
            let dest = self.dir.join(&relative);
            if let Some(parent) = dest.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::copy(source.join(&relative), &dest).await?;
            imported.push(relative);
        }
        imported.sort();
        Ok(imported)
    }

    /// Point every showroom whose `logo_url` names a moved object, in either
    /// URL shape, at the object's new public URL. Returns the rows changed.
    pub async fn relink_showrooms(
        &self,
        pool: &DbPool,
        moved: &[FlattenedObject],
    ) -> Result<u64, sqlx::Error> {
        let mut changed = 0;
        for (id, url) in ShowroomRepo::list_logo_urls(pool).await? {
            let Some(key) = key_from_public_url(&url, LOGO_BUCKET) else {
                continue;
            };
            let Some(object) = moved.iter().find(|m| m.from == key) else {
                continue;
            };
            let new_url = self.public_url(&object.to);
            ShowroomRepo::set_logo_url(pool, id, Some(new_url.as_str())).await?;
            tracing::debug!(showroom_id = %id, from = %url, to = %new_url, "Relinked showroom logo");
            changed += 1;
        }
        Ok(changed)
    }

    fn object_path(&self, object: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_object_name(object) {
            return Err(StorageError::InvalidName(object.to_string()));
        }
        Ok(self.dir.join(object))
    }
}

/// Recursively list files under `root` as `/`-separated relative paths.
async fn list_files(root: &Path) -> io::Result<Vec<String>> {
    let mut files = Vec::new();
    let mut pending = vec![PathBuf::new()];
    while let Some(relative) = pending.pop() {
        let mut entries = tokio::fs::read_dir(root.join(&relative)).await?;
        while let Some(entry) = entries.next_entry().await? {
            let child = relative.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                pending.push(child);
            } else {
                let parts: Vec<String> = child
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                files.push(parts.join("/"));
            }
        }
    }
    Ok(files)
}
