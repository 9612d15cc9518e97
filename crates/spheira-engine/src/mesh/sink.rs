use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};

/// Receives exported files and offers them to the user.
///
/// In a browser this is a download; natively it is usually a write to disk.
pub trait FileSink {
    fn offer(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<()>;
}

/// Writes offered files into a directory, replacing existing ones.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn offer(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Keeps offered files in memory.
///
/// Clones share storage, so a host can keep one clone and give another to the
/// handler.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Rc<RefCell<Vec<(String, Vec<u8>)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offered files in arrival order.
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files.borrow().clone()
    }

    /// Removes and returns everything offered so far.
    pub fn take(&self) -> Vec<(String, Vec<u8>)> {
        std::mem::take(&mut *self.files.borrow_mut())
    }
}

impl FileSink for MemorySink {
    fn offer(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        self.files.borrow_mut().push((file_name.to_string(), bytes));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_clones_share_storage() {
        let host = MemorySink::new();
        let mut handed_out = host.clone();
        handed_out.offer("a.stl", vec![1, 2, 3]).unwrap();

        assert_eq!(host.files(), vec![("a.stl".to_string(), vec![1, 2, 3])]);
        assert_eq!(host.take().len(), 1);
        assert!(host.files().is_empty());
    }

    /// Temporary directory removed on drop, pass or fail.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(tag: &str) -> Self {
            Self(std::env::temp_dir().join(format!("spheira-{tag}-{}", std::process::id())))
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn directory_sink_writes_file() {
        let dir = ScratchDir::new("sink");
        let mut sink = DirectorySink::new(dir.0.join("nested"));
        sink.offer("mesh.stl", b"payload".to_vec()).unwrap();

        let written = std::fs::read(dir.0.join("nested").join("mesh.stl")).unwrap();
        assert_eq!(written, b"payload");
    }

    #[test]
    fn scratch_dir_is_removed_on_drop() {
        let path = {
            let dir = ScratchDir::new("scratch");
            DirectorySink::new(&dir.0).offer("a.stl", vec![0]).unwrap();
            assert!(dir.0.exists());
            dir.0.clone()
        };
        assert!(!path.exists());
    }
}
