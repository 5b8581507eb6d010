/// Resume file storage
///
/// Stores uploaded resume files on disk under a generated name. Uploads are
/// validated against a size limit (5 MB) and an extension allow-list
/// (.pdf / .doc / .docx / .txt) before anything touches the disk.
///
/// # Example
///
/// ```no_run
/// use jobwala_shared::resume::storage::ResumeStore;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = ResumeStore::new("./uploads/resumes");
/// store.ensure_dir()?;
///
/// let stored = store.save("cv.pdf", b"%PDF-1.4 ...")?;
/// println!("Stored at {}", stored.path.display());
/// # Ok(())
/// # }
/// ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

/// Maximum accepted upload size: 5 MB
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Accepted file extensions (lowercase, without the dot)
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// Error type for resume storage operations
#[derive(Debug, thiserror::Error)]
pub enum ResumeStorageError {
    /// Upload exceeds the size limit
    #[error("File is {size} bytes, maximum allowed is {max}")]
    TooLarge {
        /// Size of the rejected upload
        size: usize,
        /// Limit it was checked against
        max: usize,
    },

    /// Extension is not on the allow-list
    #[error("File type .{0} is not allowed (allowed: pdf, doc, docx, txt)")]
    UnsupportedExtension(String),

    /// Filename carries no extension at all
    #[error("Filename has no extension")]
    MissingExtension,

    /// Filesystem error
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Metadata for a stored resume file
#[derive(Debug, Clone)]
pub struct StoredResume {
    /// Generated filename under the store directory
    pub stored_name: String,

    /// Full path of the stored file
    pub path: PathBuf,

    /// Stored size in bytes
    pub size: usize,
}

/// On-disk resume store rooted at a single directory
#[derive(Debug, Clone)]
pub struct ResumeStore {
    dir: PathBuf,
}

impl ResumeStore {
    /// Creates a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the store directory if it doesn't exist
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Validates and stores an upload under a generated name
    ///
    /// The original filename is only consulted for its extension; the stored
    /// name is a fresh UUID so uploads can never collide or traverse paths.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exceeds [`MAX_RESUME_BYTES`]
    /// - The extension is missing or not allowed
    /// - Writing to disk fails
    pub fn save(
        &self,
        original_filename: &str,
        data: &[u8],
    ) -> Result<StoredResume, ResumeStorageError> {
        if data.len() > MAX_RESUME_BYTES {
            return Err(ResumeStorageError::TooLarge {
                size: data.len(),
                max: MAX_RESUME_BYTES,
            });
        }

        let extension = extension_of(original_filename)
            .ok_or(ResumeStorageError::MissingExtension)?;

        if !is_allowed_extension(&extension) {
            return Err(ResumeStorageError::UnsupportedExtension(extension));
        }

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.dir.join(&stored_name);

        fs::write(&path, data)?;

        info!(
            original = original_filename,
            stored = %path.display(),
            size = data.len(),
            "Stored resume upload"
        );

        Ok(StoredResume {
            stored_name,
            path,
            size: data.len(),
        })
    }
}

/// Lowercased extension of a filename, if any
fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Whether an extension (lowercase, without the dot) is on the allow-list
pub fn is_allowed_extension(extension: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_allowed_extension() {
        assert!(is_allowed_extension("pdf"));
        assert!(is_allowed_extension("doc"));
        assert!(is_allowed_extension("docx"));
        assert!(is_allowed_extension("txt"));
        assert!(!is_allowed_extension("exe"));
        assert!(!is_allowed_extension("js"));
        assert!(!is_allowed_extension(""));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("cv.pdf"), Some("pdf".to_string()));
        assert_eq!(extension_of("CV.PDF"), Some("pdf".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension_of("no_extension"), None);
    }

    #[test]
    fn test_save_and_read_back() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(tmp.path());

        let stored = store.save("resume.txt", b"plain text resume").unwrap();

        assert!(stored.stored_name.ends_with(".txt"));
        assert_eq!(stored.size, 17);

        let contents = fs::read(&stored.path).unwrap();
        assert_eq!(contents, b"plain text resume");
    }

    #[test]
    fn test_save_generates_unique_names() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(tmp.path());

        let a = store.save("cv.pdf", b"a").unwrap();
        let b = store.save("cv.pdf", b"b").unwrap();

        assert_ne!(a.stored_name, b.stored_name);
    }

    #[test]
    fn test_save_rejects_oversized() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(tmp.path());

        let big = vec![0u8; MAX_RESUME_BYTES + 1];
        let result = store.save("cv.pdf", &big);

        assert!(matches!(
            result,
            Err(ResumeStorageError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_save_rejects_disallowed_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(tmp.path());

        let result = store.save("malware.exe", b"nope");
        assert!(matches!(
            result,
            Err(ResumeStorageError::UnsupportedExtension(ref ext)) if ext == "exe"
        ));

        let result = store.save("noext", b"nope");
        assert!(matches!(result, Err(ResumeStorageError::MissingExtension)));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(tmp.path().join("a/b/c"));

        store.ensure_dir().unwrap();
        assert!(store.dir().is_dir());
    }
}
