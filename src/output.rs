//! File naming and saving downloaded images.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::ImageError;
use crate::ports::{FetchRequest, ImageFetcher};
use crate::validate::{validate_extension, validate_writable_directory};

/// Process-wide sequence shared by every generator.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generates collision-resistant filenames.
///
/// A name is the hex concatenation of the host seed, a nanosecond
/// timestamp, a process-wide sequence number and 64 fresh random bits.
/// The sequence keeps names unique within a process; the seed, clock and
/// random bits keep names from different hosts apart.
#[derive(Debug, Clone)]
pub struct FilenameGenerator {
    host_seed: u64,
}

impl Default for FilenameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FilenameGenerator {
    /// Generator with a random host seed.
    #[must_use]
    pub fn new() -> Self {
        Self { host_seed: rand::random() }
    }

    /// Generator with an explicit host seed (e.g. derived from a host id).
    #[must_use]
    pub fn with_host_seed(host_seed: u64) -> Self {
        Self { host_seed }
    }

    /// The seed mixed into every name.
    #[must_use]
    pub fn host_seed(&self) -> u64 {
        self.host_seed
    }

    /// Produce a fresh `{token}.{extension}` filename.
    #[must_use]
    pub fn generate(&self, extension: &str) -> String {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let noise: u64 = rand::random();
        format!("{:016x}{nanos:016x}{seq:08x}{noise:016x}.{extension}", self.host_seed)
    }
}

/// Downloads an image URL and writes it under a generated filename.
pub struct Persister {
    fetcher: Arc<dyn ImageFetcher>,
    names: FilenameGenerator,
    extensions: &'static [&'static str],
}

impl Persister {
    /// Persister that accepts the given extensions.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcher>, extensions: &'static [&'static str]) -> Self {
        Self { fetcher, names: FilenameGenerator::new(), extensions }
    }

    /// Replace the filename generator.
    #[must_use]
    pub fn with_names(mut self, names: FilenameGenerator) -> Self {
        self.names = names;
        self
    }

    /// Download `url` into `dir` (the system temp dir when `None`) and return
    /// the full path, or only the filename when `full_path` is false.
    ///
    /// The directory and extension are checked before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidArgument`] for an unwritable directory or
    /// unsupported extension, [`ImageError::Remote`] / [`ImageError::Network`]
    /// when the download fails, and [`ImageError::Io`] when the write fails.
    pub fn save(
        &self,
        url: &str,
        dir: Option<&Path>,
        extension: &str,
        full_path: bool,
    ) -> Result<PathBuf, ImageError> {
        let dir = dir.map_or_else(std::env::temp_dir, Path::to_path_buf);
        validate_writable_directory(&dir)?;
        if extension.is_empty() {
            return Err(ImageError::InvalidArgument("Missing image extension".to_string()));
        }
        validate_extension(extension, self.extensions)?;

        let image = self.fetcher.fetch(&FetchRequest { url: url.to_string() })?;
        debug!(%url, bytes = image.data.len(), content_type = ?image.content_type, "downloaded image");

        let filename = self.names.generate(extension);
        let path = dir.join(&filename);
        std::fs::write(&path, &image.data)
            .map_err(|source| ImageError::Io { path: path.clone(), source })?;
        info!(path = %path.display(), "saved placeholder image");

        Ok(if full_path { path } else { PathBuf::from(filename) })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::error::ErrorKind;
    use crate::ports::FetchedImage;
    use crate::providers::EXTENSIONS;

    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
        status: Option<u16>,
    }

    impl ImageFetcher for CountingFetcher {
        fn fetch(&self, request: &FetchRequest) -> Result<FetchedImage, ImageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(status) => Err(ImageError::Remote {
                    url: request.url.clone(),
                    status,
                    message: "Internal Server Error".into(),
                }),
                None => Ok(FetchedImage { data: b"GIF89a".to_vec(), content_type: None }),
            }
        }
    }

    fn persister(fetcher: &Arc<CountingFetcher>) -> Persister {
        let fetcher: Arc<dyn ImageFetcher> = Arc::clone(fetcher) as Arc<dyn ImageFetcher>;
        Persister::new(fetcher, EXTENSIONS)
    }

    #[test]
    fn filename_shape() {
        let names = FilenameGenerator::with_host_seed(0xabcd);
        let name = names.generate("png");
        assert!(name.starts_with("000000000000abcd"));
        assert_eq!(Path::new(&name).extension().unwrap(), "png");
        let stem = Path::new(&name).file_stem().unwrap().to_str().unwrap();
        assert_eq!(stem.len(), 56);
        assert!(stem.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn filenames_unique_in_tight_loop() {
        let names = FilenameGenerator::with_host_seed(1);
        let generated: HashSet<String> = (0..10_000).map(|_| names.generate("jpg")).collect();
        assert_eq!(generated.len(), 10_000);
    }

    #[test]
    fn filenames_unique_across_threads_and_same_seed() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    let names = FilenameGenerator::with_host_seed(7);
                    (0..1_000).map(|_| names.generate("jpg")).collect::<Vec<_>>()
                })
            })
            .collect();
        let mut all = HashSet::new();
        for handle in handles {
            for name in handle.join().unwrap() {
                assert!(all.insert(name), "duplicate filename");
            }
        }
        assert_eq!(all.len(), 8_000);
    }

    #[test]
    fn random_seeds_differ() {
        assert_ne!(FilenameGenerator::new().host_seed(), FilenameGenerator::new().host_seed());
    }

    #[test]
    fn save_full_path() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(CountingFetcher::default());
        let path = persister(&fetcher)
            .save("https://dummyimage.com/10x10/0/f", Some(dir.path()), "gif", true)
            .unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(path.extension().unwrap(), "gif");
        assert_eq!(std::fs::read(&path).unwrap(), b"GIF89a");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_filename_only() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(CountingFetcher::default());
        let name = persister(&fetcher)
            .save("https://dummyimage.com/10x10/0/f", Some(dir.path()), "jpg", false)
            .unwrap();

        assert_eq!(name.components().count(), 1);
        assert!(dir.path().join(&name).exists());
    }

    #[test]
    fn save_defaults_to_temp_dir() {
        let fetcher = Arc::new(CountingFetcher::default());
        let path = persister(&fetcher).save("https://x/1/1", None, "jpg", true).unwrap();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn bad_extension_fails_before_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(CountingFetcher::default());
        let err = persister(&fetcher)
            .save("https://x/1/1", Some(dir.path()), "dafasdf", true)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn bad_directory_fails_before_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(CountingFetcher::default());
        let err = persister(&fetcher)
            .save("https://x/1/1", Some(&dir.path().join("missing")), "jpg", true)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_directory_fails_before_fetch() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();
        let can_create = tempfile::tempfile_in(&locked).is_ok();

        let fetcher = Arc::new(CountingFetcher::default());
        let result = persister(&fetcher).save("https://x/1/1", Some(&locked), "jpg", true);

        if can_create {
            // Running privileged: the directory really is writable.
            assert!(result.unwrap().starts_with(&locked));
            assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        } else {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
            assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        }

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn remote_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(CountingFetcher { status: Some(500), ..CountingFetcher::default() });
        let err = persister(&fetcher).save("https://x/1/1", Some(dir.path()), "jpg", true).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
