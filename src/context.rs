//! Service context that selects the image fetcher implementation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::http::HttpImageFetcher;
use crate::adapters::recording::image_fetcher::RecordingImageFetcher;
use crate::adapters::replaying::image_fetcher::ReplayingImageFetcher;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::ImageError;
use crate::ports::ImageFetcher;

/// Environment variable naming a cassette to replay downloads from.
pub const REPLAY_ENV: &str = "PLACEHOLDER_REPLAY";

/// Environment variable that turns on recording (`1` or `true`).
pub const RECORD_ENV: &str = "PLACEHOLDER_REC";

/// Bundles the port implementations used by a run.
pub struct ServiceContext {
    /// Image fetcher port.
    pub fetcher: Arc<dyn ImageFetcher>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot
    /// be written.
    pub fn finish(self) -> Result<PathBuf, ImageError> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| ImageError::Config("Recording adapter still has references".into()))?
            .into_inner()
            .map_err(|e| ImageError::Config(format!("Recorder lock poisoned: {e}")))?;
        let path = recorder.path().to_path_buf();
        recorder.finish().map_err(|source| ImageError::Io { path, source })
    }
}

impl ServiceContext {
    /// Context that downloads over real HTTP.
    #[must_use]
    pub fn live() -> Self {
        Self { fetcher: Arc::new(HttpImageFetcher::new()) }
    }

    /// Context that wraps the live fetcher with a recorder writing under
    /// `.placeholder/cassettes/<timestamp>/`.
    #[must_use]
    pub fn recording() -> (Self, RecordingSession) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".placeholder/cassettes")
            .join(&timestamp)
            .join("image_fetcher.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_fetcher"),
            get_commit_hash(),
        )));

        let live = Self::live();
        let fetcher = RecordingImageFetcher::new(live.fetcher, Arc::clone(&recorder));

        (Self { fetcher: Arc::new(fetcher) }, RecordingSession { recorder })
    }

    /// Context that serves downloads from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ImageError> {
        let replayer = Arc::new(Mutex::new(load_cassette(path)?));
        Ok(Self { fetcher: Arc::new(ReplayingImageFetcher::new(replayer)) })
    }

    /// Pick replay, record, or live mode from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_env() -> Result<(Self, Option<RecordingSession>), ImageError> {
        if let Ok(cassette) = std::env::var(REPLAY_ENV) {
            return Ok((Self::replaying(Path::new(&cassette))?, None));
        }
        if std::env::var(RECORD_ENV).is_ok_and(|v| v == "true" || v == "1") {
            let (ctx, session) = Self::recording();
            return Ok((ctx, Some(session)));
        }
        Ok((Self::live(), None))
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
