use crate::settings::{Setting, SettingsProvider};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Playback primitives the host player exposes to the recovery task.
///
/// `current_video_length` returns 0 (or any value <= 1) until the player has
/// loaded enough of the video to know its duration.
pub trait PlayerHandle: Send + Sync {
    fn current_video_length(&self) -> i64;
    fn last_known_position(&self) -> i64;
    fn seek_to(&self, position_millis: i64);
}

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Default)]
struct RecoveryState {
    current_video_id: Option<String>,
    task: Option<JoinHandle<()>>,
}

/// Restores the last known playback position when a video reloads.
///
/// One polling task runs per video id: it waits for the player to report a
/// usable duration, performs a fixed three-step seek sequence (end, start,
/// last known position) and exits. A new video id cancels any task still
/// running for the previous one.
pub struct PlaybackRecovery {
    settings: Arc<dyn SettingsProvider>,
    player: Arc<dyn PlayerHandle>,
    state: Mutex<RecoveryState>,
}

impl PlaybackRecovery {
    pub fn new(settings: Arc<dyn SettingsProvider>, player: Arc<dyn PlayerHandle>) -> Self {
        Self {
            settings,
            player,
            state: Mutex::new(RecoveryState::default()),
        }
    }

    /// Notify the recovery loop that playback moved to a new video.
    ///
    /// `None` clears the tracked id and cancels any running task without
    /// starting a new one. Repeating the current id is a no-op. Must be
    /// called from within a tokio runtime.
    pub fn on_new_video(&self, video_id: Option<&str>) {
        if !self.settings.get_bool(Setting::FixPlayback) {
            return;
        }

        let mut state = self.state.lock().unwrap();

        let Some(video_id) = video_id else {
            state.current_video_id = None;
            Self::cancel(&mut state);
            return;
        };

        if state.current_video_id.as_deref() == Some(video_id) {
            return;
        }
        state.current_video_id = Some(video_id.to_string());

        Self::cancel(&mut state);

        let player = Arc::clone(&self.player);
        state.task = Some(tokio::spawn(async move {
            loop {
                let video_length = player.current_video_length();
                let last_known_position = player.last_known_position();
                if video_length > 1 || last_known_position > 1 {
                    player.seek_to(video_length);
                    player.seek_to(1);
                    player.seek_to(last_known_position);
                    return;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        }));
    }

    fn cancel(state: &mut RecoveryState) {
        if let Some(task) = state.task.take() {
            debug!("cancelling playback recovery task");
            task.abort();
        }
    }
}

impl Drop for PlaybackRecovery {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            Self::cancel(&mut state);
        }
    }
}
