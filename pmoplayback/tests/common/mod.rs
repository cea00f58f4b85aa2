//! In-memory doubles of the media element and of the casting SDK.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future;
use parking_lot::Mutex;
use serde_json::Value;

use pmoplayback::Deferred;
use pmoplayback::PlaybackError;
use pmoplayback::cast::{
    CastContext, CastFramework, CastOptions, CastSession, LoadRequest, MediaSession, PlayerState,
    RemotePlayer, RemotePlayerChangedEvent, RemotePlayerController, RemotePlayerEventType,
    RemotePlayerHandler, RemotePlayerValue,
};
use pmoplayback::local::{ElementEvent, ElementHandler, MediaElement, MediaElementError};

fn outcome(result: Result<(), PlaybackError>) -> Deferred {
    future::ready(result).boxed()
}

#[derive(Debug, Clone)]
pub struct ElementState {
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub ended: bool,
    pub volume: f64,
    pub muted: bool,
    pub source: Option<String>,
    pub error: Option<MediaElementError>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: f64::NAN,
            paused: true,
            ended: false,
            volume: 1.0,
            muted: false,
            source: None,
            error: None,
        }
    }
}

#[derive(Default)]
pub struct FakeElement {
    pub state: Mutex<ElementState>,
    pub calls: Mutex<Vec<String>>,
    pub play_result: Mutex<Option<PlaybackError>>,
    handlers: Mutex<HashMap<ElementEvent, Vec<ElementHandler>>>,
}

impl FakeElement {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn handler_count(&self, event: ElementEvent) -> usize {
        self.handlers.lock().get(&event).map_or(0, Vec::len)
    }

    /// Delivers a native notification to the registered handlers.
    pub fn fire(&self, event: ElementEvent) {
        let handlers = self.handlers.lock();
        if let Some(list) = handlers.get(&event) {
            for handler in list {
                handler();
            }
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }
}

impl MediaElement for FakeElement {
    fn current_time(&self) -> f64 {
        self.state.lock().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        self.record(format!("set_current_time({seconds})"));
        self.state.lock().current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.state.lock().duration
    }

    fn paused(&self) -> bool {
        self.state.lock().paused
    }

    fn ended(&self) -> bool {
        self.state.lock().ended
    }

    fn volume(&self) -> f64 {
        self.state.lock().volume
    }

    fn set_volume(&self, level: f64) {
        self.state.lock().volume = level;
    }

    fn muted(&self) -> bool {
        self.state.lock().muted
    }

    fn set_muted(&self, muted: bool) {
        self.state.lock().muted = muted;
    }

    fn source(&self) -> Option<String> {
        self.state.lock().source.clone()
    }

    fn set_source(&self, url: &str) {
        self.record(format!("set_source({url})"));
        self.state.lock().source = Some(url.to_string());
    }

    fn remove_source(&self) {
        self.record("remove_source");
        self.state.lock().source = None;
    }

    fn error(&self) -> Option<MediaElementError> {
        self.state.lock().error.clone()
    }

    fn load(&self) {
        self.record("load");
    }

    fn play(&self) -> Deferred {
        self.record("play");
        match self.play_result.lock().clone() {
            Some(error) => outcome(Err(error)),
            None => {
                self.state.lock().paused = false;
                outcome(Ok(()))
            }
        }
    }

    fn pause(&self) {
        self.record("pause");
        self.state.lock().paused = true;
    }

    fn add_event_listener(&self, event: ElementEvent, handler: ElementHandler) {
        self.handlers.lock().entry(event).or_default().push(handler);
    }
}

#[derive(Debug, Clone)]
pub struct RemoteState {
    pub connected: bool,
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub player_state: Option<PlayerState>,
    pub volume_level: f64,
    pub muted: bool,
}

impl Default for RemoteState {
    fn default() -> Self {
        Self {
            connected: false,
            current_time: 0.0,
            duration: 0.0,
            paused: true,
            player_state: None,
            volume_level: 1.0,
            muted: false,
        }
    }
}

#[derive(Default)]
pub struct FakeRemotePlayer {
    pub state: Mutex<RemoteState>,
}

impl FakeRemotePlayer {
    pub fn set_connected(&self, connected: bool) {
        self.state.lock().connected = connected;
    }
}

impl RemotePlayer for FakeRemotePlayer {
    fn is_connected(&self) -> bool {
        self.state.lock().connected
    }

    fn current_time(&self) -> f64 {
        self.state.lock().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        self.state.lock().current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.state.lock().duration
    }

    fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    fn player_state(&self) -> Option<PlayerState> {
        self.state.lock().player_state
    }

    fn volume_level(&self) -> f64 {
        self.state.lock().volume_level
    }

    fn set_volume_level(&self, level: f64) {
        self.state.lock().volume_level = level;
    }

    fn is_muted(&self) -> bool {
        self.state.lock().muted
    }
}

pub struct FakeController {
    player: Arc<FakeRemotePlayer>,
    pub calls: Mutex<Vec<&'static str>>,
    handlers: Mutex<HashMap<RemotePlayerEventType, Vec<RemotePlayerHandler>>>,
}

impl FakeController {
    pub fn new(player: Arc<FakeRemotePlayer>) -> Self {
        Self {
            player,
            calls: Mutex::new(Vec::new()),
            handlers: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    pub fn handler_count(&self, kind: RemotePlayerEventType) -> usize {
        self.handlers.lock().get(&kind).map_or(0, Vec::len)
    }

    pub fn fire(&self, kind: RemotePlayerEventType, value: RemotePlayerValue) {
        let change = RemotePlayerChangedEvent { kind, value };
        let handlers = self.handlers.lock();
        if let Some(list) = handlers.get(&kind) {
            for handler in list {
                handler(&change);
            }
        }
    }
}

impl RemotePlayerController for FakeController {
    fn add_event_listener(&self, event: RemotePlayerEventType, handler: RemotePlayerHandler) {
        self.handlers.lock().entry(event).or_default().push(handler);
    }

    fn play_or_pause(&self) {
        self.calls.lock().push("play_or_pause");
        let mut state = self.player.state.lock();
        state.paused = !state.paused;
    }

    fn stop(&self) {
        self.calls.lock().push("stop");
    }

    fn seek(&self) {
        self.calls.lock().push("seek");
    }

    fn set_volume_level(&self) {
        self.calls.lock().push("set_volume_level");
    }

    fn mute_or_unmute(&self) {
        self.calls.lock().push("mute_or_unmute");
        let mut state = self.player.state.lock();
        state.muted = !state.muted;
    }
}

#[derive(Default)]
pub struct FakeSession {
    pub media_session: Mutex<Option<MediaSession>>,
    pub loads: Mutex<Vec<LoadRequest>>,
    pub messages: Mutex<Vec<(String, Value)>>,
    pub load_error: Mutex<Option<PlaybackError>>,
    pub send_error: Mutex<Option<PlaybackError>>,
}

impl CastSession for FakeSession {
    fn media_session(&self) -> Option<MediaSession> {
        self.media_session.lock().clone()
    }

    fn load_media(&self, request: LoadRequest) -> Deferred {
        self.loads.lock().push(request);
        match self.load_error.lock().clone() {
            Some(error) => outcome(Err(error)),
            None => outcome(Ok(())),
        }
    }

    fn send_message(&self, namespace: &str, message: &Value) -> Deferred {
        self.messages
            .lock()
            .push((namespace.to_string(), message.clone()));
        match self.send_error.lock().clone() {
            Some(error) => outcome(Err(error)),
            None => outcome(Ok(())),
        }
    }
}

#[derive(Default)]
pub struct FakeContext {
    pub options: Mutex<Option<CastOptions>>,
    pub session: Mutex<Option<Arc<FakeSession>>>,
    pub session_requests: AtomicUsize,
    pub ended: Mutex<Vec<bool>>,
    pub reject_options: bool,
}

impl FakeContext {
    pub fn requests(&self) -> usize {
        self.session_requests.load(Ordering::SeqCst)
    }
}

impl CastContext for FakeContext {
    fn set_options(&self, options: &CastOptions) -> pmoplayback::Result<()> {
        if self.reject_options {
            return Err(PlaybackError::cast_error("invalid receiver application id"));
        }
        *self.options.lock() = Some(options.clone());
        Ok(())
    }

    fn current_session(&self) -> Option<Arc<dyn CastSession>> {
        self.session
            .lock()
            .clone()
            .map(|session| session as Arc<dyn CastSession>)
    }

    fn request_session(&self) -> Deferred {
        self.session_requests.fetch_add(1, Ordering::SeqCst);
        outcome(Ok(()))
    }

    fn end_current_session(&self, stop_casting: bool) -> Deferred {
        self.ended.lock().push(stop_casting);
        outcome(Ok(()))
    }
}

pub struct FakeFramework {
    pub available: bool,
    pub context: Arc<FakeContext>,
    pub player: Arc<FakeRemotePlayer>,
    pub controller: Arc<FakeController>,
    pub remote_players_created: AtomicUsize,
}

impl FakeFramework {
    pub fn new() -> Arc<Self> {
        Self::with_context(FakeContext::default())
    }

    pub fn unavailable() -> Arc<Self> {
        let mut framework = Self::build(FakeContext::default());
        framework.available = false;
        Arc::new(framework)
    }

    pub fn with_context(context: FakeContext) -> Arc<Self> {
        Arc::new(Self::build(context))
    }

    fn build(context: FakeContext) -> Self {
        let player = Arc::new(FakeRemotePlayer::default());
        let controller = Arc::new(FakeController::new(player.clone()));
        Self {
            available: true,
            context: Arc::new(context),
            player,
            controller,
            remote_players_created: AtomicUsize::new(0),
        }
    }

    /// Opens a session and marks the remote player as connected.
    pub fn connect(&self) -> Arc<FakeSession> {
        let session = Arc::new(FakeSession::default());
        *self.context.session.lock() = Some(session.clone());
        self.player.set_connected(true);
        session
    }
}

impl CastFramework for FakeFramework {
    fn is_available(&self) -> bool {
        self.available
    }

    fn context(&self) -> pmoplayback::Result<Arc<dyn CastContext>> {
        Ok(self.context.clone() as Arc<dyn CastContext>)
    }

    fn create_remote_player(
        &self,
    ) -> pmoplayback::Result<(Arc<dyn RemotePlayer>, Arc<dyn RemotePlayerController>)> {
        self.remote_players_created.fetch_add(1, Ordering::SeqCst);
        Ok((
            self.player.clone() as Arc<dyn RemotePlayer>,
            self.controller.clone() as Arc<dyn RemotePlayerController>,
        ))
    }
}
