//! Local playback demo
//!
//! Drives a `LocalPlayer` bound to an in-memory media element that advances
//! its clock on every tick, and prints the forwarded events.
//!
//! Usage:
//!   cargo run -p pmoplayback --example local_playback_demo -- [media_url]

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use futures::FutureExt;
use futures::executor::block_on;
use parking_lot::Mutex;
use tracing::info;

use pmoconfig::get_config;
use pmoplayback::local::{ElementEvent, ElementHandler, MediaElement, MediaElementError};
use pmoplayback::{
    Deferred, LocalEvent, LocalEventKind, LocalPlayer, MediaController, init_logging, listener,
};

const DEFAULT_MEDIA_URL: &str = "https://example.org/media/demo.mp4";
const MEDIA_DURATION: f64 = 185.0;

#[derive(Default)]
struct Clock {
    time: f64,
    paused: bool,
    volume: f64,
    muted: bool,
    source: Option<String>,
}

/// Media element that plays nothing but keeps a consistent state.
#[derive(Default)]
struct SimulatedElement {
    clock: Mutex<Clock>,
    handlers: Mutex<HashMap<ElementEvent, Vec<ElementHandler>>>,
}

impl SimulatedElement {
    fn new() -> Arc<Self> {
        let element = Self::default();
        {
            let mut clock = element.clock.lock();
            clock.paused = true;
            clock.volume = 1.0;
        }
        Arc::new(element)
    }

    fn dispatch(&self, event: ElementEvent) {
        if let Some(list) = self.handlers.lock().get(&event) {
            list.iter().for_each(|handler| handler());
        }
    }

    /// Advances playback by `seconds` and notifies a time update.
    fn tick(&self, seconds: f64) {
        let ended = {
            let mut clock = self.clock.lock();
            if clock.paused {
                return;
            }
            clock.time = (clock.time + seconds).min(MEDIA_DURATION);
            clock.time >= MEDIA_DURATION
        };
        self.dispatch(ElementEvent::TimeUpdate);
        if ended {
            self.clock.lock().paused = true;
            self.dispatch(ElementEvent::Ended);
        }
    }
}

impl MediaElement for SimulatedElement {
    fn current_time(&self) -> f64 {
        self.clock.lock().time
    }

    fn set_current_time(&self, seconds: f64) {
        self.clock.lock().time = seconds.clamp(0.0, MEDIA_DURATION);
        self.dispatch(ElementEvent::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        if self.clock.lock().source.is_some() {
            MEDIA_DURATION
        } else {
            f64::NAN
        }
    }

    fn paused(&self) -> bool {
        self.clock.lock().paused
    }

    fn ended(&self) -> bool {
        self.clock.lock().time >= MEDIA_DURATION
    }

    fn volume(&self) -> f64 {
        self.clock.lock().volume
    }

    fn set_volume(&self, level: f64) {
        self.clock.lock().volume = level;
        self.dispatch(ElementEvent::VolumeChange);
    }

    fn muted(&self) -> bool {
        self.clock.lock().muted
    }

    fn set_muted(&self, muted: bool) {
        self.clock.lock().muted = muted;
        self.dispatch(ElementEvent::VolumeChange);
    }

    fn source(&self) -> Option<String> {
        self.clock.lock().source.clone()
    }

    fn set_source(&self, url: &str) {
        self.clock.lock().source = Some(url.to_string());
    }

    fn remove_source(&self) {
        self.clock.lock().source = None;
    }

    fn error(&self) -> Option<MediaElementError> {
        None
    }

    fn load(&self) {
        self.clock.lock().time = 0.0;
        if self.clock.lock().source.is_some() {
            self.dispatch(ElementEvent::DurationChange);
            self.dispatch(ElementEvent::LoadedData);
        }
    }

    fn play(&self) -> Deferred {
        self.clock.lock().paused = false;
        self.dispatch(ElementEvent::Play);
        futures::future::ready(Ok(())).boxed()
    }

    fn pause(&self) {
        self.clock.lock().paused = true;
        self.dispatch(ElementEvent::Pause);
    }

    fn add_event_listener(&self, event: ElementEvent, handler: ElementHandler) {
        self.handlers.lock().entry(event).or_default().push(handler);
    }
}

fn main() -> anyhow::Result<()> {
    let config = get_config()?;
    init_logging(&config)?;

    let url = env::args().nth(1).unwrap_or_else(|| DEFAULT_MEDIA_URL.to_string());

    let element = SimulatedElement::new();
    let mut player = LocalPlayer::new();
    if !player.initialize(Some(element.clone() as Arc<dyn MediaElement>)) {
        anyhow::bail!("unable to bind the simulated media element");
    }

    player.on(
        LocalEventKind::DurationChange,
        listener(|event: &LocalEvent| println!("📏 {:?}", event)),
    );
    player.on(
        LocalEventKind::VolumeChange,
        listener(|event: &LocalEvent| println!("🔊 {:?}", event)),
    );
    player.on(
        LocalEventKind::Ended,
        listener(|_: &LocalEvent| println!("⏹  ended")),
    );

    let controller = MediaController::from(player);
    block_on(controller.load(&url))?;
    block_on(controller.play())?;
    info!(url = %url, "Playback started");

    for step in 0..8 {
        element.tick(15.0);
        println!("▶️  {}", controller.position_label());
        if step == 3 {
            controller.set_volume(0.5);
            controller.seek(150.0);
        }
    }

    controller.mute();
    controller.stop();
    println!("Final position: {}", controller.position_label());

    Ok(())
}
