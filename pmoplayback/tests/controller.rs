mod common;

use std::sync::Arc;

use futures::executor::block_on;

use common::{FakeElement, FakeFramework};
use pmoplayback::cast::CastFramework;
use pmoplayback::local::MediaElement;
use pmoplayback::{
    CastOptions, CastPlayer, LocalPlayer, MediaController, PlaybackError, PlaybackTarget,
};

fn local_controller() -> (MediaController, Arc<FakeElement>) {
    let element = FakeElement::new();
    let mut player = LocalPlayer::new();
    player.initialize(Some(element.clone() as Arc<dyn MediaElement>));
    (MediaController::Local(player), element)
}

fn cast_controller() -> (MediaController, Arc<FakeFramework>) {
    let framework = FakeFramework::new();
    let mut player = CastPlayer::new(framework.clone() as Arc<dyn CastFramework>);
    player.initialize(CastOptions::default());
    (MediaController::Cast(player), framework)
}

#[test]
fn test_local_target_dispatch() {
    let (controller, element) = local_controller();
    assert_eq!(controller.target(), PlaybackTarget::Local);
    assert!(controller.is_ready());

    assert_eq!(block_on(controller.load("http://host/a.mp4")), Ok(()));
    assert_eq!(block_on(controller.play()), Ok(()));
    assert!(!controller.is_paused());

    controller.seek(75.0);
    element.state.lock().duration = 200.0;
    assert_eq!(controller.position_label(), "00:01:15 / 00:03:20");

    controller.set_volume(3.0);
    assert_eq!(controller.volume(), 1.0);
    controller.mute();
    assert!(controller.is_muted());
    controller.unmute();
    assert!(!controller.is_muted());

    controller.pause();
    assert!(controller.is_paused());
    controller.stop();
    assert_eq!(controller.current_time(), 0.0);
    assert!(
        controller
            .as_local()
            .is_some_and(|p| !p.is_media_loaded(None))
    );
}

#[test]
fn test_local_load_rejects_empty_url() {
    let (controller, _element) = local_controller();
    assert_eq!(
        block_on(controller.load("")),
        Err(PlaybackError::MissingUrl)
    );
}

#[test]
fn test_unknown_duration_label() {
    let (controller, _element) = local_controller();
    assert_eq!(controller.position_label(), "00:00:00 / --:--:--");
}

#[test]
fn test_cast_target_requires_connection() {
    let (controller, _framework) = cast_controller();
    assert_eq!(controller.target(), PlaybackTarget::Cast);
    assert!(!controller.is_ready());
    assert_eq!(
        block_on(controller.play()),
        Err(PlaybackError::NotConnected)
    );
    assert_eq!(
        block_on(controller.load("http://host/a.mp4")),
        Err(PlaybackError::NotConnected)
    );
    assert!(controller.as_cast().is_some());
    assert!(controller.as_local().is_none());
}

#[test]
fn test_cast_target_dispatch() {
    let (controller, framework) = cast_controller();
    let session = framework.connect();
    assert!(controller.is_ready());

    assert_eq!(block_on(controller.load("http://host/a.mpd")), Ok(()));
    assert_eq!(session.loads.lock()[0].media.content_type, "application/dash+xml");

    assert_eq!(block_on(controller.play()), Ok(()));
    assert!(!controller.is_paused());
    controller.mute();
    controller.mute();
    controller.seek(10.0);
    controller.stop();

    assert_eq!(
        framework.controller.calls(),
        vec!["play_or_pause", "mute_or_unmute", "seek", "stop"]
    );
}
