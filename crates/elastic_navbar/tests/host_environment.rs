//! Host integration with the platform environment
//!
//! These tests drive a mounted [`NavigationHost`] through the environment hub
//! and the event queue:
//! - Safe-area reads after a rotation land after queued scroll input
//! - Dropping the host unsubscribes from the hub
//! - Measured sizes never feed a zero back into the layout
//! - Refresh start and stop are announced to registered handlers

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use elastic_core::events::event_types;
use elastic_core::{EdgeInsets, Event, InterfaceOrientation, Size};
use elastic_navbar::{
    BarFrame, BarRenderer, ElasticNavigation, HostEnvironment, NavigationHost, RefreshPhase,
    StopSignal,
};
use elastic_platform::{DeviceOrientation, EnvironmentHub, SharedInsets};

#[derive(Default)]
struct FrameLog {
    frames: Vec<(InterfaceOrientation, f32)>,
    reports: Vec<Size>,
}

impl BarRenderer<()> for FrameLog {
    fn render(&mut self, frame: &BarFrame<'_, ()>) {
        if !self.reports.is_empty() {
            frame.reporter.report(self.reports.remove(0));
        }
        self.frames
            .push((frame.orientation, frame.layout.progress_offset_y));
    }
}

fn portrait_insets() -> SharedInsets {
    SharedInsets::new(EdgeInsets::new(47.0, 0.0, 34.0, 0.0))
}

#[test]
fn test_safe_area_read_follows_queued_scrolls() {
    let hub = EnvironmentHub::new();
    let insets = portrait_insets();
    let env = HostEnvironment::new()
        .with_insets(insets.clone())
        .with_hub(&hub);
    let nav = ElasticNavigation::new(()).with_title("Photos");
    let mut host = NavigationHost::new(nav, FrameLog::default(), env);

    host.push(Event::scroll(0.0, -10.0));
    host.push(Event::scroll(0.0, -20.0));
    assert_eq!(hub.publish(DeviceOrientation::LandscapeLeft), Ok(1));
    insets.set(EdgeInsets::new(0.0, 47.0, 21.0, 47.0));

    assert_eq!(host.process(), 4);

    let renderer = host.renderer();
    let frames = &renderer.frames;
    assert_eq!(frames.len(), 5);
    // rotation applied with the old insets, then the deferred read
    assert_eq!(frames[3], (InterfaceOrientation::LandscapeLeft, 57.0));
    assert_eq!(frames[4], (InterfaceOrientation::LandscapeLeft, 10.0));
    drop(renderer);

    assert_eq!(host.environment().insets.top, 0.0);
}

#[test]
fn test_untracked_orientation_is_ignored() {
    let hub = EnvironmentHub::new();
    let env = HostEnvironment::new()
        .with_insets(portrait_insets())
        .with_hub(&hub);
    let mut host = NavigationHost::new(ElasticNavigation::new(()), FrameLog::default(), env);

    hub.publish(DeviceOrientation::FaceUp).unwrap();
    hub.publish(DeviceOrientation::Portrait).unwrap();

    assert_eq!(host.process(), 0);
    assert_eq!(host.environment().orientation, InterfaceOrientation::Portrait);
    assert_eq!(host.frames_rendered(), 1);
}

#[test]
fn test_publish_from_another_thread() {
    let hub = EnvironmentHub::new();
    let env = HostEnvironment::new()
        .with_insets(portrait_insets())
        .with_hub(&hub);
    let mut host = NavigationHost::new(ElasticNavigation::new(()), FrameLog::default(), env);

    let remote = hub.clone();
    thread::spawn(move || remote.publish(DeviceOrientation::LandscapeRight))
        .join()
        .unwrap()
        .unwrap();

    host.process();
    assert_eq!(
        host.environment().orientation,
        InterfaceOrientation::LandscapeRight
    );
}

#[test]
fn test_dropping_host_unsubscribes() {
    let hub = EnvironmentHub::new();
    let env = HostEnvironment::new().with_hub(&hub);
    let host = NavigationHost::new(ElasticNavigation::new(()), FrameLog::default(), env);
    assert_eq!(hub.subscriber_count(), 1);

    drop(host);
    assert_eq!(hub.subscriber_count(), 0);
    assert_eq!(hub.publish(DeviceOrientation::Portrait), Ok(0));
}

#[test]
fn test_zero_measurement_never_reaches_layout() {
    let renderer = FrameLog {
        reports: vec![Size::new(390.0, 52.0), Size::ZERO, Size::ZERO],
        ..FrameLog::default()
    };
    let env = HostEnvironment::new().with_insets(portrait_insets());
    let nav = ElasticNavigation::new(()).with_title("Photos");
    let mut host = NavigationHost::new(nav, renderer, env);

    host.scroll(0.0, -15.0);
    host.scroll(0.0, -30.0);

    assert_eq!(host.measured_size(), Size::new(390.0, 52.0));
    assert_eq!(host.layout().content_top_padding, 52.0 + 40.0 + 47.0);
}

#[test]
fn test_measurement_event_feeds_layout() {
    let env = HostEnvironment::new().with_insets(portrait_insets());
    let nav = ElasticNavigation::new(()).with_title("Photos");
    let mut host = NavigationHost::new(nav, FrameLog::default(), env);

    host.push(Event::measured(Size::new(390.0, 60.0)));
    host.push(Event::measured(Size::ZERO));
    host.process();

    assert_eq!(host.layout().content_top_padding, 60.0 + 40.0 + 47.0);
}

#[test]
fn test_refresh_notifications() {
    let stop = StopSignal::new();
    let nav = ElasticNavigation::new(())
        .with_title("Photos")
        .with_refresh(stop.clone(), || {});
    let env = HostEnvironment::new().with_insets(portrait_insets());
    let mut host = NavigationHost::new(nav, FrameLog::default(), env);

    let seen = Rc::new(RefCell::new(Vec::new()));
    for event_type in [event_types::REFRESH_STARTED, event_types::REFRESH_STOPPED] {
        let seen = seen.clone();
        host.on(event_type, move |event| seen.borrow_mut().push(event.event_type));
    }

    host.scroll(0.0, 140.0);
    host.scroll(0.0, 0.0);
    assert_eq!(host.refresh_state().phase, RefreshPhase::Refreshing);

    stop.set(true);
    host.process();
    // stays high; no second stop
    host.process();

    assert_eq!(host.refresh_state().phase, RefreshPhase::Idle);
    assert_eq!(
        *seen.borrow(),
        vec![event_types::REFRESH_STARTED, event_types::REFRESH_STOPPED]
    );
}
