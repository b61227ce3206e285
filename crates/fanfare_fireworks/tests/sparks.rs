//! Spark overlay lifecycle

mod common;

use common::TestHost;
use fanfare_core::{DrawCommand, Point, Rect};
use fanfare_fireworks::{FireworksError, SparkOverlay, SparkOverlayConfig, Target};
use fanfare_platform::{ElementId, PlatformError};
use std::time::Duration;

fn overlay(t: &TestHost) -> SparkOverlay {
    SparkOverlay::with_seed(t.host.clone(), SparkOverlayConfig::default(), 17)
}

#[test]
fn test_group_removed_after_motion_and_grace() {
    let t = TestHost::new(1024.0, 768.0);
    let sparks = overlay(&t);

    sparks.show(None).unwrap();
    assert_eq!(sparks.group_count(), 1);
    assert!(sparks.is_attached());
    assert_eq!(t.display.attached_count(), 1);

    t.scheduler.run_for(Duration::from_millis(1150));
    assert_eq!(sparks.group_count(), 1);

    t.scheduler.run_for(Duration::from_millis(100));
    assert_eq!(sparks.group_count(), 0);
    assert!(!sparks.is_attached());
    assert_eq!(t.display.attached_count(), 0);
    assert!(!t.scheduler.has_pending());
}

#[test]
fn test_groups_share_one_surface() {
    let t = TestHost::new(1024.0, 768.0);
    let sparks = overlay(&t);
    t.locator.insert(ElementId(3), Rect::new(100.0, 100.0, 40.0, 40.0));

    sparks.show(Some(ElementId(3).into())).unwrap();
    t.scheduler.run_for(Duration::from_millis(500));
    sparks.show(Some(Target::Point(Point::new(700.0, 300.0)))).unwrap();

    assert_eq!(sparks.group_count(), 2);
    assert_eq!(t.display.created_count(), 1);

    // First group gone, second still running
    t.scheduler.run_for(Duration::from_millis(800));
    assert_eq!(sparks.group_count(), 1);
    assert_eq!(t.display.attached_count(), 1);

    t.scheduler.run_until_idle(1000);
    assert_eq!(sparks.group_count(), 0);
    assert_eq!(t.display.attached_count(), 0);

    // A new group brings up a fresh surface
    sparks.show(None).unwrap();
    assert_eq!(t.display.created_count(), 2);
}

#[test]
fn test_frames_clear_and_draw_markers() {
    let t = TestHost::new(800.0, 600.0);
    let sparks = overlay(&t);
    sparks.show(None).unwrap();

    t.scheduler.run_for(Duration::from_millis(300));

    let id = t.display.surface_ids()[0];
    let frame = t.display.surface(id).unwrap().last_frame;
    assert_eq!(frame.first(), Some(&DrawCommand::Clear));

    let circles = frame
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
        .count();
    // Every delay is at most 100ms, so all sparks are moving by now
    assert_eq!(circles, 28);
}

#[test]
fn test_dropping_overlay_cleans_up() {
    let t = TestHost::new(800.0, 600.0);
    let sparks = overlay(&t);
    sparks.show(None).unwrap();
    sparks.show(None).unwrap();

    drop(sparks);
    assert_eq!(t.display.attached_count(), 0);
    assert!(!t.scheduler.has_pending());
}

#[test]
fn test_unavailable_host() {
    let t = TestHost::new(800.0, 600.0);
    t.display.set_available(false);
    let sparks = overlay(&t);

    assert!(matches!(
        sparks.show(None),
        Err(FireworksError::Platform(PlatformError::SurfaceUnavailable(_)))
    ));
    sparks.trigger(None);
    assert_eq!(sparks.group_count(), 0);
    assert!(!t.scheduler.has_pending());
}

#[test]
fn test_unbounded_viewport_gets_no_surface() {
    let t = TestHost::new(f32::INFINITY, 600.0);
    let sparks = overlay(&t);

    assert!(matches!(
        sparks.show(None),
        Err(FireworksError::Platform(PlatformError::SurfaceUnavailable(_)))
    ));
    assert_eq!(t.display.created_count(), 0);
    assert_eq!(sparks.group_count(), 0);
    assert!(!t.scheduler.has_pending());
}
