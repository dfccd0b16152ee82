#![forbid(unsafe_code)]

//! End-to-end minimap scenarios against recording and software surfaces.
//!
//! Covers the three layout cases, visor drag, click-to-jump, host scroll
//! sync, and frame stability across repeated resizes.

mod common;

use common::{CANVAS_HEIGHT, CANVAS_WIDTH, init_tracing, log_frame, pixmap_map, recording_map};
use minimap::{Interaction, LayoutCase, PointerEvent};
use minimap_render::{DrawOp, PackedRgba, Rect, Surface};
use pretty_assertions::assert_eq;

fn last_draws(ops: &[DrawOp]) -> Vec<(Rect, Rect)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::DrawImage {
                src_rect, dst_rect, ..
            } => Some((*src_rect, *dst_rect)),
            _ => None,
        })
        .collect()
}

#[test]
fn short_document_fits_canvas_with_clamped_visor() {
    init_tracing();
    let mut map = recording_map(10, 50);
    assert_eq!(map.bitmap().map(Surface::height), Some(40));
    assert_eq!(map.visor_height(), 200.0);

    map.handle_pointer(PointerEvent::press(1.0)).unwrap();
    // Grabbed at 1px; drag far below the canvas.
    let frame = map
        .handle_pointer(PointerEvent::move_to(5000.0))
        .unwrap()
        .expect("drag renders");
    log_frame("fits_canvas_drag", &frame);

    assert_eq!(frame.case, LayoutCase::FitsCanvas);
    assert_eq!(frame.source_y, 0.0);
    assert_eq!(frame.visor_top, 400.0);
    assert_eq!(frame.scroll_top, 400.0);
    assert_eq!(frame.scrolled_to_line, Some(100));

    let draws = last_draws(map.canvas().ops());
    let (bitmap_src, bitmap_dst) = draws[draws.len() - 2];
    assert_eq!(bitmap_src, Rect::new(0.0, 0.0, 200.0, 40.0));
    assert_eq!(bitmap_dst, Rect::new(0.0, 0.0, 198.0, 40.0));
    let (_, visor_dst) = draws[draws.len() - 1];
    assert_eq!(visor_dst, Rect::new(0.0, 400.0, 200.0, 200.0));
}

#[test]
fn long_document_scrolls_window() {
    init_tracing();
    let mut map = recording_map(5000, 50);
    assert_eq!(map.bitmap().map(Surface::height), Some(20000));

    // Drag the visor from its top edge to the middle of its travel.
    map.handle_pointer(PointerEvent::press(100.0)).unwrap();
    let frame = map
        .handle_pointer(PointerEvent::move_to(300.0))
        .unwrap()
        .expect("drag renders");
    log_frame("scrolling_drag", &frame);

    assert_eq!(frame.case, LayoutCase::Scrolling);
    assert_eq!(frame.normal, 0.5);
    assert_eq!(frame.scroll_top, 9900.0);
    assert_eq!(frame.visor_top, 200.0);
    assert_eq!(frame.source_y, 9700.0);
    assert_eq!(frame.source_height, 600.0);
    assert_eq!(frame.scrolled_to_line, Some(2475));
    assert_eq!(map.editor().top, 2475);
}

#[test]
fn drag_keeps_grab_offset() {
    let mut map = recording_map(5000, 50);
    map.editor_mut().top = 2475;
    map.on_host_scroll().unwrap();
    assert_eq!(map.visor_top(), 200.0);

    // Drag the visor back to [100, 300] first, then grab it at 150.
    map.handle_pointer(PointerEvent::press(250.0)).unwrap();
    map.handle_pointer(PointerEvent::move_to(150.0)).unwrap();
    map.handle_pointer(PointerEvent::release(150.0)).unwrap();
    assert_eq!(map.visor_top(), 100.0);

    map.handle_pointer(PointerEvent::press(150.0)).unwrap();
    assert_eq!(
        map.interaction(),
        Interaction::Pressed {
            y: 150.0,
            grab: Some(50.0)
        }
    );
    let frame = map
        .handle_pointer(PointerEvent::move_to(250.0))
        .unwrap()
        .expect("drag renders");
    assert_eq!(map.visor_top(), 200.0);
    let expected = (frame.scroll_top / 4.0).ceil() as usize;
    assert_eq!(map.editor().top, expected);
    assert_eq!(map.editor().scrolls.last(), Some(&expected));
}

#[test]
fn click_outside_visor_centers_it_on_release() {
    init_tracing();
    let mut map = recording_map(5000, 50);
    map.handle_pointer(PointerEvent::press(350.0)).unwrap();
    assert!(map.handle_pointer(PointerEvent::move_to(360.0)).unwrap().is_none());
    let frame = map
        .handle_pointer(PointerEvent::release(350.0))
        .unwrap()
        .expect("jump renders");
    log_frame("jump", &frame);
    assert_eq!(frame.visor_top, 250.0);
    assert_eq!(frame.visor_top + frame.visor_height / 2.0, 350.0);
    assert!(map.interaction() == Interaction::Idle);
}

#[test]
fn click_near_bottom_clamps_jump() {
    let mut map = recording_map(5000, 50);
    map.handle_pointer(PointerEvent::press(500.0)).unwrap();
    let frame = map
        .handle_pointer(PointerEvent::release(500.0))
        .unwrap()
        .expect("jump renders");
    assert_eq!(frame.visor_top, 400.0);
    assert_eq!(frame.normal, 1.0);
    assert_eq!(frame.scroll_top, 19800.0);
    assert_eq!(map.editor().top, 4950);
}

#[test]
fn release_off_the_minimap_cancels_jump() {
    let mut map = recording_map(5000, 50);
    map.handle_pointer(PointerEvent::press(500.0)).unwrap();
    assert!(
        map.handle_pointer(PointerEvent::release_outside(500.0))
            .unwrap()
            .is_none()
    );
    assert_eq!(map.visor_top(), 0.0);
    assert!(map.editor().scrolls.is_empty());
}

#[test]
fn oversized_visor_pins_to_top() {
    let mut map = recording_map(100, 200);
    map.editor_mut().top = 30;
    let frame = map.on_host_scroll().unwrap().expect("host scroll renders");
    assert_eq!(frame.case, LayoutCase::FitsVisor);
    assert_eq!(frame.visor_top, 0.0);
    assert_eq!(frame.source_y, 0.0);

    // The 800px visor covers the whole canvas, so any drag pins to the top.
    map.handle_pointer(PointerEvent::press(300.0)).unwrap();
    let frame = map
        .handle_pointer(PointerEvent::move_to(350.0))
        .unwrap()
        .expect("drag renders");
    assert_eq!(frame.case, LayoutCase::FitsVisor);
    assert_eq!(frame.visor_top, 0.0);
    assert_eq!(frame.scrolled_to_line, Some(0));
}

#[test]
fn host_scroll_tracks_editor_without_feedback() {
    let mut map = recording_map(1000, 50);
    for (top, expected_visor) in [(0, 0.0), (475, 200.0), (950, 400.0), (2000, 400.0)] {
        map.editor_mut().top = top;
        let frame = map.on_host_scroll().unwrap().expect("host scroll renders");
        assert_eq!(frame.visor_top, expected_visor, "top line {top}");
        assert_eq!(frame.scrolled_to_line, None);
    }
    assert!(map.editor().scrolls.is_empty());
}

#[test]
fn drag_round_trips_through_clamped_top() {
    let mut map = recording_map(5000, 50);
    map.handle_pointer(PointerEvent::press(10.0)).unwrap();
    for y in [37.0, 123.5, 290.25, 409.0, 999.0] {
        let frame = map
            .handle_pointer(PointerEvent::move_to(y))
            .unwrap()
            .expect("drag renders");
        let travel = f64::from(CANVAS_HEIGHT) - frame.visor_height;
        let rederived = frame.visor_top / travel;
        assert!((rederived - frame.normal).abs() <= 1.0 / travel, "y={y}");
    }
}

#[test]
fn repeated_resize_is_idempotent() {
    let mut map = pixmap_map(3000, 40);
    let first = map.resize(CANVAS_WIDTH, 500).unwrap();
    let first_checksum = map.canvas().checksum();
    let first_visor = (map.visor().overlay().width(), map.visor().overlay().height());

    let second = map.resize(CANVAS_WIDTH, 500).unwrap();
    assert_eq!(first, second);
    assert_eq!(map.canvas().checksum(), first_checksum);
    assert_eq!(
        (map.visor().overlay().width(), map.visor().overlay().height()),
        first_visor
    );
}

#[test]
fn pixmap_frame_has_background_margin_and_visor() {
    let map = pixmap_map(300, 50);
    let canvas = map.canvas();
    // The reserved right margin keeps the background.
    assert_eq!(canvas.pixel(CANVAS_WIDTH - 1, 500), Some(PackedRgba::BLACK));
    // Visor tint over the background inside the visor.
    let tinted = PackedRgba::rgb(250, 250, 250)
        .with_opacity(0.2)
        .over(PackedRgba::BLACK);
    assert_eq!(canvas.pixel(CANVAS_WIDTH - 1, 10), Some(tinted));
    // Text rows carry ink somewhere in the first line.
    assert!(canvas.row_has_ink(2, tinted));
}
