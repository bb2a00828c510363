//! Handle positions, drags and hit testing through the scene controller.

use starkit_designer::{HandleKey, ManualClock, Point, SceneController};
use starkit_settings::Config;

fn scene() -> (SceneController, u64) {
    let mut scene = SceneController::with_clock(Config::default(), ManualClock::new());
    let id = scene.add_shape();
    (scene, id)
}

fn position(scene: &SceneController, id: u64, key: HandleKey) -> Point {
    scene
        .handle_positions(id)
        .unwrap()
        .into_iter()
        .find(|(k, _)| *k == key)
        .map(|(_, p)| p)
        .unwrap()
}

#[test]
fn test_registry_order() {
    let (scene, id) = scene();
    let keys: Vec<_> = scene
        .handle_positions(id)
        .unwrap()
        .into_iter()
        .map(|(k, _)| k.name())
        .collect();
    assert_eq!(
        keys,
        vec!["tl", "tr", "bl", "br", "ml", "mt", "mr", "mb", "radius", "depth", "spokes"]
    );
}

#[test]
fn test_radius_handle_drag() {
    let (mut scene, id) = scene();

    for _ in 0..30 {
        scene.drag_handle(id, HandleKey::Radius, Point::new(0.0, 5.0)).unwrap();
    }
    let params = scene.canvas().get(id).unwrap().parameters().clone();
    assert_eq!(params.roundness(), 0.499);

    scene.drag_handle(id, HandleKey::Radius, Point::new(0.0, -5.0)).unwrap();
    let roundness = scene.canvas().get(id).unwrap().parameters().roundness();
    assert!((roundness - 0.479).abs() < 1e-12);

    // No vertical movement, no change.
    scene.drag_handle(id, HandleKey::Radius, Point::new(8.0, 0.0)).unwrap();
    let unchanged = scene.canvas().get(id).unwrap().parameters().roundness();
    assert_eq!(unchanged, roundness);
}

#[test]
fn test_depth_handle_drag_is_clamped() {
    let (mut scene, id) = scene();

    scene.drag_handle(id, HandleKey::Depth, Point::new(0.0, 1.0)).unwrap();
    assert_eq!(scene.canvas().get(id).unwrap().parameters().inner_radius(), 76.0);

    for _ in 0..50 {
        scene.drag_handle(id, HandleKey::Depth, Point::new(0.0, 1.0)).unwrap();
    }
    assert_eq!(scene.canvas().get(id).unwrap().parameters().inner_radius(), 3.0);

    for _ in 0..50 {
        scene.drag_handle(id, HandleKey::Depth, Point::new(0.0, -1.0)).unwrap();
    }
    assert_eq!(scene.canvas().get(id).unwrap().parameters().inner_radius(), 120.0);
}

#[test]
fn test_spokes_handle_drag() {
    let (mut scene, id) = scene();
    let spokes = |scene: &SceneController| scene.canvas().get(id).unwrap().parameters().spoke_count();

    scene.drag_handle(id, HandleKey::Spokes, Point::new(0.0, -2.0)).unwrap();
    assert_eq!(spokes(&scene), 9);
    // Above eight spokes small movements count.
    scene.drag_handle(id, HandleKey::Spokes, Point::new(0.0, -0.5)).unwrap();
    assert_eq!(spokes(&scene), 10);
    scene.drag_handle(id, HandleKey::Spokes, Point::new(0.0, 0.5)).unwrap();
    assert_eq!(spokes(&scene), 9);

    for _ in 0..20 {
        scene.drag_handle(id, HandleKey::Spokes, Point::new(0.0, 3.0)).unwrap();
    }
    assert_eq!(spokes(&scene), 3);
}

#[test]
fn test_custom_handles_follow_move_and_scale() {
    let (mut scene, id) = scene();
    let before = position(&scene, id, HandleKey::Depth);
    let origin = scene.canvas().get(id).unwrap().parameters().origin;

    scene.move_object(id, origin.x + 100.0, origin.y - 50.0).unwrap();
    let moved = position(&scene, id, HandleKey::Depth);
    assert!((moved.x - (before.x + 100.0)).abs() < 1e-9);
    assert!((moved.y - (before.y - 50.0)).abs() < 1e-9);

    scene.scale_object(id, 2.0, 2.0).unwrap();
    let scaled = position(&scene, id, HandleKey::Depth);
    let center = Point::new(origin.x + 100.0, origin.y - 50.0);
    let expected = center + (before - origin) * 2.0;
    assert!(scaled.distance_to(&expected) < 1e-9);
}

#[test]
fn test_native_handles_surround_padded_bounds() {
    let (scene, id) = scene();
    let (min_x, min_y, max_x, max_y) = scene.canvas().get(id).unwrap().canvas_bounds();

    let tl = position(&scene, id, HandleKey::Tl);
    let mb = position(&scene, id, HandleKey::Mb);
    assert!((tl.x - (min_x - 10.0)).abs() < 1e-9);
    assert!((tl.y - (min_y - 10.0)).abs() < 1e-9);
    assert!((mb.x - (min_x + max_x) / 2.0).abs() < 1e-9);
    assert!((mb.y - (max_y + 10.0)).abs() < 1e-9);
}

#[test]
fn test_native_handle_drag_scales() {
    let (mut scene, id) = scene();
    let (_, _, max_x, _) = scene.canvas().get(id).unwrap().canvas_bounds();
    let left = scene.canvas().get(id).unwrap().transform().left;
    let half_width = max_x - left;

    scene
        .drag_handle(id, HandleKey::Mr, Point::new(half_width, 0.0))
        .unwrap();

    let transform = scene.canvas().get(id).unwrap().transform();
    assert!((transform.scale_x - 2.0).abs() < 1e-9);
    assert_eq!(transform.scale_y, 1.0);
    // The resize is recorded once the drag ends.
    assert_eq!(scene.history().len(), 1);
    assert_eq!(scene.flush_pending(), 1);
    assert_eq!(scene.history().len(), 2);

    scene.undo().unwrap();
    assert_eq!(scene.canvas().get(id).unwrap().transform().scale_x, 1.0);
}

#[test]
fn test_handle_hit_testing() {
    let (mut scene, id) = scene();

    let radius = position(&scene, id, HandleKey::Radius);
    assert_eq!(scene.handle_at(radius), Some((id, HandleKey::Radius)));

    let spokes = position(&scene, id, HandleKey::Spokes);
    assert_eq!(scene.handle_at(spokes + Point::new(3.0, 3.0)), Some((id, HandleKey::Spokes)));

    let br = position(&scene, id, HandleKey::Br);
    assert_eq!(scene.handle_at(br), Some((id, HandleKey::Br)));

    assert_eq!(scene.handle_at(Point::new(-500.0, -500.0)), None);

    // Handles belong to the selection only.
    scene.select(None).unwrap();
    assert_eq!(scene.handle_at(radius), None);
}
