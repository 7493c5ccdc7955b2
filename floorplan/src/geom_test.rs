#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn room(left: f64, top: f64, w: f64, h: f64) -> Rect {
    Rect::new(left, top, w, h)
}

// =============================================================
// Rect
// =============================================================

#[test]
fn from_corners_normalizes() {
    let r = Rect::from_corners(pt(50.0, 80.0), pt(10.0, 20.0));
    assert_eq!(r, Rect::new(10.0, 20.0, 40.0, 60.0));
}

#[test]
fn right_bottom_center() {
    let r = Rect::new(10.0, 20.0, 40.0, 60.0);
    assert_eq!(r.right(), 50.0);
    assert_eq!(r.bottom(), 80.0);
    assert_eq!(r.center(), pt(30.0, 50.0));
}

#[test]
fn scaled_multiplies_all_fields() {
    assert_eq!(Rect::new(1.0, 2.0, 3.0, 4.0).scaled(2.0), Rect::new(2.0, 4.0, 6.0, 8.0));
}

// =============================================================
// Containment / overlap
// =============================================================

#[test]
fn containment_is_inclusive_on_all_edges() {
    let r = Rect::new(0.0, 0.0, 100.0, 50.0);
    assert!(point_in_rect(pt(0.0, 0.0), &r));
    assert!(point_in_rect(pt(100.0, 50.0), &r));
    assert!(point_in_rect(pt(100.0, 0.0), &r));
    assert!(!point_in_rect(pt(100.01, 25.0), &r));
    assert!(!point_in_rect(pt(50.0, -0.01), &r));
}

#[test]
fn overlap_is_symmetric() {
    let cases = [
        (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(5.0, 5.0, 10.0, 10.0)),
        (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(10.0, 0.0, 10.0, 10.0)),
        (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(30.0, 30.0, 1.0, 1.0)),
        (Rect::new(0.0, 0.0, 100.0, 100.0), Rect::new(10.0, 10.0, 5.0, 5.0)),
    ];
    for (a, b) in cases {
        assert_eq!(rect_overlap(&a, &b), rect_overlap(&b, &a));
    }
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!rect_overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!rect_overlap(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
}

#[test]
fn containment_counts_as_overlap() {
    assert!(rect_overlap(&Rect::new(0.0, 0.0, 100.0, 100.0), &Rect::new(10.0, 10.0, 5.0, 5.0)));
}

#[test]
fn entity_never_overlaps_itself() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!entity_overlap(&3, &r, &3, &r));
    assert!(entity_overlap(&3, &r, &4, &r));
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn unrotated_corners_are_axis_aligned() {
    let c = rotated_corners(pt(50.0, 50.0), 20.0, 10.0, 0.0);
    assert_eq!(c, [pt(30.0, 40.0), pt(70.0, 40.0), pt(70.0, 60.0), pt(30.0, 60.0)]);
}

#[test]
fn rotated_corners_match_direct_trig() {
    let center = pt(100.0, 200.0);
    let (hw, hh) = (30.0, 15.0);
    for deg in [0.0_f64, 30.0, 45.0, 90.0, 135.0, 217.0, 359.0] {
        let theta = deg.to_radians();
        let corners = rotated_corners(center, hw, hh, theta);
        let offsets = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
        for (corner, (dx, dy)) in corners.iter().zip(offsets) {
            assert!(approx_eq(corner.x, center.x + dx * theta.cos() - dy * theta.sin()));
            assert!(approx_eq(corner.y, center.y + dx * theta.sin() + dy * theta.cos()));
        }
    }
}

#[test]
fn quarter_turn_swaps_extent() {
    let c = rotated_corners(pt(0.0, 0.0), 20.0, 10.0, std::f64::consts::FRAC_PI_2);
    // TL (-20,-10) rotates to (10,-20)
    assert!(approx_eq(c[0].x, 10.0));
    assert!(approx_eq(c[0].y, -20.0));
}

#[test]
fn normalize_degrees_folds_into_range() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(450.0), 90.0);
}

#[test]
fn quarter_turn_detection() {
    assert!(is_quarter_turned(90.0));
    assert!(is_quarter_turned(270.0));
    assert!(is_quarter_turned(-90.0));
    assert!(!is_quarter_turned(0.0));
    assert!(!is_quarter_turned(180.0));
    assert!(!is_quarter_turned(45.0));
}

// =============================================================
// Walls
// =============================================================

#[test]
fn room_walls_order_and_extent() {
    let walls = room_walls(7, &room(10.0, 20.0, 100.0, 50.0));
    let sides: Vec<WallSide> = walls.iter().map(|w| w.side).collect();
    assert_eq!(sides, vec![WallSide::Top, WallSide::Bottom, WallSide::Left, WallSide::Right]);
    assert_eq!(walls[1].y1, 70.0);
    assert_eq!(walls[3].x1, 110.0);
    assert!(walls.iter().all(|w| w.room_id == 7));
}

#[test]
fn distance_outside_span_is_infinite() {
    let wall = room_walls(1, &room(0.0, 0.0, 100.0, 100.0))[0];
    let door = Rect::new(200.0, -40.0, 10.0, 90.0);
    assert!(distance_to_wall(&door, &wall).is_infinite());
}

#[test]
fn distance_to_horizontal_wall_uses_mid_height() {
    let wall = room_walls(1, &room(0.0, 0.0, 300.0, 300.0))[0];
    let door = Rect::new(100.0, -40.0, 10.0, 90.0);
    assert!(approx_eq(distance_to_wall(&door, &wall), 5.0));
}

#[test]
fn distance_to_vertical_wall_uses_leading_edge() {
    let wall = room_walls(1, &room(0.0, 0.0, 300.0, 300.0))[2];
    let door = Rect::new(-10.0, 100.0, 10.0, 90.0);
    // leading edge x = -10 + 4/2 = -8
    assert!(approx_eq(distance_to_wall(&door, &wall), 8.0));
}

#[test]
fn nearest_wall_picks_closest_under_threshold() {
    let rooms = vec![(1, room(0.0, 0.0, 300.0, 300.0))];
    let door = Rect::new(100.0, -40.0, 10.0, 90.0);
    let wall = nearest_wall(&door, rooms, 20.0);
    assert_eq!(wall.map(|w| w.side), Some(WallSide::Top));
}

#[test]
fn nearest_wall_none_beyond_threshold() {
    let rooms = vec![(1, room(0.0, 0.0, 300.0, 300.0))];
    let door = Rect::new(150.0, 100.0, 10.0, 90.0);
    assert_eq!(nearest_wall(&door, rooms, 20.0), None);
}

#[test]
fn nearest_wall_threshold_is_strict() {
    let rooms = vec![(1, room(0.0, 0.0, 300.0, 300.0))];
    // mid y = -20 + 45 = 25 -> distance to top wall exactly 25
    let door = Rect::new(100.0, -20.0, 10.0, 90.0);
    assert_eq!(nearest_wall(&door, rooms.clone(), 25.0), None);
    assert!(nearest_wall(&door, rooms, 25.5).is_some());
}

#[test]
fn nearest_wall_across_rooms() {
    let rooms = vec![(1, room(0.0, 0.0, 200.0, 200.0)), (2, room(0.0, 210.0, 200.0, 200.0))];
    // mid y = 207 -> bottom of room 1 at 7, top of room 2 at 3
    let door = Rect::new(50.0, 162.0, 10.0, 90.0);
    let wall = nearest_wall(&door, rooms, 20.0);
    assert_eq!(wall.map(|w| (w.room_id, w.side)), Some((2, WallSide::Top)));
}

// =============================================================
// Door alignment
// =============================================================

#[test]
fn door_snaps_to_top_wall() {
    let r = room(0.0, 0.0, 300.0, 300.0);
    let door = Rect::new(100.0, -40.0, 10.0, 90.0);
    let wall = nearest_wall(&door, vec![(1, r)], 20.0);
    let placed = wall.map(|w| align_door_to_wall(&door, &w));
    assert_eq!(placed, Some(DoorPlacement { left: 100.0, top: -45.0, rotation: 90.0 }));
    // center sits on the wall line
    assert_eq!(-45.0 + 90.0 / 2.0, 0.0);
}

#[test]
fn horizontal_alignment_clamps_inside_span() {
    let wall = room_walls(1, &room(0.0, 0.0, 300.0, 300.0))[0];
    let far_right = Rect::new(310.0, -40.0, 10.0, 90.0);
    assert!(approx_eq(align_door_to_wall(&far_right, &wall).left, 296.0));
    let far_left = Rect::new(-30.0, -40.0, 10.0, 90.0);
    assert!(approx_eq(align_door_to_wall(&far_left, &wall).left, 0.0));
}

#[test]
fn vertical_alignment_centers_on_wall() {
    let wall = room_walls(1, &room(0.0, 0.0, 300.0, 300.0))[3];
    let door = Rect::new(290.0, 120.0, 10.0, 90.0);
    let placed = align_door_to_wall(&door, &wall);
    assert_eq!(placed.rotation, 0.0);
    assert_eq!(placed.left, 295.0);
    assert_eq!(placed.top, 120.0);
}

#[test]
fn vertical_alignment_clamps_top() {
    let wall = room_walls(1, &room(0.0, 0.0, 300.0, 300.0))[2];
    let door = Rect::new(-5.0, 400.0, 10.0, 90.0);
    assert!(approx_eq(align_door_to_wall(&door, &wall).top, 296.0));
}

#[test]
fn wall_ownership_by_edge_and_span() {
    let r = room(0.0, 0.0, 300.0, 300.0);
    let wall = room_walls(1, &r)[0];
    assert!(wall_belongs_to(&wall, &r, pt(150.0, 0.0), 10.0));
    assert!(!wall_belongs_to(&wall, &r, pt(350.0, 0.0), 10.0));
    let other = room(0.0, 50.0, 300.0, 300.0);
    assert!(!wall_belongs_to(&wall, &other, pt(150.0, 0.0), 10.0));
}

// =============================================================
// Door on wall (real cm)
// =============================================================

#[test]
fn upright_door_on_left_wall() {
    let r = room(0.0, 0.0, 400.0, 300.0);
    let door = Rect::new(-5.0, 100.0, 10.0, 90.0);
    assert!(door_on_room_wall(&door, 0.0, &r));
}

#[test]
fn turned_door_on_top_wall() {
    let r = room(0.0, 0.0, 400.0, 300.0);
    let door = Rect::new(100.0, -45.0, 10.0, 90.0);
    assert!(door_on_room_wall(&door, 90.0, &r));
}

#[test]
fn tolerance_is_inclusive() {
    let r = room(0.0, 0.0, 400.0, 300.0);
    // center x = 5 exactly
    let door = Rect::new(0.0, 100.0, 10.0, 90.0);
    assert!(door_on_room_wall(&door, 0.0, &r));
    let door = Rect::new(0.5, 100.0, 10.0, 90.0);
    assert!(!door_on_room_wall(&door, 0.0, &r));
}

#[test]
fn door_in_middle_of_room_is_not_on_wall() {
    let r = room(0.0, 0.0, 400.0, 300.0);
    assert!(!door_on_room_wall(&Rect::new(200.0, 100.0, 10.0, 90.0), 0.0, &r));
}

#[test]
fn door_beyond_wall_span_is_not_on_wall() {
    let r = room(0.0, 0.0, 400.0, 300.0);
    // on the extension of the left wall line, far below the room
    assert!(!door_on_room_wall(&Rect::new(-5.0, 500.0, 10.0, 90.0), 0.0, &r));
}

#[test]
fn drawing_side_detection() {
    let r = room(0.0, 0.0, 400.0, 300.0);
    assert_eq!(door_wall_side(&Rect::new(-5.0, 100.0, 10.0, 90.0), &r), Some(WallSide::Left));
    assert_eq!(door_wall_side(&Rect::new(395.0, 100.0, 10.0, 90.0), &r), Some(WallSide::Right));
    assert_eq!(door_wall_side(&Rect::new(100.0, -45.0, 10.0, 90.0), &r), Some(WallSide::Top));
    assert_eq!(door_wall_side(&Rect::new(100.0, 255.0, 10.0, 90.0), &r), Some(WallSide::Bottom));
    assert_eq!(door_wall_side(&Rect::new(200.0, 100.0, 10.0, 90.0), &r), None);
}
