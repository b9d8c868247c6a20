use approx::assert_relative_eq;
use ifczone_core::traits::Validate;
use ifczone_core::{EntityRef, Settings};
use ifczone_geometry::OrientedBoundingBox;
use ifczone_math::{CoordinateSystem, DVec3, Point, Sign, Vector};

fn slab(origin: [f64; 3], size: [f64; 3]) -> Vec<[f64; 3]> {
    Sign::ALL
        .iter()
        .map(|s| {
            [
                origin[0] + if s.x { size[0] } else { 0.0 },
                origin[1] + if s.y { size[1] } else { 0.0 },
                origin[2] + if s.z { size[2] } else { 0.0 },
            ]
        })
        .collect()
}

fn rotate_z(points: &[[f64; 3]], angle: f64) -> Vec<[f64; 3]> {
    let (s, c) = angle.sin_cos();
    points
        .iter()
        .map(|p| [c * p[0] - s * p[1], s * p[0] + c * p[1], p[2]])
        .collect()
}

fn obb(origin: [f64; 3], size: [f64; 3]) -> OrientedBoundingBox {
    OrientedBoundingBox::from_vertices(&slab(origin, size)).unwrap()
}

fn assert_vector_eq(a: Vector, b: Vector) {
    assert_relative_eq!(a.x(), b.x(), epsilon = 1e-6);
    assert_relative_eq!(a.y(), b.y(), epsilon = 1e-6);
    assert_relative_eq!(a.z(), b.z(), epsilon = 1e-6);
}

#[test]
fn test_axis_aligned_box_faces() {
    let b = obb([0.0, 0.0, 0.0], [10.0, 0.5, 2.0]);
    b.validate().unwrap();
    let mut seen = Vec::new();
    for face in b.faces.iter() {
        let n = face.normal;
        let axis = n.normal_index();
        assert_relative_eq!(n.get(axis).abs(), 1.0);
        assert_relative_eq!(n.length(), 1.0);
        let key = (axis, n.get(axis) > 0.0);
        assert!(!seen.contains(&key), "duplicate face {:?}", key);
        seen.push(key);
    }
    assert_eq!(seen.len(), 6);
}

#[test]
fn test_projection_round_trip_in_tilted_frame() {
    let b = OrientedBoundingBox::from_vertices(&rotate_z(&slab([1.0, 2.0, 0.0], [4.0, 1.0, 3.0]), 0.3))
        .unwrap();
    let frame = CoordinateSystem::from_axes(DVec3::new(1.0, 1.0, 0.2), DVec3::new(-1.0, 1.0, 0.0)).unwrap();
    for face in b.faces.iter() {
        for p in face.vertices.points() {
            let back = frame.inverse(&frame.project(p));
            assert_relative_eq!(back.x(), p.x(), epsilon = 1e-8);
            assert_relative_eq!(back.y(), p.y(), epsilon = 1e-8);
            assert_relative_eq!(back.z(), p.z(), epsilon = 1e-8);
        }
    }
}

#[test]
fn test_slabs_shifted_along_length_share_end_face() {
    let a = obb([0.0, 0.0, 0.0], [10.0, 0.5, 2.0]);
    let b = obb([1.0, 0.0, 0.0], [10.0, 0.5, 2.0]);
    let surface = a.intersect_faces(&b).unwrap();
    assert_relative_eq!(surface.area, 1.0, epsilon = 1e-9);
    assert_vector_eq(surface.orientation, Vector::X);
    assert!(surface.exterior);
    assert_eq!(surface.vertices.len(), 4);
    for v in &surface.vertices {
        assert_relative_eq!(v.x(), 10.0, epsilon = 1e-9);
    }
}

#[test]
fn test_adjacency_is_symmetric() {
    let a = obb([0.0, 0.0, 0.0], [10.0, 0.5, 2.0]);
    let b = obb([1.0, 0.0, 0.0], [10.0, 0.5, 2.0]);
    let ab = a.intersect_faces(&b).unwrap();
    let ba = b.intersect_faces(&a).unwrap();
    assert_relative_eq!(ab.area, ba.area, epsilon = 1e-9);
    assert_vector_eq(ab.orientation, -ba.orientation);
}

#[test]
fn test_distant_slabs_do_not_touch() {
    let a = obb([0.0, 0.0, 0.0], [10.0, 0.5, 2.0]);
    for origin in [
        [20.0, 0.0, 0.0],
        [-20.0, 0.0, 0.0],
        [0.0, 20.0, 0.0],
        [0.0, -20.0, 0.0],
        [11.0, 1.0, 3.0],
    ] {
        let b = obb(origin, [10.0, 0.5, 2.0]);
        assert!(a.intersect_faces(&b).is_none(), "unexpected contact with {:?}", origin);
        assert!(b.intersect_faces(&a).is_none());
    }
}

#[test]
fn test_gap_beyond_contact_tolerance() {
    let room = obb([0.0, 0.0, 0.0], [5.0, 4.0, 3.0]);
    let near = obb([5.03, 0.0, 0.0], [0.2, 4.0, 3.0]);
    let far = obb([5.2, 0.0, 0.0], [0.2, 4.0, 3.0]);
    let surface = room.intersect_faces(&near).unwrap();
    assert_relative_eq!(surface.area, 12.0, epsilon = 1e-9);
    assert_vector_eq(surface.orientation, Vector::X);
    assert!(room.intersect_faces(&far).is_none());

    let loose = Settings::default().with_contact_tolerance(0.5);
    assert!(room.intersect_faces_with(&far, &loose).is_some());
}

#[test]
fn test_rotated_slabs_face_to_face() {
    let angle = std::f64::consts::FRAC_PI_4;
    let a = OrientedBoundingBox::from_vertices(&rotate_z(&slab([0.0, 0.0, 0.0], [10.0, 0.5, 2.0]), angle))
        .unwrap();
    let b = OrientedBoundingBox::from_vertices(&rotate_z(&slab([0.0, 0.5, 0.0], [10.0, 0.5, 2.0]), angle))
        .unwrap();
    let surface = a.intersect_faces(&b).unwrap();
    assert!(surface.area.is_finite());
    assert_relative_eq!(surface.area, 20.0, epsilon = 1e-6);
    let (s, c) = angle.sin_cos();
    assert_vector_eq(surface.orientation, Vector::new(-s, c, 0.0));

    let reverse = b.intersect_faces(&a).unwrap();
    assert_relative_eq!(reverse.area, surface.area, epsilon = 1e-6);
    assert_vector_eq(reverse.orientation, -surface.orientation);
}

#[test]
fn test_from_vertices_is_idempotent() {
    let cloud = rotate_z(&slab([2.0, -1.0, 0.5], [3.0, 7.0, 2.5]), 0.7);
    let first = OrientedBoundingBox::from_vertices(&cloud).unwrap();
    let second = OrientedBoundingBox::from_vertices(&cloud).unwrap();
    assert_eq!(first.faces.description(), second.faces.description());
    assert_eq!(first.centroid, second.centroid);
    assert_eq!(first.volume.to_bits(), second.volume.to_bits());
    assert_eq!(first.height.to_bits(), second.height.to_bits());
}

#[test]
fn test_window_inside_space_face_is_accepted() {
    let space = obb([0.0, 0.2, 0.0], [5.0, 3.8, 3.0]);
    let window = obb([2.0, 0.0, 1.0], [0.05, 0.2, 0.05]);
    let surface = space.intersect_faces(&window).unwrap();
    assert!(surface.area < Settings::default().area_tolerance);
    assert_relative_eq!(surface.area, 0.0025, epsilon = 1e-9);
    assert_vector_eq(surface.orientation, -Vector::Y);
    for v in &surface.vertices {
        assert_relative_eq!(v.y(), 0.2, epsilon = 1e-9);
    }
}

#[test]
fn test_tiny_partial_overlap_is_rejected() {
    let space = obb([0.0, 0.2, 0.0], [5.0, 3.8, 3.0]);
    let straddling = obb([-0.025, 0.0, 1.0], [0.05, 0.2, 0.05]);
    assert!(space.intersect_faces(&straddling).is_none());
}

#[test]
fn test_floor_slab_below_room() {
    let room = obb([0.0, 0.0, 0.0], [5.0, 4.0, 3.0]);
    let floor = obb([0.0, 0.0, -0.3], [5.0, 4.0, 0.3]);
    let surface = room.intersect_faces(&floor).unwrap();
    assert_relative_eq!(surface.area, 20.0, epsilon = 1e-9);
    assert_vector_eq(surface.orientation, -Vector::Z);
    for v in &surface.vertices {
        assert_relative_eq!(v.z(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_entity_boxes_touching() {
    let wall = OrientedBoundingBox::from_entity(
        EntityRef::new("2O2Fr$t4X7Zf8NOew3FLOH", "IfcWallStandardCase"),
        &slab([0.0, -0.2, 0.0], [5.0, 0.2, 3.0]),
        Settings::default(),
    )
    .unwrap();
    let room = OrientedBoundingBox::from_entity(
        EntityRef::new("1hOSvn6df7F8_7GcBWlRGQ", "IfcSpace").with_name("Kitchen"),
        &slab([0.0, 0.0, 0.0], [5.0, 4.0, 3.0]),
        Settings::default(),
    )
    .unwrap();
    let surface = room.intersect_faces(&wall).unwrap();
    assert_relative_eq!(surface.area, 15.0, epsilon = 1e-9);
    assert_vector_eq(surface.orientation, -Vector::Y);
    let (area, orientation) = surface.description();
    assert_eq!(area, 15.0);
    assert_eq!(orientation, [0.0, -1.0, 0.0]);
    assert_eq!(surface.lines().len(), 4);
}

#[test]
fn test_point_helpers_are_rounded() {
    let p = Point::new(0.1 + 0.2, 0.0, -0.0);
    assert_eq!(p, Point::new(0.3, 0.0, 0.0));
}

#[test]
fn test_wall_with_opening_sits_on_slab() {
    let mut wall_cloud = slab([0.0, -0.2, 0.0], [5.0, 0.2, 3.0]);
    wall_cloud.extend(slab([0.5, -0.2, 2.0], [1.0, 0.2, 0.8]));
    let wall = OrientedBoundingBox::from_entity(
        EntityRef::new("2O2Fr$t4X7Zf8NOew3FNld", "IfcWall"),
        &wall_cloud,
        Settings::default(),
    )
    .unwrap();
    let floor = OrientedBoundingBox::from_entity(
        EntityRef::new("3cUkl32yn9qRSPvBJVyWYp", "IfcSlab"),
        &slab([0.0, -0.2, -0.3], [5.0, 0.2, 0.3]),
        Settings::default(),
    )
    .unwrap();
    let surface = wall.intersect_faces(&floor).unwrap();
    assert_relative_eq!(surface.area, 1.0, epsilon = 1e-9);
    assert_vector_eq(surface.orientation, -Vector::Z);
}
