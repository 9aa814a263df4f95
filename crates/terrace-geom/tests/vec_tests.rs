use terrace_geom::{IVec2, IVec3, Vec3};

#[test]
fn ivec3_arithmetic() {
    let a = IVec3::new(1, -2, 3);
    let b = IVec3::new(10, 20, 30);
    assert_eq!(a + b, IVec3::new(11, 18, 33));
    assert_eq!(b - a, IVec3::new(9, 22, 27));
    assert_eq!(-a, IVec3::new(-1, 2, -3));
    assert_eq!(a * 2, IVec3::new(2, -4, 6));
    assert_eq!(a.scale(b), IVec3::new(10, -40, 90));
    assert_eq!(a.with_y(7), IVec3::new(1, 7, 3));
    assert_eq!(a.xz(), IVec2::new(1, 3));
}

#[test]
fn ivec2_distance_is_planar() {
    let a = IVec2::new(0, 0);
    let b = IVec2::new(30, 40);
    assert!((a.distance(b) - 50.0).abs() < 1e-4);
    assert_eq!(a.distance(a), 0.0);
}

#[test]
fn vec3_rounding_helpers() {
    let v = Vec3::new(1.2, -0.5, 2.5);
    assert_eq!(v.ceil(), IVec3::new(2, 0, 3));
    assert_eq!(v.round(), IVec3::new(1, -1, 3));
    assert_eq!(Vec3::from_array(v.to_array()), v);
}

#[test]
fn vec3_distance() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, 6.0, 3.0);
    assert!((a.distance(b) - 5.0).abs() < 1e-5);
    assert!(((b - a) / 5.0).length() - 1.0 < 1e-5);
}
