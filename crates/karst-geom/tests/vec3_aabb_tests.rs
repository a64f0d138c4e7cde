use karst_geom::{Aabb, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn constants_and_splat() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::DOWN, -Vec3::UP, 1e-6));
    assert!(vec3_approx_eq(Vec3::splat(2.5), Vec3::new(2.5, 2.5, 2.5), 1e-6));
}

#[test]
fn operators() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    assert!(vec3_approx_eq(a + b, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq((a + b) - a, b, 1e-6));
    assert!(vec3_approx_eq(a * 2.0, Vec3::new(2.0, 4.0, 6.0), 1e-6));
    assert!(vec3_approx_eq(a * 2.0 / 2.0, a, 1e-6));

    let mut v = Vec3::splat(1.0);
    v += Vec3::new(2.0, 3.0, 4.0);
    assert!(vec3_approx_eq(v, Vec3::new(3.0, 4.0, 5.0), 1e-6));
    v -= Vec3::new(1.0, 2.0, 3.0);
    assert!(vec3_approx_eq(v, Vec3::splat(2.0), 1e-6));
}

#[test]
fn dot_length_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.dot(v), 25.0, 1e-6));
    assert!(approx_eq(v.length_sq(), 25.0, 1e-6));
    assert!(approx_eq(v.length(), 5.0, 1e-6));
    assert!(vec3_approx_eq(v.normalized(), Vec3::new(0.6, 0.8, 0.0), 1e-6));

    // Zero vector normalization stays zero, never NaN.
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-6));
}

#[test]
fn cross_follows_right_hand_rule() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-6));
}

#[test]
fn flat_normalized_zeroes_vertical_component() {
    let v = Vec3::new(3.0, 10.0, 4.0);
    let f = v.flat_normalized();
    assert!(approx_eq(f.y, 0.0, 1e-6));
    assert!(approx_eq(f.length(), 1.0, 1e-6));
    assert!(vec3_approx_eq(f, Vec3::new(0.6, 0.0, 0.8), 1e-6));

    // A straight-down look direction has no usable horizontal component.
    assert!(vec3_approx_eq(Vec3::DOWN.flat_normalized(), Vec3::ZERO, 1e-6));
}

#[test]
fn aabb_offset_translates_both_corners() {
    let bb = Aabb::new(Vec3::ZERO, Vec3::splat(16.0));
    let moved = bb.offset(Vec3::new(16.0, 0.0, -32.0));
    assert!(vec3_approx_eq(moved.min, Vec3::new(16.0, 0.0, -32.0), 1e-6));
    assert!(vec3_approx_eq(moved.max, Vec3::new(32.0, 16.0, -16.0), 1e-6));
}
