use karst_geom::Vec3;
use proptest::prelude::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    -1.0e4f32..1.0e4f32
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn add_commutes(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-3));
    }

    #[test]
    fn neg_is_additive_inverse(a in arb_vec3()) {
        prop_assert!(vapprox(a + (-a), Vec3::ZERO, 1e-3));
    }

    #[test]
    fn cross_is_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        let scale = a.length() * b.length();
        prop_assert!(approx(a.dot(c), 0.0, 1e-2 * scale.max(1.0)));
        prop_assert!(approx(b.dot(c), 0.0, 1e-2 * scale.max(1.0)));
    }

    #[test]
    fn normalized_has_unit_length_or_is_zero(a in arb_vec3()) {
        let n = a.normalized();
        if a.length() > 0.0 {
            prop_assert!(approx(n.length(), 1.0, 1e-3));
        } else {
            prop_assert!(vapprox(n, Vec3::ZERO, 1e-6));
        }
    }

    #[test]
    fn flat_normalized_has_zero_y(a in arb_vec3()) {
        prop_assert!(approx(a.flat_normalized().y, 0.0, 1e-6));
    }
}
