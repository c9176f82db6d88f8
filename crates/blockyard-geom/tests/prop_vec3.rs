use blockyard_geom::{Euler, Vec3, frame_factor, lerp_angle, wrap_angle};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e3)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_angle() -> impl Strategy<Value = f32> {
    -10.0f32..10.0f32
}

proptest! {
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-4));
    }

    #[test]
    fn vec3_neg_is_additive_inverse(a in arb_vec3()) {
        prop_assert!(vapprox(a + (-a), Vec3::ZERO, 1e-4));
    }

    // Lerp endpoints: t=0 gives the start, t=1 gives the target
    #[test]
    fn vec3_lerp_endpoints(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a.lerp(b, 0.0), a, 1e-4));
        prop_assert!(vapprox(a.lerp(b, 1.0), b, 1e-2));
    }

    // Rotation preserves length
    #[test]
    fn euler_rotate_preserves_length(v in arb_vec3(), pitch in arb_angle(), yaw in arb_angle()) {
        let r = Euler::new(pitch, yaw).rotate(v);
        let scale = v.length().max(1.0);
        prop_assert!(approx(r.length(), v.length(), 1e-4 * scale));
    }

    // Forward is always a unit vector
    #[test]
    fn euler_forward_is_unit(pitch in arb_angle(), yaw in arb_angle()) {
        prop_assert!(approx(Euler::new(pitch, yaw).forward().length(), 1.0, 1e-4));
    }

    // Pure yaw never introduces a vertical component
    #[test]
    fn euler_yaw_keeps_plane(x in bounded_f32(), z in bounded_f32(), yaw in arb_angle()) {
        let r = Euler::new(0.0, yaw).rotate(Vec3::new(x, 0.0, z));
        prop_assert!(approx(r.y, 0.0, 1e-6));
    }

    #[test]
    fn wrap_angle_in_range(a in -100.0f32..100.0f32) {
        let w = wrap_angle(a);
        prop_assert!(w > -core::f32::consts::PI - 1e-5 && w <= core::f32::consts::PI + 1e-5);
    }

    // Shortest-arc lerp never moves more than half a turn
    #[test]
    fn lerp_angle_takes_short_arc(from in arb_angle(), to in arb_angle()) {
        let step = lerp_angle(from, to, 1.0) - from;
        prop_assert!(step.abs() <= core::f32::consts::PI + 1e-4);
    }

    #[test]
    fn frame_factor_in_unit_range(f in 0.0f32..=1.0f32, dt in 0.0f32..0.5f32) {
        let k = frame_factor(f, dt);
        prop_assert!((0.0..=1.0).contains(&k));
    }
}
