/// Fibonacci-lattice point distribution on a sphere.
///
/// Points are evenly spread in `y` and rotated by the golden angle, which
/// gives a near-uniform covering without clustering at the poles.

/// Golden angle in radians: π (3 − √5).
pub fn golden_angle() -> f32 {
    std::f32::consts::PI * (3.0 - 5.0_f32.sqrt())
}

/// Generate exactly `count` points on a sphere of `radius` around the origin.
///
/// Deterministic: the same inputs always yield the same points.
pub fn sphere_points(count: usize, radius: f32) -> Vec<[f32; 3]> {
    if count == 0 {
        return Vec::new();
    }

    let offset = 2.0 / count as f32;
    let inc = golden_angle();

    (0..count)
        .map(|i| {
            let y = i as f32 * offset - 1.0 + offset / 2.0;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let phi = i as f32 * inc;
            [phi.cos() * r * radius, y * radius, phi.sin() * r * radius]
        })
        .collect()
}
