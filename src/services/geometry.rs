/// Geometric primitives over landmark positions

use crate::models::Landmark;

/// Euclidean distance between two 3D points
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter()
        .zip(&b)
        .map(|(lhs, rhs)| (lhs - rhs).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Angle ABC in degrees, measured at `b`
///
/// Returns 0 when either arm of the angle has zero length.
pub fn joint_angle(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    let ba = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    let bc = [c[0] - b[0], c[1] - b[1], c[2] - b[2]];

    let norm_ba = distance(a, b);
    let norm_bc = distance(c, b);

    if norm_ba == 0.0 || norm_bc == 0.0 {
        return 0.0;
    }

    let dot_product: f64 = ba.iter().zip(&bc).map(|(lhs, rhs)| lhs * rhs).sum();
    let cos_angle = dot_product / (norm_ba * norm_bc);
    cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle at landmark `b` formed with `a` and `c`, in degrees
///
/// Uses depth when all three landmarks report it, the image plane otherwise.
pub fn landmark_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    match (a.position(), b.position(), c.position()) {
        (Some(a), Some(b), Some(c)) => joint_angle(a, b, c),
        _ => joint_angle(a.planar_position(), b.planar_position(), c.planar_position()),
    }
}

/// Midpoint of two optional values; missing when either is
pub fn midpoint(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some((a? + b?) / 2.0)
}
