//! Closest-point collision queries against rigid triangle geometry.

use glam::Vec3;

use crate::cloth::Cloth;
use crate::config::SimConfig;
use crate::constraint::CollisionConstraint;
use crate::rigid::RigidBody;

const DEGENERATE_EPS: f32 = 1e-10;

/// Closest point on triangle (a, b, c) to the query point `p`.
///
/// Projects `p` onto the triangle's plane and tests the barycentric
/// coordinates of the projection; an interior projection is returned
/// directly. Otherwise the closest point lies on the boundary: each edge's
/// closest point is found by clamping the edge-parametric projection to
/// [0, 1] (which degenerates to a vertex at 0 or 1), and the nearest of the
/// three wins.
///
/// Returns `None` for degenerate (near-zero-area) triangles so callers treat
/// them as "no collision" instead of propagating NaN.
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d00 = ab.dot(ab);
    let d01 = ab.dot(ac);
    let d11 = ac.dot(ac);
    let d20 = ap.dot(ab);
    let d21 = ap.dot(ac);

    let denom = d00 * d11 - d01 * d01;
    if libm::fabsf(denom) < DEGENERATE_EPS {
        return None;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    if v >= 0.0 && w >= 0.0 && v + w <= 1.0 {
        // projection lies inside the triangle
        return Some(a + ab * v + ac * w);
    }

    let candidates = [
        closest_point_on_segment(p, a, b),
        closest_point_on_segment(p, b, c),
        closest_point_on_segment(p, c, a),
    ];
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if p.distance_squared(candidate) < p.distance_squared(best) {
            best = candidate;
        }
    }
    Some(best)
}

/// Closest point on segment [start, end] to `p`, clamping the parametric
/// projection to the segment.
fn closest_point_on_segment(p: Vec3, start: Vec3, end: Vec3) -> Vec3 {
    let edge = end - start;
    let length_sq = edge.dot(edge);
    if length_sq < DEGENERATE_EPS {
        return start;
    }
    let t = ((p - start).dot(edge) / length_sq).clamp(0.0, 1.0);
    start + edge * t
}

/// Fill the cloth's per-vertex collision slots from its predicted positions.
///
/// Every slot is rewritten each frame. A vertex whose predicted position
/// comes within `config.collision_threshold` of a rigid triangle receives a
/// push-out target: the closest surface point offset by
/// `config.collision_margin` along the triangle's winding normal. Keying the
/// direction to the winding (counter-clockwise faces point outward) keeps
/// the target on the outside even for a vertex that has already crossed the
/// surface, so penetrating vertices are pulled back rather than pushed
/// deeper. When several triangles or bodies are in range, the nearest
/// contact wins.
///
/// Returns the number of active slots produced.
pub(crate) fn generate_collisions(
    cloth: &mut Cloth,
    rigids: &[RigidBody],
    config: &SimConfig,
) -> usize {
    let mut active = 0;
    let response = cloth.params().collision_response;

    for vertex in 0..cloth.vertex_count() {
        let predicted = cloth.predicted.write()[vertex];

        let mut best: Option<(f32, Vec3)> = None;
        for rigid in rigids {
            let positions = rigid.positions();
            for tri in rigid.triangles() {
                let (a, b, c) = (positions[tri[0]], positions[tri[1]], positions[tri[2]]);
                let Some(closest) = closest_point_on_triangle(predicted, a, b, c) else {
                    continue;
                };
                let distance = predicted.distance(closest);
                if distance >= config.collision_threshold {
                    continue;
                }
                if best.is_some_and(|(nearest, _)| distance >= nearest) {
                    continue;
                }
                let normal = (b - a).cross(c - a).normalize();
                best = Some((distance, closest + normal * config.collision_margin));
            }
        }

        cloth.collisions[vertex] = match best {
            Some((_, target)) => {
                active += 1;
                CollisionConstraint { target, response, active: true }
            }
            None => CollisionConstraint::INACTIVE,
        };
    }

    active
}
