//! OBB/OBB narrow phase.
//!
//! Separating-axis test over the four face normals of the two rectangles.
//! Bodies here are rotation-locked tags and axis-aligned walls, so four axes
//! cover every case this engine needs.

use crate::core::vec2::Vec2;

use super::body::RigidBody;

/// A single contact between two bodies, indices into the world's body vec.
/// `normal` points from `a` toward `b`.
pub struct Contact {
    pub a: usize,
    pub b: usize,
    pub normal: Vec2,
    pub depth: f32,
    pub point: Vec2,
}

/// Projected radius of a rectangle onto a unit axis
#[inline]
fn projected_radius(body: &RigidBody, axis: Vec2) -> f32 {
    let (ux, uy) = body.axes();
    body.half_width * ux.dot(axis).abs() + body.half_height * uy.dot(axis).abs()
}

/// SAT test between two oriented rectangles.
///
/// Returns the contact with the minimum-overlap axis as its normal, or `None`
/// if any axis separates the pair.
pub fn collide(a: &RigidBody, b: &RigidBody, ia: usize, ib: usize) -> Option<Contact> {
    let d = b.pos - a.pos;

    let (ax1, ax2) = a.axes();
    let (bx1, bx2) = b.axes();
    let axes = [ax1, ax2, bx1, bx2];

    let mut min_overlap = f32::MAX;
    let mut min_axis = Vec2::zero();

    for axis in axes {
        let overlap = projected_radius(a, axis) + projected_radius(b, axis) - d.dot(axis).abs();
        if overlap <= 0.0 {
            return None;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = axis;
        }
    }

    // Orient the normal from a to b
    let normal = if d.dot(min_axis) < 0.0 { -min_axis } else { min_axis };

    Some(Contact {
        a: ia,
        b: ib,
        normal,
        depth: min_overlap,
        // Midpoint of the two facing support points. Rotation-locked tags
        // and static walls have infinite inertia, so the torque arm this
        // approximates is only felt by free-rotating bodies.
        point: (support_point(a, normal) + support_point(b, -normal)) * 0.5,
    })
}

/// Corner of `body` furthest along `dir`
fn support_point(body: &RigidBody, dir: Vec2) -> Vec2 {
    let mut best = body.pos;
    let mut best_d = f32::MIN;
    for corner in body.corners() {
        let d = corner.dot(dir);
        if d > best_d {
            best_d = d;
            best = corner;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::physics::body::BodySpec;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> RigidBody {
        let spec = BodySpec { width: w, height: h, x, y, ..Default::default() };
        RigidBody::from_spec(&spec, 0).unwrap()
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 0.0, 10.0, 10.0);
        assert!(collide(&a, &b, 0, 1).is_none());
    }

    #[test]
    fn overlapping_boxes_report_depth_and_normal() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(8.0, 0.0, 10.0, 10.0);
        let contact = collide(&a, &b, 0, 1).expect("boxes overlap by 2px");
        assert!((contact.depth - 2.0).abs() < 1e-4);
        // Normal points from a toward b, along +x
        assert!(contact.normal.x > 0.99);
        assert!(contact.normal.y.abs() < 1e-4);
    }

    #[test]
    fn vertical_stack_normal_points_down_the_overlap_axis() {
        let a = rect(0.0, 0.0, 40.0, 10.0);
        let b = rect(2.0, 9.0, 40.0, 10.0);
        let contact = collide(&a, &b, 0, 1).expect("stacked boxes overlap");
        assert!(contact.normal.y > 0.99);
        assert!((contact.depth - 1.0).abs() < 1e-4);
    }

    #[test]
    fn touching_edges_are_not_a_contact() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);
        assert!(collide(&a, &b, 0, 1).is_none());
    }
}
