//! Euler angle conversion
//!
//! Euler angles are only ever a derived view of a quaternion. The order is
//! fixed crate-wide by [`EULER_ORDER`].

use glam::{Mat3, Quat, Vec3};

/// Composition order of elemental rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerOrder {
    /// Intrinsic X, then Y, then Z: `R = Rx * Ry * Rz`
    IntrinsicXyz,
}

/// The rotation order used by every Euler conversion in the editor
pub const EULER_ORDER: EulerOrder = EulerOrder::IntrinsicXyz;

/// Sine of the pitch beyond which the decomposition is treated as gimbal-locked
const GIMBAL_LOCK_THRESHOLD: f32 = 0.999_999;

/// Build a unit quaternion from Euler angles in degrees.
pub fn quat_from_euler_degrees(x: f32, y: f32, z: f32) -> Quat {
    match EULER_ORDER {
        EulerOrder::IntrinsicXyz => (Quat::from_rotation_x(x.to_radians())
            * Quat::from_rotation_y(y.to_radians())
            * Quat::from_rotation_z(z.to_radians()))
        .normalize(),
    }
}

/// Decompose a quaternion into Euler angles in degrees, each in `(-180, 180]`.
///
/// At the gimbal-lock singularity (`|y| = 90°`) only the sum of the X and Z
/// angles is defined; Z is reported as zero and X carries the remainder.
pub fn euler_degrees_from_quat(rotation: Quat) -> Vec3 {
    let m = Mat3::from_quat(rotation.normalize());
    // Row/column naming: rRC = m.col(C)[R]
    let r02 = m.z_axis.x;

    match EULER_ORDER {
        EulerOrder::IntrinsicXyz => {
            let (x, y, z) = if r02.abs() < GIMBAL_LOCK_THRESHOLD {
                let y = r02.clamp(-1.0, 1.0).asin();
                let x = (-m.z_axis.y).atan2(m.z_axis.z);
                let z = (-m.y_axis.x).atan2(m.x_axis.x);
                (x, y, z)
            } else {
                let y = std::f32::consts::FRAC_PI_2.copysign(r02);
                let x = m.y_axis.z.atan2(m.y_axis.y);
                (x, y, 0.0)
            };
            Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
        }
    }
}
