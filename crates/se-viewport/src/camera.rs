//! Orbit camera for the 3D viewport

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::constants::camera::{FOV_RANGE_DEGREES, MAX_DISTANCE, MIN_DISTANCE, MIN_NEAR};

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Projection times view
    pub view_proj: [[f32; 4]; 4],
    /// World to camera
    pub view: [[f32; 4]; 4],
    /// Camera to clip
    pub proj: [[f32; 4]; 4],
    /// Eye position, w = 1
    pub eye: [f32; 4],
}

/// Projection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Perspective with a vertical field of view
    #[default]
    Perspective,
    /// Parallel projection sized to match the perspective view at the target
    Orthographic,
}

/// Orbit camera.
///
/// The eye circles `target` at `distance`. Yaw turns about world Y, pitch
/// tilts up from the horizon; both are kept in degrees within `[0, 360)`. At
/// yaw = pitch = 0 the eye sits on +Z looking down -Z with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Orbit center
    pub target: Vec3,
    /// Eye distance from the target
    pub distance: f32,
    yaw: f32,
    pitch: f32,
    /// Active projection
    pub projection: Projection,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Pan distance per pointer unit, relative to the orbit distance
    pub pan_sensitivity: f32,
    /// Degrees per pointer unit
    pub rotate_sensitivity: f32,
    /// Zoom factor per wheel step
    pub zoom_sensitivity: f32,
}

impl Camera {
    /// Create a camera with default parameters
    pub fn new(aspect: f32) -> Self {
        Self::from_config(&CameraConfig::default(), aspect)
    }

    /// Create a camera from configuration
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: config.distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            yaw: wrap_degrees(config.yaw_degrees),
            pitch: wrap_degrees(config.pitch_degrees),
            projection: config.projection,
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near_plane,
            far: config.far_plane,
            pan_sensitivity: config.pan_sensitivity,
            rotate_sensitivity: config.rotate_sensitivity,
            zoom_sensitivity: config.zoom_sensitivity,
        }
    }

    /// Yaw in degrees, `[0, 360)`
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, `[0, 360)`
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set yaw and pitch in degrees (wrapped)
    pub fn set_angles(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        self.yaw = wrap_degrees(yaw_degrees);
        self.pitch = wrap_degrees(pitch_degrees);
    }

    /// Update aspect ratio
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Switch between perspective and orthographic
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Set field of view in degrees
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        let (min, max) = FOV_RANGE_DEGREES;
        self.fov = fov_degrees.clamp(min, max).to_radians();
    }

    /// Field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Set near clipping plane
    pub fn set_near(&mut self, near: f32) {
        self.near = near.max(MIN_NEAR);
    }

    /// Set far clipping plane
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near + 1.0);
    }

    /// Camera orientation: yaw about Y, then pitch about the camera's X
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians()) * Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        self.target + self.orientation() * Vec3::Z * self.distance
    }

    /// Viewing direction
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Screen-right direction
    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    /// Screen-up direction
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    /// Orbit by pointer deltas.
    ///
    /// While the camera is upside down (pitch in `(90, 270)`) the yaw delta is
    /// reversed so horizontal drags keep turning the scene the way the
    /// pointer moves.
    pub fn change_rotation(&mut self, delta_x: f32, delta_y: f32) {
        let yaw_delta = delta_x * self.rotate_sensitivity;
        let pitch_delta = delta_y * self.rotate_sensitivity;

        let inverted = self.pitch > 90.0 && self.pitch < 270.0;
        let yaw_delta = if inverted { -yaw_delta } else { yaw_delta };

        self.yaw = wrap_degrees(self.yaw + yaw_delta);
        self.pitch = wrap_degrees(self.pitch + pitch_delta);
    }

    /// Pan the camera (move target) in the view plane
    pub fn change_position(&mut self, delta_x: f32, delta_y: f32) {
        let scale = self.distance * self.pan_sensitivity;
        self.target += self.right() * (-delta_x * scale) + self.up() * (delta_y * scale);
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance =
            (self.distance * (1.0 - delta * self.zoom_sensitivity)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Fit camera to show the given bounding sphere
    pub fn fit_all(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        self.distance = (radius * 2.5).clamp(1.0, MAX_DISTANCE);
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position()).inverse()
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective => Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far),
            Projection::Orthographic => {
                let half_height = self.distance * (self.fov * 0.5).tan();
                let half_width = half_height * self.aspect;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Get camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        let view_proj = proj * view;
        let eye = self.position();

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        }
    }

    /// Convert a normalized device coordinate to a world ray.
    ///
    /// Returns `(origin, direction)` with a unit direction. The origin is the
    /// eye for perspective and the matching point on the eye plane for
    /// orthographic, so `t` along the ray is the distance from the eye plane.
    pub fn screen_to_ray(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv_view_proj = (self.projection_matrix() * self.view_matrix()).inverse();

        // Depth range is [0, 1]
        let near_world = inv_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far_world = inv_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        let direction = (far_world - near_world).normalize();

        let origin = match self.projection {
            Projection::Perspective => self.position(),
            Projection::Orthographic => near_world - self.forward() * self.near,
        };
        (origin, direction)
    }

    /// Convert pixel coordinates (origin top-left) to a world ray
    pub fn screen_to_ray_px(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);
        self.screen_to_ray(ndc_x, ndc_y)
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use se_core::primitive::generate_box_mesh;
    use se_core::{Drawable, Geometry, PipelineHandle};

    use super::*;

    fn front_camera() -> Camera {
        let mut camera = Camera::new(1.0);
        camera.set_angles(0.0, 0.0);
        camera.distance = 5.0;
        camera
    }

    #[test]
    fn test_front_camera_looks_down_neg_z() {
        let camera = front_camera();
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        let target_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(target_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-5));
    }

    #[test]
    fn test_center_ray_hits_unit_cube_at_distance_minus_half() {
        let camera = front_camera();
        let (origin, dir) = camera.screen_to_ray(0.0, 0.0);
        assert!(dir.abs_diff_eq(Vec3::NEG_Z, 1e-5), "{dir:?}");
        assert_abs_diff_eq!(dir.length(), 1.0, epsilon = 1e-6);

        let mut cube = Drawable::new(
            "cube",
            Geometry::from_primitive(generate_box_mesh([1.0, 1.0, 1.0])),
            PipelineHandle::DEFAULT,
        );
        cube.node.compute_transform(None, true);
        let hit = cube.hit_test(origin, dir).unwrap();
        assert_abs_diff_eq!(hit.t, camera.distance - 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_off_center_ray_points_right() {
        let camera = front_camera();
        let (_, dir) = camera.screen_to_ray(0.5, 0.0);
        assert!(dir.x > 0.0 && dir.z < 0.0);
        assert_abs_diff_eq!(dir.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let mut camera = front_camera();
        camera.set_projection(Projection::Orthographic);
        let (o1, d1) = camera.screen_to_ray(0.0, 0.0);
        let (o2, d2) = camera.screen_to_ray(0.5, -0.5);
        assert!(d1.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(d2.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        // Both origins on the eye plane z = 5
        assert_abs_diff_eq!(o1.z, 5.0, epsilon = 1e-3);
        assert_abs_diff_eq!(o2.z, 5.0, epsilon = 1e-3);
        assert!(o2.x > o1.x && o2.y < o1.y);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut camera = front_camera();
        camera.rotate_sensitivity = 1.0;
        camera.set_angles(350.0, 0.0);
        camera.change_rotation(20.0, 0.0);
        assert_abs_diff_eq!(camera.yaw(), 10.0, epsilon = 1e-4);
        camera.change_rotation(0.0, -30.0);
        assert_abs_diff_eq!(camera.pitch(), 330.0, epsilon = 1e-4);
    }

    #[test]
    fn test_yaw_delta_flips_when_upside_down() {
        let mut camera = front_camera();
        camera.rotate_sensitivity = 1.0;

        camera.set_angles(100.0, 45.0);
        camera.change_rotation(10.0, 0.0);
        assert_abs_diff_eq!(camera.yaw(), 110.0, epsilon = 1e-4);

        camera.set_angles(100.0, 180.0);
        camera.change_rotation(10.0, 0.0);
        assert_abs_diff_eq!(camera.yaw(), 90.0, epsilon = 1e-4);

        // Boundaries are not inverted
        camera.set_angles(100.0, 270.0);
        camera.change_rotation(10.0, 0.0);
        assert_abs_diff_eq!(camera.yaw(), 110.0, epsilon = 1e-4);
    }

    #[test]
    fn test_positive_pitch_raises_eye() {
        let mut camera = front_camera();
        camera.set_angles(0.0, 30.0);
        assert!(camera.position().y > 0.0);
        assert!(camera.forward().y < 0.0);
    }

    #[test]
    fn test_pan_moves_target_in_view_plane() {
        let mut camera = front_camera();
        camera.change_position(-100.0, 0.0);
        assert!(camera.target.x > 0.0);
        assert_abs_diff_eq!(camera.target.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = front_camera();
        camera.zoom(100.0);
        assert_eq!(camera.distance, MIN_DISTANCE);
    }

    #[test]
    fn test_wrap_degrees_stays_in_range() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert!(wrap_degrees(-1e-9) < 360.0);
    }
}
