//! Global constants for se-viewport

/// Camera limits and defaults
pub mod camera {
    /// Smallest orbit distance
    pub const MIN_DISTANCE: f32 = 0.1;
    /// Largest orbit distance
    pub const MAX_DISTANCE: f32 = 10000.0;
    /// Field of view range in degrees
    pub const FOV_RANGE_DEGREES: (f32, f32) = (10.0, 120.0);
    /// Smallest near plane
    pub const MIN_NEAR: f32 = 0.001;
}

/// Gizmo handle dimensions, in gizmo units (one unit is the gizmo size)
pub mod gizmo {
    /// Distance from the center to the tip of a translate arrow
    pub const ARROW_LENGTH: f32 = 1.0;
    /// Length of the arrow tip cone
    pub const ARROW_TIP_LENGTH: f32 = 0.2;
    /// Radius of the arrow tip cone
    pub const ARROW_TIP_RADIUS: f32 = 0.06;
    /// Drawn radius of arrow and scale shafts
    pub const SHAFT_RADIUS: f32 = 0.015;
    /// Pick radius around arrow shafts
    pub const HIT_RADIUS: f32 = 0.08;
    /// Offset of the plane handles from the center along both in-plane axes
    pub const PLANE_OFFSET: f32 = 0.3;
    /// Side length of a plane handle
    pub const PLANE_SIZE: f32 = 0.2;
    /// Radius of the rotate rings
    pub const RING_RADIUS: f32 = 0.8;
    /// Drawn tube radius of the rotate rings
    pub const RING_TUBE_RADIUS: f32 = 0.015;
    /// Pick tolerance around the ring circle
    pub const RING_HIT_THICKNESS: f32 = 0.1;
    /// Distance from the center to a scale cube
    pub const SCALE_AXIS_LENGTH: f32 = 1.2;
    /// Side length of a per-axis scale cube
    pub const SCALE_CUBE_SIZE: f32 = 0.1;
    /// Side length of the uniform scale cube at the center
    pub const SCALE_ALL_SIZE: f32 = 0.2;
    /// Segments used for handle cylinders and cones
    pub const HANDLE_SEGMENTS: u32 = 16;
    /// Smallest pivot-to-anchor distance a scale drag can start from
    pub const MIN_SCALE_DISTANCE: f32 = 1e-4;
}
