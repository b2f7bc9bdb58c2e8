//! Global constants for se-core

/// Determinant threshold for ray/triangle tests. Anything below it is
/// treated as parallel (or back-facing when culling is enabled).
pub const TRIANGLE_EPSILON: f32 = 1e-6;

/// Threshold on `|dot(ray_dir, normal)|` below which a ray is parallel to a plane
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Decimal places kept on scale factors written by a drag
pub const SCALE_DECIMALS: u32 = 4;

/// Default number of segments for cylinder mesh generation
pub const CYLINDER_SEGMENTS: u32 = 32;

/// Default number of latitude segments for sphere mesh generation
pub const SPHERE_LAT_SEGMENTS: u32 = 16;

/// Default number of longitude segments for sphere mesh generation
pub const SPHERE_LON_SEGMENTS: u32 = 32;

/// Default number of segments around a torus ring
pub const RING_SEGMENTS: u32 = 48;

/// Default number of segments around the torus tube
pub const RING_TUBE_SEGMENTS: u32 = 8;

/// Default color for drawables (gray, RGBA)
pub const DEFAULT_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
