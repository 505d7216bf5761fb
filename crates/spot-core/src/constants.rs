//! Global constants for spot-core

/// Edge length of the square ground plane
pub const PLANE_SIZE: f32 = 40.0;

/// Edge length of the cube
pub const CUBE_SIZE: f32 = 4.0;

/// Sphere radius
pub const SPHERE_RADIUS: f32 = 3.0;

/// Number of segments around the sphere's vertical axis
pub const SPHERE_WIDTH_SEGMENTS: u32 = 32;

/// Number of segments from pole to pole
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 16;

/// Checker texture applied to the ground plane
pub const CHECKER_TEXTURE_PATH: &str = "resources/images/checker.png";

/// Cube material color
pub const CUBE_COLOR: &str = "#8AC";

/// Sphere material color
pub const SPHERE_COLOR: &str = "#CA8";

/// Spot light defaults
pub mod light {
    /// Light color (0xRRGGBB)
    pub const COLOR: u32 = 0xffffff;
    /// Luminous intensity in candela
    pub const INTENSITY: f32 = 150.0;
    /// Cone half-angle in degrees
    pub const ANGLE_DEGREES: f32 = 60.0;
    /// Physically correct inverse-square falloff
    pub const DECAY: f32 = 2.0;
    /// Light position
    pub const POSITION: [f32; 3] = [0.0, 10.0, 0.0];
    /// Light target position
    pub const TARGET: [f32; 3] = [0.0, 0.0, 0.0];
}

/// Light helper (cone outline) geometry
pub mod helper {
    /// Segments in the cone's rim circle
    pub const CONE_SEGMENTS: u32 = 32;
    /// Cone length used when the light has unlimited range
    pub const UNLIMITED_LENGTH: f32 = 1000.0;
    /// Widest drawable cone half-angle, just short of a right angle
    pub const MAX_ANGLE: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;
}

/// Control ranges used by the light panel
pub mod controls {
    /// Intensity slider range and step
    pub const INTENSITY: (f32, f32, f32) = (0.0, 250.0, 1.0);
    /// Distance slider range
    pub const DISTANCE: (f32, f32) = (0.0, 40.0);
    /// Angle slider range in degrees
    pub const ANGLE_DEGREES: (f32, f32) = (0.0, 90.0);
    /// Penumbra slider range and step
    pub const PENUMBRA: (f32, f32, f32) = (0.0, 1.0, 0.01);
    /// Vector X component range
    pub const VECTOR_X: (f32, f32) = (-10.0, 10.0);
    /// Vector Y component range
    pub const VECTOR_Y: (f32, f32) = (0.0, 10.0);
    /// Vector Z component range
    pub const VECTOR_Z: (f32, f32) = (-10.0, 10.0);
}
