//! Scene graph and scene builder

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::SceneConfig;
use crate::helper::SpotLightHelper;
use crate::light::SpotLight;
use crate::primitive::{
    MeshData, generate_box_mesh, generate_plane_mesh, generate_sphere_mesh_with_segments,
};
use crate::{Shared, shared};

/// Geometry kind and dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Plane {
        width: f32,
        height: f32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

/// Geometry kind without dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Plane,
    Box,
    Sphere,
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Plane { .. } => GeometryKind::Plane,
            Geometry::Box { .. } => GeometryKind::Box,
            Geometry::Sphere { .. } => GeometryKind::Sphere,
        }
    }

    /// Generate the mesh for this geometry
    pub fn mesh(&self) -> MeshData {
        match *self {
            Geometry::Plane { width, height } => generate_plane_mesh(width, height),
            Geometry::Box {
                width,
                height,
                depth,
            } => generate_box_mesh([width, height, depth]),
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => generate_sphere_mesh_with_segments(radius, width_segments, height_segments),
        }
    }
}

/// Texture magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureFilter {
    Nearest,
    #[default]
    Linear,
}

/// Texture wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureWrap {
    Repeat,
    #[default]
    ClampToEdge,
}

/// Texture applied to a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRef {
    /// Image path
    pub path: String,
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub mag_filter: TextureFilter,
    /// UV repeat count on each axis
    pub repeat: Vec2,
    /// Whether the image data is sRGB encoded
    pub srgb: bool,
}

/// Surface material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color, multiplied with the texture when present
    pub color: Color,
    pub texture: Option<TextureRef>,
    pub double_sided: bool,
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            texture: None,
            double_sided: false,
        }
    }
}

/// Position and rotation of an object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Model matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

/// Static object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
}

/// Objects and the light submitted to the renderer each frame
#[derive(Debug)]
pub struct SceneGraph {
    background: Color,
    objects: Vec<SceneObject>,
    light: Shared<SpotLight>,
    helper: Shared<SpotLightHelper>,
}

impl SceneGraph {
    /// Background clear color
    pub fn background(&self) -> Color {
        self.background
    }

    /// Static objects; they cannot change after construction
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// The scene's single spot light
    pub fn light(&self) -> &Shared<SpotLight> {
        &self.light
    }

    /// Cone helper for the spot light
    pub fn helper(&self) -> &Shared<SpotLightHelper> {
        &self.helper
    }
}

/// Build the demo scene: checker plane, cube, sphere and one spot light
pub fn build_scene(config: &SceneConfig) -> SceneGraph {
    let plane_size = config.plane_size;
    let repeats = config.checker_repeats();

    let plane = SceneObject {
        name: "plane".to_string(),
        geometry: Geometry::Plane {
            width: plane_size,
            height: plane_size,
        },
        material: Material {
            color: Color::WHITE,
            texture: Some(TextureRef {
                path: config.checker_texture.clone(),
                wrap_s: TextureWrap::Repeat,
                wrap_t: TextureWrap::Repeat,
                mag_filter: TextureFilter::Nearest,
                repeat: Vec2::splat(repeats),
                srgb: true,
            }),
            double_sided: true,
        },
        transform: Transform {
            position: Vec3::ZERO,
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        },
    };

    let cube_size = config.cube_size;
    let cube = SceneObject {
        name: "cube".to_string(),
        geometry: Geometry::Box {
            width: cube_size,
            height: cube_size,
            depth: cube_size,
        },
        material: Material::solid(config.cube_color),
        transform: Transform::from_position(Vec3::new(cube_size + 1.0, cube_size / 2.0, 0.0)),
    };

    let radius = config.sphere_radius;
    let sphere = SceneObject {
        name: "sphere".to_string(),
        geometry: Geometry::Sphere {
            radius,
            width_segments: config.sphere_width_segments,
            height_segments: config.sphere_height_segments,
        },
        material: Material::solid(config.sphere_color),
        transform: Transform::from_position(Vec3::new(-radius - 1.0, radius + 2.0, 0.0)),
    };

    let light = SpotLight::from_config(&config.light);
    let helper = SpotLightHelper::new(&light);

    tracing::info!(
        "Built scene: plane {}x{} ({} checker repeats), cube {}, sphere r={}",
        plane_size,
        plane_size,
        repeats,
        cube_size,
        radius
    );

    SceneGraph {
        background: config.background,
        objects: vec![plane, cube, sphere],
        light: shared(light),
        helper: shared(helper),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_demo_scene_contents() {
        let scene = build_scene(&SceneConfig::default());
        assert_eq!(scene.objects().len(), 3);
        assert_eq!(scene.background(), Color::BLACK);

        let kinds: Vec<_> = scene.objects().iter().map(|o| o.geometry.kind()).collect();
        assert_eq!(
            kinds,
            [GeometryKind::Plane, GeometryKind::Box, GeometryKind::Sphere]
        );

        let light = scene.light().lock();
        assert_eq!(light.intensity, 150.0);
        assert_eq!(light.position, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_object_placement() {
        let scene = build_scene(&SceneConfig::default());
        let cube = scene.object("cube").unwrap();
        assert_eq!(cube.transform.position, Vec3::new(5.0, 2.0, 0.0));
        let sphere = scene.object("sphere").unwrap();
        assert_eq!(sphere.transform.position, Vec3::new(-4.0, 5.0, 0.0));
    }

    #[test]
    fn test_plane_lies_in_xz() {
        let scene = build_scene(&SceneConfig::default());
        let plane = scene.object("plane").unwrap();
        let normal = plane.transform.rotation * Vec3::Z;
        assert_relative_eq!(normal.y, 1.0, epsilon = 1e-6);

        let texture = plane.material.texture.as_ref().unwrap();
        assert_eq!(texture.repeat, Vec2::splat(20.0));
        assert_eq!(texture.mag_filter, TextureFilter::Nearest);
        assert_eq!(texture.wrap_s, TextureWrap::Repeat);
        assert!(plane.material.double_sided);
    }

    #[test]
    fn test_rebuild_does_not_accumulate() {
        let config = SceneConfig {
            plane_size: 10.0,
            ..Default::default()
        };
        let first = build_scene(&config);
        let second = build_scene(&config);
        assert_eq!(first.objects(), second.objects());
        assert_eq!(second.objects().len(), 3);
    }

    #[test]
    fn test_geometry_meshes() {
        let scene = build_scene(&SceneConfig::default());
        for object in scene.objects() {
            let mesh = object.geometry.mesh();
            assert!(mesh.triangle_count() > 0, "{} has no triangles", object.name);
        }
    }
}
