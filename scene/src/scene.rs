use std::path::Path;

use datagen::{HostError, RenderHost};

/// One mutable object in the scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    /// Euler angles in radians, XYZ order.
    pub rotation: glam::Vec3,
    /// RGBA in [0, 1]. Objects with zero alpha are skipped when drawing.
    pub base_color: glam::Vec4,
    pub hide_render: bool,
}
impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rotation: glam::Vec3::ZERO,
            base_color: glam::vec4(0.8, 0.8, 0.8, 1.0),
            hide_render: false,
        }
    }
}

/// Camera riding two follow paths, positioned by scalar offsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub follow_offset: f32,
    pub arc_offset: f32,
}

/// The whole mutable state the hooks operate on. There is exactly one
/// scene per run and every job reuses it.
#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub camera: Camera,
    pub width: u32,
    pub height: u32,
}
impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            objects: vec![],
            camera: Camera::default(),
            width,
            height,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn object(&self, name: &str) -> Result<&SceneObject, HostError> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| HostError::MissingObject(name.to_string()))
    }

    pub fn object_mut(&mut self, name: &str) -> Result<&mut SceneObject, HostError> {
        self.objects
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| HostError::MissingObject(name.to_string()))
    }
}
impl RenderHost for Scene {
    fn set_visibility(&mut self, subject: &str, visible: bool) -> Result<(), HostError> {
        self.object_mut(subject)?.hide_render = !visible;
        Ok(())
    }

    fn render_to(&mut self, path: &Path) -> Result<(), HostError> {
        crate::render_to_path(self, path)
    }
}
