use std::path::Path;

use datagen::HostError;
use image::{ImageBuffer, Rgba};

use crate::Scene;

const BACKGROUND: Rgba<u8> = Rgba([24, 24, 28, 255]);
const LIGHT_DIR: glam::Vec3 = glam::Vec3::new(0.3, 0.4, 0.86);

/// Draws the visible objects as shaded discs into an RGBA buffer.
///
/// This is a schematic preview, not a renderer: orientation tints the
/// shading and the camera path offsets pan the arrangement, so every
/// variation pass leaves a visible trace in the output.
pub fn rasterize(scene: &Scene) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let width = scene.width;
    let height = scene.height;
    let mut img = ImageBuffer::from_pixel(width, height, BACKGROUND);

    let visible: Vec<_> = scene
        .objects
        .iter()
        .filter(|o| !o.hide_render && o.base_color.w > 0.0)
        .collect();
    if visible.is_empty() {
        return img;
    }

    let pan_x = scene.camera.follow_offset / 100.0 * width as f32 * 0.25;
    let pan_y = scene.camera.arc_offset / 100.0 * height as f32 * 0.25;
    let radius = width.min(height) as f32 * 0.6 / (visible.len() as f32 + 1.0);
    let light = LIGHT_DIR.normalize();

    for (i, object) in visible.iter().enumerate() {
        let center_x = (i as f32 + 1.0) / (visible.len() as f32 + 1.0) * width as f32 + pan_x;
        let center_y = height as f32 / 2.0 + pan_y;

        let rotation = object.rotation;
        let normal = glam::Mat3::from_euler(
            glam::EulerRot::XYZ,
            rotation.x,
            rotation.y,
            rotation.z,
        ) * glam::Vec3::Z;
        let shade = 0.35 + 0.65 * normal.dot(light).clamp(0.0, 1.0);

        let min_x = (center_x - radius).floor().max(0.0) as u32;
        let max_x = ((center_x + radius).ceil() as u32).min(width.saturating_sub(1));
        let min_y = (center_y - radius).floor().max(0.0) as u32;
        let max_y = ((center_y + radius).ceil() as u32).min(height.saturating_sub(1));
        if min_x > max_x || min_y > max_y {
            continue;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center_x;
                let dy = y as f32 + 0.5 - center_y;
                let d2 = (dx * dx + dy * dy) / (radius * radius);
                if d2 > 1.0 {
                    continue;
                }
                let falloff = 1.0 - d2 * d2;
                let color = object.base_color.truncate() * shade * falloff;
                img.put_pixel(x, y, to_rgba8(color));
            }
        }
    }

    img
}

/// Renders the scene and writes it as PNG, creating parent directories.
pub fn render_to_path(scene: &Scene, path: &Path) -> Result<(), HostError> {
    let img = rasterize(scene);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| HostError::Write {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
    }
    img.save(path).map_err(|e| HostError::Write {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

fn to_rgba8(color: glam::Vec3) -> Rgba<u8> {
    let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([quantize(color.x), quantize(color.y), quantize(color.z), 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneObject;

    #[test]
    fn hidden_objects_leave_only_background() {
        let mut scene = Scene::new(32, 32);
        let mut mug = SceneObject::new("Mug");
        mug.hide_render = true;
        scene.add_object(mug);

        let img = rasterize(&scene);
        assert!(img.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn zero_alpha_objects_are_not_drawn() {
        let mut scene = Scene::new(32, 32);
        let mut empty = SceneObject::new("Empty");
        empty.base_color = glam::vec4(1.0, 1.0, 1.0, 0.0);
        scene.add_object(empty);

        let img = rasterize(&scene);
        assert!(img.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn a_visible_object_lands_near_its_center() {
        let mut scene = Scene::new(64, 64);
        let mut mug = SceneObject::new("Mug");
        mug.base_color = glam::vec4(1.0, 0.0, 0.0, 1.0);
        scene.add_object(mug);

        let img = rasterize(&scene);
        let center = img.get_pixel(32, 32);
        assert!(center.0[0] > 100);
        assert!(center.0[1] < 50);
        assert_ne!(*center, BACKGROUND);
    }

    #[test]
    fn camera_pan_moves_the_drawing() {
        let mut scene = Scene::new(64, 64);
        scene.add_object(SceneObject::new("Mug"));

        let still = rasterize(&scene);
        scene.camera.follow_offset = 80.0;
        scene.camera.arc_offset = -80.0;
        let panned = rasterize(&scene);
        assert!(still.pixels().zip(panned.pixels()).any(|(a, b)| a != b));
    }

    #[test]
    fn render_to_path_creates_directories_and_a_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train").join("Mug").join("000000.png");

        let mut scene = Scene::new(16, 16);
        scene.add_object(SceneObject::new("Mug"));
        render_to_path(&scene, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
    }

    #[test]
    fn unwritable_path_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a directory component should be.
        let blocker = dir.path().join("train");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("Mug").join("000000.png");

        let scene = Scene::new(16, 16);
        let err = render_to_path(&scene, &path).unwrap_err();
        assert!(matches!(err, HostError::Write { .. }));
    }
}
