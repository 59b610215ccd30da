use datagen::{HostError, Subject};
use rand::Rng;

use crate::Scene;

/// Which object a rotation pass spins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotateTarget {
    /// The active subject's own object.
    Subject,
    /// One fixed object, whichever subject is active.
    Fixed(String),
}

/// Axes a rotation pass touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxes {
    Full,
    YawOnly,
}

/// Hue/saturation window for the color pass, in HSV space, value fixed at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorJitter {
    pub hue_max: f32,
    pub saturation_min: f32,
    pub saturation_max: f32,
}
impl Default for ColorJitter {
    fn default() -> Self {
        Self {
            hue_max: 0.2,
            saturation_min: 0.2,
            saturation_max: 0.8,
        }
    }
}

/// Scales mapping one random draw onto the two camera follow paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPath {
    pub follow_scale: f32,
    /// The arc path runs backwards, 0 to -100.
    pub arc_scale: f32,
}
impl Default for CameraPath {
    fn default() -> Self {
        Self {
            follow_scale: 100.0,
            arc_scale: -100.0,
        }
    }
}

/// One randomized variation pass, applied to the scene before every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Variation {
    pub rotate: RotateTarget,
    pub axes: RotationAxes,
    pub color: Option<ColorJitter>,
    pub camera: Option<CameraPath>,
}
impl Variation {
    pub fn apply<R: Rng>(
        &self,
        scene: &mut Scene,
        subject: &Subject,
        rng: &mut R,
    ) -> Result<(), HostError> {
        let target = match &self.rotate {
            RotateTarget::Subject => subject.name.as_str(),
            RotateTarget::Fixed(name) => name.as_str(),
        };
        let object = scene.object_mut(target)?;
        object.rotation = match self.axes {
            RotationAxes::Full => glam::vec3(
                random_angle(rng),
                random_angle(rng),
                random_angle(rng),
            ),
            RotationAxes::YawOnly => glam::vec3(0.0, 0.0, random_angle(rng)),
        };

        if let Some(jitter) = self.color {
            let hue = rng.gen::<f32>() * jitter.hue_max;
            let saturation = jitter.saturation_min
                + rng.gen::<f32>() * (jitter.saturation_max - jitter.saturation_min);
            let rgb = hsv_to_rgb(hue, saturation, 1.0);
            let object = scene.object_mut(&subject.name)?;
            let alpha = object.base_color.w;
            object.base_color = glam::vec4(rgb.x, rgb.y, rgb.z, alpha);
        }

        if let Some(camera) = self.camera {
            // One draw positions both paths.
            let r = rng.gen::<f32>();
            scene.camera.follow_offset = r * camera.follow_scale;
            scene.camera.arc_offset = r * camera.arc_scale;
        }

        Ok(())
    }
}

fn random_angle<R: Rng>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 2.0 * std::f32::consts::PI
}

/// HSV to RGB, every channel in [0, 1].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> glam::Vec3 {
    let h = (h.fract() + 1.0).fract() * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as i32 {
        0 => glam::vec3(v, t, p),
        1 => glam::vec3(q, v, p),
        2 => glam::vec3(p, v, t),
        3 => glam::vec3(p, q, v),
        4 => glam::vec3(t, p, v),
        _ => glam::vec3(v, p, q),
    }
}
