use glam::{Mat4, Vec3};

use orrery_engine::paint::Color;
use orrery_engine::render::{MeshId, Shading};

/// Index of a body inside its `World`.
///
/// Ids are handed out by `World::add_body`; a parent always has a lower id than
/// any of its children.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Rotation axis for orbit and spin.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Upright axis; bodies move in the XZ plane.
    Y,
    /// Screen-normal axis; bodies move in the XY plane.
    Z,
}

impl Axis {
    #[inline]
    pub fn rotation(self, angle: f32) -> Mat4 {
        match self {
            Axis::Y => Mat4::from_rotation_y(angle),
            Axis::Z => Mat4::from_rotation_z(angle),
        }
    }
}

/// Opaque texture id handed over by setup code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub u32);

/// Surface appearance of a body.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Material {
    Flat(Color),
    /// Renderers without the texture draw `fallback` instead.
    Textured { texture: TextureHandle, fallback: Color },
}

impl Material {
    /// Color used when the surface is drawn untextured.
    pub fn base_color(&self) -> Color {
        match *self {
            Material::Flat(c) => c,
            Material::Textured { fallback, .. } => fallback,
        }
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        match *self {
            Material::Flat(_) => None,
            Material::Textured { texture, .. } => Some(texture),
        }
    }
}

/// Per-body animation state and render data.
///
/// Angles are radians and grow without bound; rates are radians per second.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub parent: Option<BodyId>,

    pub spin_angle: f32,
    pub orbit_angle: f32,
    pub spin_rate: f32,
    pub orbit_rate: f32,

    /// Distance from the parent (or the origin), fixed at construction.
    pub orbit_radius: f32,
    pub orbit_axis: Axis,
    pub spin_axis: Axis,
    pub scale: Vec3,

    pub mesh: MeshId,
    pub material: Material,
    pub shading: Shading,

    /// Whether rate tuning may change this body.
    pub tunable: bool,
}

impl Body {
    /// A body at the origin with no motion, unit scale, and Z axes.
    pub fn new(name: impl Into<String>, mesh: MeshId, material: Material) -> Self {
        Self {
            name: name.into(),
            parent: None,
            spin_angle: 0.0,
            orbit_angle: 0.0,
            spin_rate: 0.0,
            orbit_rate: 0.0,
            orbit_radius: 0.0,
            orbit_axis: Axis::Z,
            spin_axis: Axis::Z,
            scale: Vec3::ONE,
            mesh,
            material,
            shading: Shading::Unlit,
            tunable: false,
        }
    }

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_orbit(mut self, radius: f32, rate: f32) -> Self {
        self.orbit_radius = radius;
        self.orbit_rate = rate;
        self
    }

    pub fn with_spin(mut self, rate: f32) -> Self {
        self.spin_rate = rate;
        self
    }

    /// Sets both the orbit and the spin axis.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.orbit_axis = axis;
        self.spin_axis = axis;
        self
    }

    pub fn with_angles(mut self, orbit_angle: f32, spin_angle: f32) -> Self {
        self.orbit_angle = orbit_angle;
        self.spin_angle = spin_angle;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    pub fn with_tunable(mut self, tunable: bool) -> Self {
        self.tunable = tunable;
        self
    }

    /// True when every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.spin_angle,
            self.orbit_angle,
            self.spin_rate,
            self.orbit_rate,
            self.orbit_radius,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.scale.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textured_material_falls_back_to_its_color() {
        let m = Material::Textured {
            texture: TextureHandle(3),
            fallback: Color::CYAN,
        };
        assert_eq!(m.base_color(), Color::CYAN);
        assert_eq!(m.texture(), Some(TextureHandle(3)));
        assert_eq!(Material::Flat(Color::RED).texture(), None);
    }

    #[test]
    fn builder_sets_both_axes() {
        let b = Body::new("p", MeshId::from_raw(0), Material::Flat(Color::RED)).with_axis(Axis::Y);
        assert_eq!(b.orbit_axis, Axis::Y);
        assert_eq!(b.spin_axis, Axis::Y);
    }

    #[test]
    fn non_finite_scale_is_detected() {
        let b = Body::new("p", MeshId::from_raw(0), Material::Flat(Color::RED))
            .with_scale(Vec3::new(f32::NAN, 1.0, 1.0));
        assert!(!b.is_finite());
    }
}
