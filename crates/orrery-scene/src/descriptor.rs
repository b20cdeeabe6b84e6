use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use glam::Vec3;
use serde::Deserialize;

use orrery_engine::paint::Color;
use orrery_engine::render::{MeshId, Shading};

use crate::body::{Axis, Body, Material, TextureHandle};
use crate::world::World;

/// Ambient floor for lit bodies; the dark side is never fully black.
pub const LIT_AMBIENT: f32 = 0.35;

const SOLAR_SYSTEM_JSON: &str = include_str!("../assets/solar_system.json");

/// A planetary system loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemDescriptor {
    pub bodies: Vec<BodyDescriptor>,
}

/// One body. Rates are in tuning units (radians per frame at 60 Hz).
#[derive(Debug, Clone, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    /// Name of an earlier body to orbit; the system origin when absent.
    #[serde(default)]
    pub parent: Option<String>,
    /// Sphere radius.
    pub size: f32,
    /// Orbit radius.
    #[serde(default)]
    pub distance: f32,
    /// `#rrggbb`; also the fallback when the texture is not drawn.
    pub color: String,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub spin_rate: f32,
    #[serde(default)]
    pub orbit_rate: f32,
    /// Starting orbit angle in radians.
    #[serde(default)]
    pub orbit_angle: Option<f32>,
    #[serde(default = "default_tunable")]
    pub tunable: bool,
    /// Light sources are drawn unlit.
    #[serde(default)]
    pub emissive: bool,
}

fn default_tunable() -> bool {
    true
}

impl SystemDescriptor {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read system file {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("failed to parse system file {}", path.display()))
    }

    /// The built-in Sun, Mercury, Venus, Earth and Mars.
    pub fn solar_system() -> Result<Self> {
        Self::from_json(SOLAR_SYSTEM_JSON).context("built-in solar system preset is invalid")
    }

    /// Builds a world of sphere bodies orbiting about Y.
    ///
    /// Rates are scaled by `units_per_second` into rad/s. Texture names get handles
    /// in first-seen order.
    pub fn build(&self, sphere: MeshId, units_per_second: f32) -> Result<World> {
        let mut world = World::new();
        let mut textures: HashMap<&str, TextureHandle> = HashMap::new();

        for desc in &self.bodies {
            let color = Color::parse_hex(&desc.color)
                .ok_or_else(|| anyhow!("body '{}': invalid color '{}'", desc.name, desc.color))?;

            let material = match desc.texture.as_deref() {
                Some(name) => {
                    let next = TextureHandle(textures.len() as u32);
                    let texture = *textures.entry(name).or_insert(next);
                    Material::Textured { texture, fallback: color }
                }
                None => Material::Flat(color),
            };

            let shading = if desc.emissive {
                Shading::Unlit
            } else {
                Shading::Lit { ambient: LIT_AMBIENT }
            };

            let mut body = Body::new(desc.name.clone(), sphere, material)
                .with_axis(Axis::Y)
                .with_orbit(desc.distance, desc.orbit_rate * units_per_second)
                .with_spin(desc.spin_rate * units_per_second)
                .with_angles(desc.orbit_angle.unwrap_or(0.0), 0.0)
                .with_scale(Vec3::splat(desc.size))
                .with_shading(shading)
                .with_tunable(desc.tunable);

            if let Some(parent) = desc.parent.as_deref() {
                let id = world.find(parent).ok_or_else(|| {
                    anyhow!("body '{}': parent '{parent}' must be declared earlier", desc.name)
                })?;
                body = body.with_parent(id);
            }

            world
                .add_body(body)
                .with_context(|| format!("invalid body '{}'", desc.name))?;
        }

        log::info!(
            "built system with {} bodies ({} textured)",
            world.len(),
            textures.len()
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const SPHERE: MeshId = MeshId::from_raw(0);

    #[test]
    fn preset_parses_and_builds() {
        let desc = SystemDescriptor::solar_system().unwrap();
        let world = desc.build(SPHERE, 60.0).unwrap();

        assert_eq!(world.len(), 5);
        let sun = world.get(world.find("Sun").unwrap()).unwrap();
        assert_eq!(sun.shading, Shading::Unlit);
        assert!(!sun.tunable);
        assert!((sun.spin_rate - 0.06).abs() < 1e-6);

        let earth = world.get(world.find("Earth").unwrap()).unwrap();
        assert_eq!(earth.orbit_radius, 50.0);
        assert_eq!(earth.scale, Vec3::splat(3.5));
        assert!((earth.orbit_rate - 0.6).abs() < 1e-6);
        assert!(matches!(earth.material, Material::Textured { .. }));
        assert_eq!(world.tunable_ids().len(), 4);
    }

    #[test]
    fn preset_angles_are_distinct() {
        let world = SystemDescriptor::solar_system().unwrap().build(SPHERE, 60.0).unwrap();
        let angles: Vec<f32> = world.iter().skip(1).map(|(_, b)| b.orbit_angle).collect();
        assert_eq!(angles.len(), 4);
        for (i, a) in angles.iter().enumerate() {
            assert!((0.0..TAU).contains(a));
            assert!(angles[i + 1..].iter().all(|b| (a - b).abs() > 1e-3), "angle {a} repeats");
        }
    }

    #[test]
    fn minimal_body_uses_defaults() {
        let json = r##"{ "bodies": [ { "name": "rock", "size": 1, "color": "#808080" } ] }"##;
        let world = SystemDescriptor::from_json(json).unwrap().build(SPHERE, 60.0).unwrap();
        let (_, rock) = world.iter().next().unwrap();
        assert_eq!(rock.orbit_radius, 0.0);
        assert_eq!(rock.orbit_angle, 0.0);
        assert!(rock.tunable);
        assert_eq!(rock.shading, Shading::Lit { ambient: LIT_AMBIENT });
    }

    #[test]
    fn parent_resolves_to_earlier_body() {
        let json = r##"{ "bodies": [
            { "name": "earth", "size": 1, "distance": 50, "color": "#3498db" },
            { "name": "moon", "parent": "earth", "size": 0.3, "distance": 5, "color": "#ffffff" }
        ] }"##;
        let world = SystemDescriptor::from_json(json).unwrap().build(SPHERE, 60.0).unwrap();
        let moon = world.get(world.find("moon").unwrap()).unwrap();
        assert_eq!(moon.parent, world.find("earth"));
    }

    #[test]
    fn forward_parent_is_an_error() {
        let json = r##"{ "bodies": [
            { "name": "moon", "parent": "earth", "size": 0.3, "color": "#ffffff" },
            { "name": "earth", "size": 1, "color": "#3498db" }
        ] }"##;
        let err = SystemDescriptor::from_json(json).unwrap().build(SPHERE, 60.0).unwrap_err();
        assert!(format!("{err:#}").contains("earth"));
    }

    #[test]
    fn bad_color_is_an_error() {
        let json = r#"{ "bodies": [ { "name": "x", "size": 1, "color": "blue" } ] }"#;
        let err = SystemDescriptor::from_json(json).unwrap().build(SPHERE, 60.0).unwrap_err();
        assert!(err.to_string().contains("invalid color"));
    }

    #[test]
    fn shared_texture_names_share_a_handle() {
        let json = r##"{ "bodies": [
            { "name": "a", "size": 1, "color": "#ffffff", "texture": "rock.jpg" },
            { "name": "b", "size": 1, "color": "#ffffff", "texture": "rock.jpg" },
            { "name": "c", "size": 1, "color": "#ffffff", "texture": "ice.jpg" }
        ] }"##;
        let world = SystemDescriptor::from_json(json).unwrap().build(SPHERE, 60.0).unwrap();
        let handles: Vec<_> = world.iter().filter_map(|(_, b)| b.material.texture()).collect();
        assert_eq!(handles, vec![TextureHandle(0), TextureHandle(0), TextureHandle(1)]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SystemDescriptor::from_json("{ \"bodies\": [ { \"name\": ").is_err());
    }
}
