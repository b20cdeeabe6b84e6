use anyhow::{Result, bail, ensure};

use crate::body::{Body, BodyId};

/// Owns every body of a scene, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<Body>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `body` and returns its id.
    ///
    /// The parent, if any, must already be in the world; this keeps the parent
    /// chain acyclic.
    pub fn add_body(&mut self, body: Body) -> Result<BodyId> {
        if let Some(parent) = body.parent {
            if parent.0 >= self.bodies.len() {
                bail!(
                    "body '{}' names parent #{} which is not declared before it",
                    body.name,
                    parent.0
                );
            }
        }
        ensure!(body.is_finite(), "body '{}' has non-finite parameters", body.name);

        let id = BodyId(self.bodies.len());
        log::debug!("added body #{} '{}'", id.0, body.name);
        self.bodies.push(body);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Looks a body up by name (first match).
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> + '_ {
        self.bodies.iter_mut()
    }

    /// Ids of bodies open to rate tuning, in declaration order.
    pub fn tunable_ids(&self) -> Vec<BodyId> {
        self.iter().filter(|(_, b)| b.tunable).map(|(id, _)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Material;
    use orrery_engine::paint::Color;
    use orrery_engine::render::MeshId;

    fn body(name: &str) -> Body {
        Body::new(name, MeshId::from_raw(0), Material::Flat(Color::RED))
    }

    #[test]
    fn ids_follow_declaration_order() {
        let mut w = World::new();
        let a = w.add_body(body("a")).unwrap();
        let b = w.add_body(body("b").with_parent(a)).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(w.find("b"), Some(b));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn forward_parent_is_rejected() {
        let mut w = World::new();
        let err = w.add_body(body("moon").with_parent(BodyId(0))).unwrap_err();
        assert!(err.to_string().contains("moon"));
        assert!(w.is_empty());
    }

    #[test]
    fn non_finite_body_is_rejected() {
        let mut w = World::new();
        assert!(w.add_body(body("x").with_spin(f32::INFINITY)).is_err());
    }

    #[test]
    fn tunable_ids_skip_fixed_bodies() {
        let mut w = World::new();
        w.add_body(body("sun")).unwrap();
        let p = w.add_body(body("planet").with_tunable(true)).unwrap();
        assert_eq!(w.tunable_ids(), vec![p]);
    }
}
