use glam::Vec3;

use crate::paint::Color;

/// A sphere-like object drawn as a shaded disc.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec3,
    /// World-space radius.
    pub radius: f32,
    pub color: Color,
}

impl Body {
    #[inline]
    pub fn new(position: Vec3, radius: f32, color: Color) -> Self {
        Self { position, radius, color }
    }
}

/// Stable index of a body inside its [`Scene`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BodyId(usize);

/// Bodies plus the background color the frame is cleared to.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub background: Color,
    bodies: Vec<Body>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            bodies: Vec::new(),
        }
    }

    /// Adds a body and returns its id. Ids are never reused.
    pub fn add(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Bodies in insertion order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
