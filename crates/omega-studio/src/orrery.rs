//! A small sun/planet/moon system animated on circular orbits.

use std::f32::consts::TAU;

use glam::Vec3;
use omega_engine::paint::Color;
use omega_engine::scene::{Body, BodyId, Scene};

/// Circular orbit in the XZ plane around a parent body (or the origin).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orbit {
    pub parent: Option<BodyId>,
    pub distance: f32,
    /// Seconds per revolution.
    pub period: f32,
    /// Angle at `t = 0`, in radians.
    pub phase: f32,
}

impl Orbit {
    /// Offset from the parent after `elapsed` seconds.
    pub fn offset(&self, elapsed: f64) -> Vec3 {
        let turns = (elapsed / self.period as f64).fract() as f32;
        let angle = self.phase + turns * TAU;
        Vec3::new(angle.cos(), 0.0, angle.sin()) * self.distance
    }
}

/// Bodies of the system and their orbits, parents before children.
pub struct Orrery {
    orbits: Vec<(BodyId, Orbit)>,
}

impl Orrery {
    /// Adds the sun, earth, moon and mars to `scene`.
    pub fn populate(scene: &mut Scene) -> Self {
        let sun = scene.add(Body::new(Vec3::ZERO, 5.0, Color::from_hex(0xffcc33)));
        let earth = scene.add(Body::new(Vec3::ZERO, 1.0, Color::from_hex(0x2f6fdf)));
        let moon = scene.add(Body::new(Vec3::ZERO, 0.4, Color::from_hex(0x9a9a9a)));
        let mars = scene.add(Body::new(Vec3::ZERO, 0.8, Color::from_hex(0xc1440e)));

        let orrery = Self {
            orbits: vec![
                (earth, Orbit { parent: Some(sun), distance: 10.0, period: 12.0, phase: 0.0 }),
                (moon, Orbit { parent: Some(earth), distance: 2.0, period: 2.0, phase: 0.0 }),
                (mars, Orbit { parent: Some(sun), distance: 15.0, period: 22.0, phase: 2.0 }),
            ],
        };
        orrery.advance(scene, 0.0);
        orrery
    }

    /// Places every orbiting body for time `elapsed` (seconds).
    pub fn advance(&self, scene: &mut Scene, elapsed: f64) {
        for (id, orbit) in &self.orbits {
            let center = orbit
                .parent
                .and_then(|p| scene.body(p))
                .map_or(Vec3::ZERO, |b| b.position);
            if let Some(body) = scene.body_mut(*id) {
                body.position = center + orbit.offset(elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn orbit_returns_after_one_period() {
        let orbit = Orbit { parent: None, distance: 3.0, period: 4.0, phase: 0.0 };
        assert!(close(orbit.offset(0.0), Vec3::new(3.0, 0.0, 0.0)));
        assert!(close(orbit.offset(1.0), Vec3::new(0.0, 0.0, 3.0)));
        assert!(close(orbit.offset(4.0), orbit.offset(0.0)));
    }

    #[test]
    fn moon_follows_earth() {
        let mut scene = Scene::default();
        let orrery = Orrery::populate(&mut scene);
        orrery.advance(&mut scene, 3.7);

        let bodies = scene.bodies();
        let (sun, earth, moon) = (bodies[0].position, bodies[1].position, bodies[2].position);
        assert_eq!(sun, Vec3::ZERO);
        assert!(((earth - sun).length() - 10.0).abs() < 1e-4);
        assert!(((moon - earth).length() - 2.0).abs() < 1e-4);
        assert!(bodies.iter().all(|b| b.position.y == 0.0));
    }
}
