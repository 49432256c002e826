// Copyright @yucwang 2026

use crate::core::shape::{DistanceField, MaterialKind, SceneSample};
use crate::math::constants::{Float, Vector3f};
use crate::shapes::csg::{subtract, union};
use crate::shapes::cube::{Cube, RotatedCube};
use crate::shapes::sphere::Sphere;

/// Half-extent of the first room; walls sit at +/- this value.
pub const ROOM_HALF_EXTENT: Float = 10.0;
/// Distance from a wall inside which a point counts as that wall's surface.
pub const WALL_BAND: Float = 0.1;
/// Half-width of the square light footprint centered on the floor.
pub const LIGHT_HALF_WIDTH: Float = 5.0;

const OBSTACLE_COS: Float = 0.8660254;
const OBSTACLE_SIN: Float = -0.5;

/// Two rooms joined by a doorway, a rotated box against the y = 10 wall of
/// the first room and a gold sphere. Colored walls and the floor light are
/// assigned by position; the light footprint only covers the first room.
#[derive(Debug, Clone)]
pub struct CornellScene {
    room: Cube,
    obstacle: RotatedCube,
    doorway: Cube,
    second_room: Cube,
    sphere: Sphere,
}

impl Default for CornellScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CornellScene {
    pub fn new() -> Self {
        let h = ROOM_HALF_EXTENT;
        Self {
            room: Cube::new(Vector3f::new(-h, -h, -h), Vector3f::new(h, h, h)),
            obstacle: RotatedCube::new(
                Cube::new(Vector3f::new(3.0, 6.0, -3.0), Vector3f::new(7.0, 10.0, 1.0)),
                OBSTACLE_COS,
                OBSTACLE_SIN,
            ),
            doorway: Cube::new(Vector3f::new(-3.5, -3.0, -12.5), Vector3f::new(3.5, 10.0, -9.0)),
            second_room: Cube::new(Vector3f::new(-10.0, -10.0, -22.0), Vector3f::new(10.0, 10.0, -12.0)),
            sphere: Sphere::new(Vector3f::new(-6.0, 7.0, 5.0), 3.0),
        }
    }

    fn classify(p: &Vector3f) -> MaterialKind {
        let h = ROOM_HALF_EXTENT;
        let mut material = MaterialKind::Neutral;
        if p.z >= h {
            return material;
        }
        if p.x < -h + WALL_BAND {
            material = MaterialKind::RedWall;
        }
        if p.x > h - WALL_BAND {
            material = MaterialKind::GreenWall;
        }
        if p.y < -h + WALL_BAND && p.x.abs() <= LIGHT_HALF_WIDTH && p.z.abs() <= LIGHT_HALF_WIDTH {
            material = MaterialKind::LightPatch;
        }
        material
    }
}

impl DistanceField for CornellScene {
    fn evaluate(&self, p: &Vector3f) -> SceneSample {
        let mut distance = union(self.room.inside_distance(p), -self.obstacle.inside_distance(p));
        distance = subtract(distance, self.doorway.inside_distance(p));
        distance = subtract(distance, self.second_room.inside_distance(p));

        let sphere_distance = self.sphere.distance(p);
        if sphere_distance < distance {
            return SceneSample::new(sphere_distance, MaterialKind::GoldSphere);
        }

        SceneSample::new(distance, Self::classify(p))
    }
}
