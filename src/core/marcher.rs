// Copyright @yucwang 2026

use crate::core::interaction::HitRecord;
use crate::core::shape::DistanceField;
use crate::math::constants::{Float, Vector3f};

/// Sphere marching through a distance field.
#[derive(Debug, Clone, Copy)]
pub struct RayMarcher {
    /// Field evaluations after which the current position is accepted as a hit.
    pub max_steps: u32,
    /// Travel beyond this distance is a miss.
    pub max_distance: Float,
    /// A sample closer than this to a surface is a hit.
    pub hit_epsilon: Float,
    /// Offset used by the one-sided normal estimate.
    pub normal_epsilon: Float,
}

impl Default for RayMarcher {
    fn default() -> Self {
        Self {
            max_steps: 100,
            max_distance: 100.0,
            hit_epsilon: 0.01,
            normal_epsilon: 0.01,
        }
    }
}

impl RayMarcher {
    /// Walks from `origin` along the unit vector `direction`. Running out of
    /// steps is reported as a hit at the last evaluated position.
    pub fn march(&self, field: &dyn DistanceField, origin: &Vector3f, direction: &Vector3f) -> HitRecord {
        let mut traveled: Float = 0.0;
        let mut steps = 0u32;
        let mut position = *origin;

        while traveled < self.max_distance {
            position = origin + direction * traveled;
            let sample = field.evaluate(&position);
            steps += 1;
            if sample.distance < self.hit_epsilon || steps >= self.max_steps {
                let normal = self.estimate_normal(field, &position, sample.distance, direction);
                return HitRecord::hit(position, normal, sample.material, steps);
            }
            traveled += sample.distance;
        }

        HitRecord::miss(position, steps)
    }

    /// Forward differences against the distance already sampled at `p`.
    /// Biased at sharp edges; only the gradient direction is kept.
    pub fn estimate_normal(&self, field: &dyn DistanceField, p: &Vector3f, d: Float, direction: &Vector3f) -> Vector3f {
        let e = self.normal_epsilon;
        let gradient = Vector3f::new(
            field.evaluate(&(p + Vector3f::new(e, 0.0, 0.0))).distance - d,
            field.evaluate(&(p + Vector3f::new(0.0, e, 0.0))).distance - d,
            field.evaluate(&(p + Vector3f::new(0.0, 0.0, e))).distance - d,
        );
        // flat gradient: face the incoming ray
        gradient.try_normalize(0.0).unwrap_or(-direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::CornellScene;
    use crate::core::shape::{MaterialKind, SceneSample};

    /// Solid half-space x >= wall.
    struct Wall {
        x: Float,
    }

    impl DistanceField for Wall {
        fn evaluate(&self, p: &Vector3f) -> SceneSample {
            SceneSample::new(self.x - p.x, MaterialKind::RedWall)
        }
    }

    /// Never converges, never reaches a surface.
    struct Constant {
        d: Float,
    }

    impl DistanceField for Constant {
        fn evaluate(&self, _p: &Vector3f) -> SceneSample {
            SceneSample::new(self.d, MaterialKind::Neutral)
        }
    }

    #[test]
    fn test_march_hits_flat_wall() {
        let marcher = RayMarcher::default();
        let hit = marcher.march(&Wall { x: 7.0 }, &Vector3f::zeros(), &Vector3f::new(1.0, 0.0, 0.0));
        assert!(hit.found);
        assert!((hit.position - Vector3f::new(7.0, 0.0, 0.0)).norm() < marcher.hit_epsilon);
        assert!(hit.steps <= marcher.max_steps);
        assert_eq!(hit.material, MaterialKind::RedWall);
        assert!((hit.normal - Vector3f::new(-1.0, 0.0, 0.0)).norm() < 1e-3);
    }

    #[test]
    fn test_march_oblique_wall() {
        let marcher = RayMarcher::default();
        let dir = Vector3f::new(1.0, 1.0, 0.0).normalize();
        let hit = marcher.march(&Wall { x: 4.0 }, &Vector3f::new(0.0, -2.0, 0.0), &dir);
        assert!(hit.found);
        assert!((hit.position - Vector3f::new(4.0, 2.0, 0.0)).norm() < 0.02);
    }

    #[test]
    fn test_march_into_scene_wall() {
        let marcher = RayMarcher::default();
        let hit = marcher.march(&CornellScene::new(), &Vector3f::zeros(), &Vector3f::new(1.0, 0.0, 0.0));
        assert!(hit.found);
        assert!((hit.position - Vector3f::new(10.0, 0.0, 0.0)).norm() < marcher.hit_epsilon);
        assert_eq!(hit.material, MaterialKind::GreenWall);
        assert!((hit.normal.norm() - 1.0).abs() < 1e-4);
        assert!(hit.normal.x < -0.99);
    }

    #[test]
    fn test_iteration_cap_forces_hit() {
        let marcher = RayMarcher::default();
        let hit = marcher.march(&Constant { d: 0.5 }, &Vector3f::zeros(), &Vector3f::new(0.0, 0.0, 1.0));
        assert!(hit.found);
        assert_eq!(hit.steps, marcher.max_steps);
        assert!((hit.position.z - 49.5).abs() < 1e-3);
        assert!((hit.normal.norm() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_march_miss_beyond_extent() {
        let marcher = RayMarcher::default();
        let hit = marcher.march(&Constant { d: 2.0 }, &Vector3f::zeros(), &Vector3f::new(0.0, 1.0, 0.0));
        assert!(!hit.found);
        assert_eq!(hit.steps, 50);
    }

    #[test]
    fn test_corner_normal_uses_forward_differences() {
        // On the edge between the x = 10 wall and the floor, stepping +y
        // leaves the nearest surface unchanged, so only the x gradient is seen.
        let marcher = RayMarcher::default();
        let scene = CornellScene::new();
        let p = Vector3f::new(9.995, -9.995, 0.0);
        let d = scene.evaluate(&p).distance;
        let normal = marcher.estimate_normal(&scene, &p, d, &Vector3f::new(1.0, -1.0, 0.0).normalize());
        assert!((normal - Vector3f::new(-1.0, 0.0, 0.0)).norm() < 1e-3);
    }

    #[test]
    fn test_march_into_room_edge() {
        let marcher = RayMarcher::default();
        let dir = Vector3f::new(1.0, -1.0, 0.0).normalize();
        let hit = marcher.march(&CornellScene::new(), &Vector3f::zeros(), &dir);
        assert!(hit.found);
        assert!(hit.position.x > 9.98 && hit.position.y < -9.98);
        assert_eq!(hit.material, MaterialKind::GreenWall);
        // biased toward the x wall rather than the diagonal
        assert!(hit.normal.x < -0.99);
        assert!(hit.normal.y.abs() < 1e-3);
    }
}
