// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::interaction::HitRecord;
use crate::core::marcher::RayMarcher;
use crate::core::rng::LcgRng;
use crate::core::shape::{DistanceField, MaterialKind};
use crate::math::constants::{Float, Vector2f, Vector3f, splat};
use crate::math::frame::Frame;
use crate::math::ray::Ray3f;
use crate::math::warp::sample_cosine_hemisphere;

/// Distance a scattered ray is pushed off the surface before marching again.
pub const SURFACE_OFFSET: Float = 0.1;
/// Half-width of the per-axis jitter added to mirror reflections.
pub const GLOSS_JITTER: Float = 0.1;

pub fn light_color() -> Vector3f {
    Vector3f::new(50.0, 80.0, 100.0)
}

pub fn gold_tint() -> Vector3f {
    Vector3f::new(0.98, 0.72, 0.16) * 0.8
}

/// Albedo of the diffuse materials, `None` for the others.
pub fn diffuse_albedo(material: MaterialKind) -> Option<Vector3f> {
    match material {
        MaterialKind::Neutral => Some(splat(0.3)),
        MaterialKind::RedWall => Some(Vector3f::new(0.2, 0.01, 0.01)),
        MaterialKind::GreenWall => Some(Vector3f::new(0.01, 0.2, 0.01)),
        MaterialKind::GoldSphere | MaterialKind::LightPatch => None,
    }
}

/// Outcome of one bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PathState {
    Scattered { origin: Vector3f, direction: Vector3f, albedo: Vector3f },
    Absorbed,
    Terminated,
}

pub struct PathIntegrator {
    pub max_bounces: u32,
    pub marcher: RayMarcher,
}

impl Default for PathIntegrator {
    fn default() -> Self {
        Self::new(3)
    }
}

impl PathIntegrator {
    pub fn new(max_bounces: u32) -> Self {
        Self { max_bounces, marcher: RayMarcher::default() }
    }

    /// Radiance carried back along one path of at most `max_bounces`
    /// segments. The first gold hit on a path adds one segment to the budget.
    pub fn trace_path(&self,
                      field: &dyn DistanceField,
                      rng: &mut LcgRng,
                      mut origin: Vector3f,
                      mut direction: Vector3f,
                      max_bounces: u32) -> Vector3f {
        let mut radiance = Vector3f::zeros();
        let mut attenuation = splat(1.0);
        let mut remaining = max_bounces;
        let mut gold_bonus_granted = false;

        while remaining > 0 {
            remaining -= 1;
            let hit = self.marcher.march(field, &origin, &direction);
            if hit.material == MaterialKind::GoldSphere && hit.found && !gold_bonus_granted {
                gold_bonus_granted = true;
                remaining += 1;
            }

            match scatter(&hit, &direction, rng) {
                PathState::Scattered { origin: o, direction: d, albedo } => {
                    origin = o;
                    direction = d;
                    attenuation = attenuation.component_mul(&albedo);
                }
                PathState::Absorbed => {
                    radiance += attenuation.component_mul(&light_color());
                    break;
                }
                PathState::Terminated => break,
            }
        }

        radiance
    }
}

fn scatter(hit: &HitRecord, incoming: &Vector3f, rng: &mut LcgRng) -> PathState {
    if !hit.found {
        return PathState::Terminated;
    }

    match hit.material {
        MaterialKind::LightPatch => PathState::Absorbed,
        MaterialKind::GoldSphere => {
            let reflected = (incoming - hit.normal * (2.0 * incoming.dot(&hit.normal))).normalize();
            let origin = hit.position + reflected * SURFACE_OFFSET;
            let jitter = Vector3f::new(
                rng.next_f32() * 2.0 * GLOSS_JITTER - GLOSS_JITTER,
                rng.next_f32() * 2.0 * GLOSS_JITTER - GLOSS_JITTER,
                rng.next_f32() * 2.0 * GLOSS_JITTER - GLOSS_JITTER,
            );
            PathState::Scattered {
                origin,
                direction: (reflected + jitter).normalize(),
                albedo: gold_tint(),
            }
        }
        diffuse => {
            let albedo = match diffuse_albedo(diffuse) {
                Some(albedo) => albedo,
                None => return PathState::Terminated,
            };
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let direction = Frame::from_normal(&hit.normal).from_local(&sample_cosine_hemisphere(&u));
            PathState::Scattered {
                origin: hit.position + direction * SURFACE_OFFSET,
                direction: direction.normalize(),
                albedo,
            }
        }
    }
}

impl Integrator for PathIntegrator {
    fn trace(&self, field: &dyn DistanceField, rng: &mut LcgRng, ray: &Ray3f) -> Vector3f {
        self.trace_path(field, rng, ray.origin(), ray.dir(), self.max_bounces)
    }

    fn max_bounces(&self) -> u32 {
        self.max_bounces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::CornellScene;
    use crate::core::shape::SceneSample;

    /// Room whose every surface is the same material.
    struct Uniform {
        material: MaterialKind,
    }

    impl DistanceField for Uniform {
        fn evaluate(&self, p: &Vector3f) -> SceneSample {
            SceneSample::new(10.0 - p.norm(), self.material)
        }
    }

    struct Empty;

    impl DistanceField for Empty {
        fn evaluate(&self, _p: &Vector3f) -> SceneSample {
            SceneSample::new(5.0, MaterialKind::Neutral)
        }
    }

    #[test]
    fn test_direct_light_hit() {
        let integrator = PathIntegrator::default();
        let mut rng = LcgRng::new(1);
        let color = integrator.trace_path(&CornellScene::new(), &mut rng,
                                          Vector3f::zeros(), Vector3f::new(0.0, -1.0, 0.0), 3);
        assert_eq!(color, light_color());
    }

    #[test]
    fn test_light_through_integrator_trait() {
        let integrator = PathIntegrator::new(1);
        let mut rng = LcgRng::new(9);
        let ray = Ray3f::new(Vector3f::new(1.0, 0.0, 1.0), Vector3f::new(0.0, -1.0, 0.0));
        assert_eq!(integrator.trace(&CornellScene::new(), &mut rng, &ray), light_color());
    }

    #[test]
    fn test_zero_bounces_is_black() {
        let integrator = PathIntegrator::default();
        let mut rng = LcgRng::new(3);
        let color = integrator.trace_path(&CornellScene::new(), &mut rng,
                                          Vector3f::zeros(), Vector3f::new(0.0, -1.0, 0.0), 0);
        assert_eq!(color, Vector3f::zeros());
    }

    #[test]
    fn test_no_light_found_is_black() {
        let integrator = PathIntegrator::new(8);
        let mut rng = LcgRng::new(5);
        let field = Uniform { material: MaterialKind::Neutral };
        for _ in 0..32 {
            let color = integrator.trace_path(&field, &mut rng, Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), 8);
            assert_eq!(color, Vector3f::zeros());
        }
    }

    #[test]
    fn test_miss_is_black() {
        let integrator = PathIntegrator::default();
        let mut rng = LcgRng::new(5);
        let color = integrator.trace_path(&Empty, &mut rng, Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), 3);
        assert_eq!(color, Vector3f::zeros());
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let integrator = PathIntegrator::default();
        let scene = CornellScene::new();
        let dir = Vector3f::new(0.3, -0.4, 0.8).normalize();
        let mut a = LcgRng::new(77);
        let mut b = LcgRng::new(77);
        for _ in 0..64 {
            let ca = integrator.trace_path(&scene, &mut a, Vector3f::zeros(), dir, 3);
            let cb = integrator.trace_path(&scene, &mut b, Vector3f::zeros(), dir, 3);
            assert_eq!(ca, cb);
        }
    }

    #[test]
    fn test_radiance_is_bounded_by_light() {
        let integrator = PathIntegrator::default();
        let scene = CornellScene::new();
        let mut rng = LcgRng::new(2024);
        let light = light_color();
        let mut lit = 0;
        for i in 0..256 {
            let angle = i as Float * 0.1;
            let radius = if i % 2 == 0 { 0.2 } else { 0.5 };
            let dir = Vector3f::new(angle.cos() * radius, -0.6, angle.sin() * radius).normalize();
            let c = integrator.trace_path(&scene, &mut rng, Vector3f::new(0.0, 2.0, 0.0), dir, 3);
            assert!(c.x >= 0.0 && c.y >= 0.0 && c.z >= 0.0);
            assert!(c.x <= light.x && c.y <= light.y && c.z <= light.z);
            if c.x > 0.0 {
                lit += 1;
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn test_gold_grants_one_extra_bounce() {
        // A single segment into the gold sphere reflects, then the bonus
        // segment may still reach the light.
        let integrator = PathIntegrator::default();
        let scene = CornellScene::new();
        let origin = Vector3f::new(-6.0, 0.0, 5.0);
        let mut any_light = false;
        let mut rng = LcgRng::new(11);
        for _ in 0..512 {
            let c = integrator.trace_path(&scene, &mut rng, origin, Vector3f::new(0.0, 1.0, 0.0), 1);
            if c != Vector3f::zeros() {
                any_light = true;
                let ratio = c.component_div(&light_color());
                let tint = gold_tint();
                assert!((ratio - tint).norm() < 1e-4);
            }
        }
        assert!(any_light);
    }

    /// Gold slab between z = -5 and z = 5. The z = 5 face turns into a
    /// light past x = 30, which a path starting at the origin along (1.5, 0, 1)
    /// only reaches on its third segment.
    struct GoldCorridor;

    impl DistanceField for GoldCorridor {
        fn evaluate(&self, p: &Vector3f) -> SceneSample {
            let far = 5.0 - p.z;
            let near = p.z + 5.0;
            if far < near && p.x > 30.0 {
                SceneSample::new(far, MaterialKind::LightPatch)
            } else {
                SceneSample::new(far.min(near), MaterialKind::GoldSphere)
            }
        }
    }

    #[test]
    fn test_gold_bonus_is_granted_once() {
        let integrator = PathIntegrator::default();
        let dir = Vector3f::new(1.5, 0.0, 1.0).normalize();
        let mut rng = LcgRng::new(31);
        for _ in 0..64 {
            let c = integrator.trace_path(&GoldCorridor, &mut rng, Vector3f::zeros(), dir, 1);
            assert_eq!(c, Vector3f::zeros());
        }

        // one more budgeted segment reaches the light after two gold hits
        let mut lit = 0;
        for _ in 0..64 {
            let c = integrator.trace_path(&GoldCorridor, &mut rng, Vector3f::zeros(), dir, 2);
            if c != Vector3f::zeros() {
                let expected = light_color().component_mul(&gold_tint()).component_mul(&gold_tint());
                assert!((c - expected).norm() < 1e-3);
                lit += 1;
            }
        }
        assert!(lit > 32);
    }

    #[test]
    fn test_diffuse_albedos_are_low() {
        for material in [MaterialKind::Neutral, MaterialKind::RedWall, MaterialKind::GreenWall] {
            let albedo = diffuse_albedo(material).unwrap();
            assert!(albedo.x.max(albedo.y).max(albedo.z) <= 0.3);
        }
        assert!(diffuse_albedo(MaterialKind::LightPatch).is_none());
    }
}
