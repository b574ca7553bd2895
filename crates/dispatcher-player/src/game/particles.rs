//! Dropoff sparks: short-lived colored dots that fade out.

use rand::Rng;

use crate::engine::paint;

const DECAY_PER_TICK: f32 = 0.02;
const RADIUS: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: u32,
    /// 1.0 when spawned, removed at 0
    pub life: f32,
}

#[derive(Debug, Default)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spray `count` particles from (x, y) in random directions
    pub fn burst<R: Rng + ?Sized>(&mut self, x: f32, y: f32, color: u32, count: usize, rng: &mut R) {
        self.items.extend((0..count).map(|_| Particle {
            x,
            y,
            vx: (rng.gen::<f32>() - 0.5) * 4.0,
            vy: (rng.gen::<f32>() - 0.5) * 4.0,
            color,
            life: 1.0,
        }));
    }

    /// One simulation step
    pub fn update(&mut self) {
        self.items.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.life -= DECAY_PER_TICK;
            p.life > 0.0
        });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn draw(&self, fb: &mut [u32]) {
        if self.is_empty() {
            return;
        }
        for p in self.iter() {
            paint::fill_circle(fb, p.x, p.y, RADIUS, p.color, paint::alpha_of(p.life));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn burst_spawns_full_life_particles() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut particles = Particles::new();
        particles.burst(10.0, 20.0, 0xFF27AE60, 10, &mut rng);
        assert_eq!(particles.iter().count(), 10);
        for p in particles.iter() {
            assert_eq!(p.life, 1.0);
            assert!(p.vx.abs() <= 2.0 && p.vy.abs() <= 2.0);
        }
    }

    #[test]
    fn particles_fade_out_after_fifty_ticks() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut particles = Particles::new();
        particles.burst(0.0, 0.0, 0xFFE74C3C, 5, &mut rng);
        for _ in 0..49 {
            particles.update();
        }
        assert_eq!(particles.iter().count(), 5, "still alive just before the end");
        // float drift may need one extra tick
        particles.update();
        particles.update();
        assert!(particles.is_empty());
    }
}
