//! Drifting particle background drawn on a full-viewport canvas.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::frame::FrameTask;

/// Minimal 2D drawing surface the particle field renders onto.
pub trait Surface {
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
}

impl Particle {
    fn random(rng: &mut SmallRng, width: f64, height: f64) -> Self {
        Self {
            x: rng.r#gen::<f64>() * width,
            y: rng.r#gen::<f64>() * height,
            radius: rng.r#gen::<f64>() * 2.0 + 1.0,
            vx: rng.r#gen::<f64>() - 0.5,
            vy: rng.r#gen::<f64>() - 0.5,
            opacity: rng.r#gen::<f64>() * 0.5 + 0.2,
        }
    }

    pub fn in_bounds(&self, width: f64, height: f64) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }
}

/// floor(width × height / area_per_particle)
pub fn particle_count(width: f64, height: f64, area_per_particle: f64) -> usize {
    if area_per_particle <= 0.0 {
        return 0;
    }
    ((width * height) / area_per_particle).floor().max(0.0) as usize
}

pub struct ParticleField {
    width: f64,
    height: f64,
    area_per_particle: f64,
    rgb: (u8, u8, u8),
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl ParticleField {
    pub fn new(width: f64, height: f64, area_per_particle: f64, rgb: (u8, u8, u8)) -> Self {
        Self::with_rng(width, height, area_per_particle, rgb, SmallRng::from_entropy())
    }

    pub fn with_rng(
        width: f64,
        height: f64,
        area_per_particle: f64,
        rgb: (u8, u8, u8),
        rng: SmallRng,
    ) -> Self {
        let mut field = Self {
            width,
            height,
            area_per_particle,
            rgb,
            particles: Vec::new(),
            rng,
        };
        field.regenerate();
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for nudging particles in tests and tooling.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Drops every particle and builds a fresh set for the new dimensions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        let count = particle_count(self.width, self.height, self.area_per_particle);
        let (w, h) = (self.width, self.height);
        self.particles = (0..count)
            .map(|_| Particle::random(&mut self.rng, w, h))
            .collect();
    }

    /// Moves every particle one step; escapees are respawned inside.
    pub fn update(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            if !p.in_bounds(w, h) {
                *p = Particle::random(&mut self.rng, w, h);
            }
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (r, g, b) = self.rgb;
        for p in &self.particles {
            let color = format!("rgba({r}, {g}, {b}, {})", p.opacity);
            surface.fill_circle(p.x, p.y, p.radius, &color);
        }
    }
}

/// Particle field bound to the surface it paints.
pub struct ParticleSystem<S> {
    pub field: ParticleField,
    surface: S,
}

impl<S: Surface> ParticleSystem<S> {
    pub fn new(field: ParticleField, mut surface: S) -> Self {
        let (w, h) = field.size();
        surface.resize(w as u32, h as u32);
        Self { field, surface }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width as u32, height as u32);
        self.field.resize(width, height);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface> FrameTask for ParticleSystem<S> {
    fn frame(&mut self, _now_ms: f64) {
        self.surface.clear();
        self.field.update();
        self.field.draw(&mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(w: f64, h: f64) -> ParticleField {
        ParticleField::with_rng(w, h, 15_000.0, (102, 126, 234), SmallRng::seed_from_u64(7))
    }

    #[derive(Default)]
    struct Recorder {
        size: (u32, u32),
        clears: usize,
        circles: Vec<(f64, f64, f64, String)>,
    }

    impl Surface for Recorder {
        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
        fn clear(&mut self) {
            self.clears += 1;
            self.circles.clear();
        }
        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
            self.circles.push((x, y, radius, color.to_string()));
        }
    }

    #[test]
    fn test_count_from_area() {
        assert_eq!(particle_count(1200.0, 800.0, 15_000.0), 64);
        assert_eq!(particle_count(100.0, 100.0, 15_000.0), 0);
        assert_eq!(seeded(1200.0, 800.0).particles().len(), 64);
    }

    #[test]
    fn test_random_ranges() {
        let field = seeded(1920.0, 1080.0);
        for p in field.particles() {
            assert!(p.in_bounds(1920.0, 1080.0));
            assert!((1.0..3.0).contains(&p.radius));
            assert!((-0.5..0.5).contains(&p.vx) && (-0.5..0.5).contains(&p.vy));
            assert!((0.2..0.7).contains(&p.opacity));
        }
    }

    #[test]
    fn test_escaped_particle_reset_same_step() {
        let mut field = seeded(1200.0, 800.0);
        {
            let p = &mut field.particles_mut()[0];
            p.x = 1199.9;
            p.vx = 0.4;
        }
        {
            let p = &mut field.particles_mut()[1];
            p.y = 0.1;
            p.vy = -0.3;
        }
        field.update();
        for p in &field.particles()[..2] {
            assert!(p.in_bounds(1200.0, 800.0));
        }
    }

    #[test]
    fn test_resize_regenerates() {
        let mut field = seeded(1200.0, 800.0);
        field.resize(600.0, 500.0);
        assert_eq!(field.particles().len(), 20);
        assert!(field.particles().iter().all(|p| p.in_bounds(600.0, 500.0)));
    }

    #[test]
    fn test_frame_clears_and_draws_each_particle() {
        let mut sys = ParticleSystem::new(seeded(1200.0, 800.0), Recorder::default());
        assert_eq!(sys.surface().size, (1200, 800));
        sys.frame(16.0);
        sys.frame(32.0);
        assert_eq!(sys.surface().clears, 2);
        assert_eq!(sys.surface().circles.len(), 64);
        assert!(sys.surface().circles[0].3.starts_with("rgba(102, 126, 234, 0."));

        sys.resize(300.0, 200.0);
        assert_eq!(sys.surface().size, (300, 200));
        assert_eq!(sys.field.particles().len(), 4);
    }
}
