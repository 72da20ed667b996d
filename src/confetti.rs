use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub size: f32,     // Diameter in pixels
    pub hue: f32,      // Degrees
    pub x_percent: f32,
    pub delay: f32,    // Seconds before the first fall
    pub duration: f32, // Seconds per fall
}

/// Pose of a particle at some point of its fall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePose {
    pub y_fraction: f32, // -1.0 above the screen, 1.0 below it
    pub rotation: f32,
    pub opacity: f32,
}

/// Shared keyframes every particle loops through.
#[derive(Debug, Clone, PartialEq)]
pub struct FallAnimation {
    from: ParticlePose,
    to: ParticlePose,
}

impl FallAnimation {
    fn new() -> Self {
        Self {
            from: ParticlePose { y_fraction: -1.0, rotation: 0.0, opacity: 1.0 },
            to: ParticlePose { y_fraction: 1.0, rotation: 360.0, opacity: 0.0 },
        }
    }

    pub fn sample(&self, t: f32) -> ParticlePose {
        let t = t.clamp(0.0, 1.0);
        ParticlePose {
            y_fraction: raylib::core::math::lerp(self.from.y_fraction, self.to.y_fraction, t),
            rotation: raylib::core::math::lerp(self.from.rotation, self.to.rotation, t),
            opacity: raylib::core::math::lerp(self.from.opacity, self.to.opacity, t),
        }
    }
}

#[derive(Debug, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
    animation: Option<FallAnimation>,
    elapsed: f32,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub fn animation(&self) -> Option<&FallAnimation> {
        self.animation.as_ref()
    }

    pub fn burst<R: Rng>(&mut self, rng: &mut R) {
        self.particles.clear();
        self.elapsed = 0.0;

        for _ in 0..CONFETTI_COUNT {
            self.particles.push(Particle {
                size: rng.random_range(5.0..20.0),
                hue: rng.random_range(0.0..360.0),
                x_percent: rng.random_range(0.0..100.0),
                delay: rng.random_range(0.0..5.0),
                duration: rng.random_range(2.0..5.0),
            });
        }

        if self.animation.is_none() {
            self.animation = Some(FallAnimation::new());
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.particles.is_empty() {
            self.elapsed += dt;
        }
    }

    /// None while the particle is still waiting out its delay.
    pub fn pose(&self, particle: &Particle) -> Option<ParticlePose> {
        let animation = self.animation.as_ref()?;
        let running = self.elapsed - particle.delay;
        if running < 0.0 {
            return None;
        }
        Some(animation.sample((running % particle.duration) / particle.duration))
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        for particle in &self.particles {
            let Some(pose) = self.pose(particle) else {
                continue;
            };
            let center = Vector2::new(
                RENDER_WIDTH as f32 * particle.x_percent / 100.0,
                RENDER_HEIGHT as f32 * (pose.y_fraction + 1.0) * 0.5,
            );
            let mut color = hsl_color(particle.hue);
            color.a = (pose.opacity * 255.0) as u8;
            // Round pieces, so the rotation has nothing to show
            d.draw_circle_v(center, particle.size * 0.5, color);
        }
    }
}

/// Fully saturated, half lightness colour for a hue in degrees.
pub fn hsl_color(hue: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    Color::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, 255)
}
