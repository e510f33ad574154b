//! Terminal side of the effect commands: the bell and confetti bursts.

use std::{io::Write, time::Duration};

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use valentine_engine::{EffectError, EffectSink, Intensity, UiOptions};

use crate::theme::{Glyphs, Palette};

const BURST_DURATION: Duration = Duration::from_millis(1600);
/// Terminal cells are coarse; one drawn piece stands in for this many particles.
const PARTICLES_PER_PIECE: u16 = 3;
/// Downward acceleration in viewport heights per second squared.
const GRAVITY: f32 = 1.4;
const MIN_SPEED: f32 = 0.45;
const MAX_SPEED: f32 = 0.95;

/// Scale `base` around its center, keeping the result inside `bounds`.
#[must_use]
pub fn scale_rect(base: Rect, scale: f64, bounds: Rect) -> Rect {
    let width = (f64::from(base.width) * scale).round() as u16;
    let height = (f64::from(base.height) * scale).round() as u16;
    let width = width.max(1).min(bounds.width);
    let height = height.max(1).min(bounds.height);

    let center_x = i32::from(base.x) + i32::from(base.width) / 2;
    let center_y = i32::from(base.y) + i32::from(base.height) / 2;
    let min_x = i32::from(bounds.x);
    let min_y = i32::from(bounds.y);
    let max_x = i32::from(bounds.x) + i32::from(bounds.width) - i32::from(width);
    let max_y = i32::from(bounds.y) + i32::from(bounds.height) - i32::from(height);
    let x = (center_x - i32::from(width) / 2).clamp(min_x, max_x.max(min_x));
    let y = (center_y - i32::from(height) / 2).clamp(min_y, max_y.max(min_y));

    Rect {
        x: x as u16,
        y: y as u16,
        width,
        height,
    }
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    shade: usize,
}

#[derive(Debug, Clone)]
struct Burst {
    particles: Vec<Particle>,
    elapsed: Duration,
}

impl Burst {
    fn new(intensity: Intensity) -> Self {
        let pieces = (intensity.particle_count() / PARTICLES_PER_PIECE).max(1);
        let half_spread = f32::from(intensity.spread_degrees()).to_radians() / 2.0;
        let origin_y = intensity.origin_y();
        let particles = (0..pieces)
            .map(|_| {
                // Angle measured from straight up.
                let angle = (rand::random::<f32>() * 2.0 - 1.0) * half_spread;
                let speed = MIN_SPEED + rand::random::<f32>() * (MAX_SPEED - MIN_SPEED);
                Particle {
                    x: 0.5,
                    y: origin_y,
                    vx: angle.sin() * speed,
                    vy: -(angle.cos() * speed),
                    shade: (rand::random::<f32>() * 5.0) as usize,
                }
            })
            .collect();
        Self {
            particles,
            elapsed: Duration::ZERO,
        }
    }

    fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
        let dt = delta.as_secs_f32();
        for p in &mut self.particles {
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.vy += GRAVITY * dt;
            // Air drag keeps the horizontal spread readable.
            p.vx *= (1.0 - dt).max(0.0);
        }
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= BURST_DURATION
    }
}

/// Active confetti bursts, animated per frame.
#[derive(Debug, Clone, Default)]
pub struct Confetti {
    bursts: Vec<Burst>,
}

impl Confetti {
    pub fn spawn(&mut self, intensity: Intensity) {
        self.bursts.push(Burst::new(intensity));
    }

    pub fn advance(&mut self, delta: Duration) {
        for burst in &mut self.bursts {
            burst.advance(delta);
        }
        self.bursts.retain(|burst| !burst.is_finished());
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.bursts.is_empty()
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.bursts.iter().map(|b| b.particles.len()).sum()
    }

    /// Draw every visible piece over whatever is already in `buf`.
    pub fn render(&self, area: Rect, buf: &mut Buffer, palette: &Palette, glyphs: &Glyphs) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for particle in self.bursts.iter().flat_map(|b| b.particles.iter()) {
            if !(0.0..1.0).contains(&particle.x) || !(0.0..1.0).contains(&particle.y) {
                continue;
            }
            let x = area.x + (particle.x * f32::from(area.width)) as u16;
            let y = area.y + (particle.y * f32::from(area.height)) as u16;
            let glyph = glyphs.confetti[particle.shade % glyphs.confetti.len()];
            let color = palette.confetti[particle.shade % palette.confetti.len()];
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(glyph).set_style(Style::default().fg(color));
            }
        }
    }
}

/// [`EffectSink`] backed by the terminal: BEL for sound, confetti for celebrations.
pub struct TerminalEffects<'a, W: Write> {
    confetti: &'a mut Confetti,
    bell: W,
    options: UiOptions,
}

impl<'a, W: Write> TerminalEffects<'a, W> {
    pub fn new(confetti: &'a mut Confetti, bell: W, options: UiOptions) -> Self {
        Self {
            confetti,
            bell,
            options,
        }
    }
}

impl<W: Write> EffectSink for TerminalEffects<'_, W> {
    fn play_feedback_sound(&mut self) -> Result<(), EffectError> {
        if !self.options.sound {
            return Ok(());
        }
        self.bell
            .write_all(b"\x07")
            .and_then(|()| self.bell.flush())
            .map_err(EffectError::Sound)
    }

    fn celebrate(&mut self, intensity: Intensity) -> Result<(), EffectError> {
        if self.options.reduced_motion {
            tracing::debug!(?intensity, "Celebration suppressed (reduced motion)");
            return Ok(());
        }
        self.confetti.spawn(intensity);
        Ok(())
    }
}
