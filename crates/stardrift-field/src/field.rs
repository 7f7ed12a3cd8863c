//! Star field lifecycle and per-frame update.

use fastrand::Rng;
use log::{debug, warn};
use stardrift_core::{FieldSettings, Motion, Surface, Viewport};

use crate::meteor::Meteor;
use crate::star::{self, Star};

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Schedule another frame.
    Next,
    /// The field is not running; do not schedule again.
    Stopped,
}

/// Star field state.
///
/// The field is inert until [`StarField::start`] hands it a surface. From
/// then on every [`StarField::tick`] clears the surface and paints one frame,
/// until [`StarField::stop`] takes the surface back.
#[derive(Debug)]
pub struct StarField<S> {
    /// Drawing surface, present only while running.
    surface: Option<S>,
    /// Twinkling stars, regenerated on resize.
    stars: Vec<Star>,
    /// Recycled meteor pool.
    meteors: Vec<Meteor>,
    /// Last known surface size.
    viewport: Viewport,
    /// Motion preference captured at construction.
    motion: Motion,
    settings: FieldSettings,
    rng: Rng,
    /// Frames painted since the last start.
    frame: u64,
}

impl<S: Surface> StarField<S> {
    /// Create an inactive field with a randomly seeded generator.
    pub fn new(settings: FieldSettings, motion: Motion) -> Self {
        Self::with_rng(settings, motion, Rng::new())
    }

    /// Create an inactive field whose particles are reproducible from `seed`.
    pub fn with_seed(settings: FieldSettings, motion: Motion, seed: u64) -> Self {
        Self::with_rng(settings, motion, Rng::with_seed(seed))
    }

    fn with_rng(settings: FieldSettings, motion: Motion, rng: Rng) -> Self {
        Self {
            surface: None,
            stars: Vec::new(),
            meteors: Vec::new(),
            viewport: Viewport::default(),
            motion,
            settings,
            rng,
            frame: 0,
        }
    }

    /// Activate the field on `surface`, sized to `viewport`.
    ///
    /// Without a surface the field stays inactive: it paints nothing and
    /// every tick reports [`Schedule::Stopped`]. Starting a running field
    /// restarts it on the new surface.
    pub fn start(&mut self, surface: Option<S>, viewport: Viewport) {
        if self.is_running() {
            self.stop();
        }
        let Some(mut surface) = surface else {
            warn!("no drawing surface available, star field disabled");
            return;
        };

        surface.resize(viewport);
        self.viewport = viewport;
        self.frame = 0;
        self.populate_stars();

        let speed = self.speed();
        self.meteors = if self.motion.is_enabled() {
            (0..self.settings.meteor_count)
                .map(|_| Meteor::new(&mut self.rng, viewport, speed))
                .collect()
        } else {
            Vec::new()
        };
        self.surface = Some(surface);

        debug!(
            "star field started at {}x{} with {} stars and {} meteors ({:?} motion)",
            viewport.width,
            viewport.height,
            self.stars.len(),
            self.meteors.len(),
            self.motion
        );
    }

    /// Deactivate the field and hand the surface back.
    ///
    /// Calling this on a field that is not running does nothing and
    /// returns `None`.
    pub fn stop(&mut self) -> Option<S> {
        let surface = self.surface.take();
        if surface.is_some() {
            debug!("star field stopped after {} frames", self.frame);
        }
        surface
    }

    /// Resize the surface and regenerate the star population.
    ///
    /// Meteors keep flying and pick up the new bounds when they recycle.
    /// Ignored while the field is not running.
    pub fn resize(&mut self, viewport: Viewport) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.resize(viewport);
        self.viewport = viewport;
        self.populate_stars();
        debug!(
            "star field resized to {}x{}, {} stars",
            viewport.width,
            viewport.height,
            self.stars.len()
        );
    }

    /// Update and paint one frame.
    pub fn tick(&mut self) -> Schedule {
        let speed = self.speed();
        let Self {
            surface,
            stars,
            meteors,
            viewport,
            motion,
            rng,
            frame,
            ..
        } = self;
        let Some(surface) = surface.as_mut() else {
            return Schedule::Stopped;
        };

        surface.clear();

        for star in stars.iter_mut() {
            if motion.is_enabled() {
                star.twinkle();
            }
            star.draw(surface);
        }

        if motion.is_enabled() {
            for meteor in meteors.iter_mut() {
                meteor.update(rng, *viewport, speed);
                meteor.draw(surface);
            }
        }

        *frame += 1;
        Schedule::Next
    }

    /// Whether the field currently holds a surface and paints frames.
    pub fn is_running(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn settings(&self) -> FieldSettings {
        self.settings
    }

    /// Frames painted since the last start.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn speed(&self) -> f32 {
        self.settings.speed.multiplier()
    }

    fn populate_stars(&mut self) {
        let count = self.settings.star_count(self.viewport);
        let speed = self.speed();
        self.stars = star::populate(&mut self.rng, self.viewport, count, speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meteor::METEOR_ANGLE;
    use crate::testing::{DrawCall, RecordingSurface};
    use approx::assert_abs_diff_eq;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn started(motion: Motion) -> StarField<RecordingSurface> {
        let mut field = StarField::with_seed(FieldSettings::default(), motion, 1234);
        field.start(Some(RecordingSurface::default()), VIEWPORT);
        field
    }

    #[test]
    fn test_start_populates_field() {
        let field = started(Motion::Full);
        assert!(field.is_running());
        assert_eq!(field.stars().len(), 60);
        assert_eq!(field.meteors().len(), 3);
        assert_eq!(field.viewport(), VIEWPORT);
        let surface = field.surface().unwrap();
        assert_eq!(surface.viewport, VIEWPORT);
        assert_eq!(surface.calls, vec![DrawCall::Resize(VIEWPORT)]);
    }

    #[test]
    fn test_star_count_capped() {
        let mut field = StarField::with_seed(FieldSettings::default(), Motion::Full, 1);
        field.start(Some(RecordingSurface::default()), Viewport::new(2560.0, 1440.0));
        assert_eq!(field.stars().len(), 200);
    }

    #[test]
    fn test_reduced_motion_has_no_meteors() {
        let mut field = started(Motion::Reduced);
        assert!(field.meteors().is_empty());
        assert_eq!(field.stars().len(), 60);

        let before: Vec<f32> = field.stars().iter().map(|s| s.opacity).collect();
        for _ in 0..120 {
            assert_eq!(field.tick(), Schedule::Next);
        }
        let after: Vec<f32> = field.stars().iter().map(|s| s.opacity).collect();
        assert_eq!(before, after);
        assert!(field.stars().iter().all(|s| s.opacity == s.base_opacity));

        let surface = field.surface().unwrap();
        assert_eq!(surface.lines(), 0);
        assert_eq!(surface.circles(), 60 * 120);
    }

    #[test]
    fn test_tick_clears_then_draws() {
        let mut field = started(Motion::Full);
        assert_eq!(field.tick(), Schedule::Next);
        let calls = &field.surface().unwrap().calls;
        assert_eq!(calls[0], DrawCall::Resize(VIEWPORT));
        assert_eq!(calls[1], DrawCall::Clear);
        assert_eq!(
            calls[2..]
                .iter()
                .filter(|c| matches!(c, DrawCall::Circle { .. }))
                .count(),
            60
        );
        // Freshly entered meteors are visible after their first fade step.
        assert_eq!(field.surface().unwrap().lines(), 3);
        assert_eq!(field.frame(), 1);
    }

    #[test]
    fn test_tick_twinkles_stars() {
        let mut field = started(Motion::Full);
        let rates: Vec<f32> = field.stars().iter().map(|s| s.rate).collect();
        for _ in 0..10 {
            field.tick();
        }
        for (star, rate) in field.stars().iter().zip(rates) {
            assert_abs_diff_eq!(star.opacity, 0.3 + 0.4 * (10.0 * rate).sin(), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_resize_regenerates_stars_only() {
        let mut field = started(Motion::Full);
        for _ in 0..5 {
            field.tick();
        }
        let meteors = field.meteors().to_vec();
        let old_stars = field.stars().to_vec();

        let resized = Viewport::new(1024.0, 768.0);
        field.resize(resized);
        assert_eq!(field.stars().len(), 98);
        assert_ne!(field.stars(), old_stars.as_slice());
        assert!(field.stars().iter().all(|s| s.phase == 0.0));
        assert_eq!(field.meteors(), meteors.as_slice());
        assert_eq!(field.viewport(), resized);
        assert_eq!(field.surface().unwrap().viewport, resized);

        field.resize(VIEWPORT);
        assert_eq!(field.stars().len(), 60);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut field = started(Motion::Full);
        field.tick();
        let surface = field.stop().expect("surface returned on first stop");
        let calls = surface.calls.len();
        assert!(field.stop().is_none());
        assert!(!field.is_running());
        assert_eq!(field.tick(), Schedule::Stopped);
        assert_eq!(field.tick(), Schedule::Stopped);
        assert_eq!(field.frame(), 1);
        assert_eq!(surface.calls.len(), calls);
    }

    #[test]
    fn test_resize_after_stop_is_ignored() {
        let mut field = started(Motion::Full);
        field.stop();
        field.resize(Viewport::new(1024.0, 768.0));
        assert_eq!(field.viewport(), VIEWPORT);
        assert_eq!(field.stars().len(), 60);
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let mut field: StarField<RecordingSurface> =
            StarField::with_seed(FieldSettings::default(), Motion::Full, 5);
        field.start(None, VIEWPORT);
        assert!(!field.is_running());
        assert!(field.stars().is_empty());
        assert!(field.meteors().is_empty());
        assert_eq!(field.tick(), Schedule::Stopped);
        assert!(field.stop().is_none());
    }

    #[test]
    fn test_restart_regenerates() {
        let mut field = started(Motion::Full);
        for _ in 0..3 {
            field.tick();
        }
        let surface = field.stop();
        field.start(surface, Viewport::new(400.0, 400.0));
        assert!(field.is_running());
        assert_eq!(field.frame(), 0);
        assert_eq!(field.stars().len(), 20);
        assert_eq!(field.meteors().len(), 3);
    }

    #[test]
    fn test_seeded_fields_match() {
        let a = started(Motion::Full);
        let b = started(Motion::Full);
        assert_eq!(a.stars(), b.stars());
        assert_eq!(a.meteors(), b.meteors());
    }

    #[test]
    fn test_meteor_walk_until_reset() {
        let mut field = started(Motion::Full);
        field.meteors.truncate(1);
        field.meteors[0] = Meteor {
            x: 400.0,
            y: -50.0,
            length: 60.0,
            speed: 2.0,
            angle: METEOR_ANGLE,
            opacity: 0.0,
            fade_in: true,
        };
        let step = 2.0 * METEOR_ANGLE.cos();
        assert_abs_diff_eq!(step, 1.414, epsilon = 1e-3);

        let mut prev = field.meteors()[0].clone();
        let mut reset_seen = false;
        for frame in 0..400 {
            field.tick();
            let meteor = field.meteors()[0].clone();
            if meteor.y == -50.0 && meteor.opacity == 0.0 {
                assert!(meteor.fade_in);
                assert!(frame >= 50, "reset too early at frame {frame}");
                reset_seen = true;
                break;
            }
            assert_abs_diff_eq!(prev.x - meteor.x, step, epsilon = 1e-3);
            assert_abs_diff_eq!(meteor.y - prev.y, step, epsilon = 1e-3);
            prev = meteor;
        }
        assert!(reset_seen);
    }
}
