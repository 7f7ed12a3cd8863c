//! Ambient star field rendering for stardrift.
//!
//! A [`StarField`] owns a drawing surface, a population of twinkling stars
//! and a small pool of recycled meteors. The host calls [`StarField::tick`]
//! once per display frame and keeps scheduling frames for as long as it
//! returns [`Schedule::Next`].
//!
//! [`PixelCanvas`] is an in-memory [`stardrift_core::Surface`] that hosts can
//! blit to whatever output they own.

mod canvas;
mod field;
mod meteor;
mod star;

pub use canvas::PixelCanvas;
pub use field::{Schedule, StarField};
pub use meteor::{METEOR_ANGLE, Meteor, TRAIL_GRADIENT};
pub use star::Star;
