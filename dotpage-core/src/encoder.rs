//! Encoder position arithmetic
//!
//! The quadrature counter advances four ticks per mechanical detent. All
//! UI selection maps the raw count onto a detent, then wraps it into a
//! range with a non-negative modulo so turning backwards past zero lands
//! on the last item.
//!
//! [`QuadratureDecoder`] turns A/B pin levels into those raw ticks; the
//! board runs it from an edge-triggered task.

/// Raw ticks per mechanical detent
pub const TICKS_PER_DETENT: i32 = 4;

/// Modulo whose result is always in `0..n`
///
/// `n` must be positive.
#[inline]
pub fn floor_mod(value: i32, n: i32) -> i32 {
    value.rem_euclid(n)
}

/// Detent number for a raw position (truncating toward zero)
#[inline]
pub fn detent(position: i32) -> i32 {
    position / TICKS_PER_DETENT
}

/// Raw position that reads back as `detent`
#[inline]
pub fn position_for(detent: i32) -> i32 {
    detent.saturating_mul(TICKS_PER_DETENT)
}

/// Map a raw position onto `0..n`
#[inline]
pub fn detent_index(position: i32, n: i32) -> i32 {
    floor_mod(detent(position), n)
}

// Quadrature transition table for previous/current state (AB).
// Index: (prev << 2) | curr, values are +1/-1 for valid transitions.
const QUADRATURE_TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Full-resolution quadrature decoder (one tick per edge)
#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    prev_ab: u8,
}

impl QuadratureDecoder {
    /// Start from the current pin levels
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            prev_ab: ab_from_levels(a, b),
        }
    }

    /// Feed new pin levels, returning the tick delta (-1, 0 or 1)
    ///
    /// Invalid double-step transitions count as 0.
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        let curr_ab = ab_from_levels(a, b);
        let index = ((self.prev_ab << 2) | curr_ab) as usize;
        self.prev_ab = curr_ab;
        QUADRATURE_TRANSITIONS[index]
    }
}

fn ab_from_levels(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | (b as u8)
}
