// Centralized ingestion limits to harden against untrusted input (JSON)

pub const MAX_POINTS: usize = 100_000;
pub const MAX_SEGMENTS: usize = 200_000;
pub const MAX_MARKINGS: usize = 50_000;
pub const MAX_POLYGON_POINTS: usize = 10_000;

// Building slots per guide, and the shortest slot parameters may ask for
pub const MAX_BUILDING_SLOTS: usize = 10_000;
pub const MIN_BUILDING_LENGTH: f64 = 1.0;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 = 10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
