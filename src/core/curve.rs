//! Interpolation curves — monotonic `[0,1] → [0,1]` time mappings.

/// A replaceable interpolation curve.  Must be monotonic and map
/// `0.0 → 0.0`, `1.0 → 1.0`.
pub type Curve = Box<dyn Fn(f32) -> f32 + Send>;

/// Ease-in-ease-out: slow start, fast middle, slow stop.
///
/// `cos((t + 1)·π) / 2 + 0.5`
pub fn ease_in_out(t: f32) -> f32 {
    ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
}

/// Identity mapping — constant speed.
pub fn linear(t: f32) -> f32 {
    t
}

/// Linear interpolation between two row coordinates, truncated to whole rows.
pub fn lerp(start: i32, end: i32, t: f32) -> i32 {
    (start as f32 + (end as f32 - start as f32) * t) as i32
}
