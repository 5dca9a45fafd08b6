//! Sweep actuator trait
//!
//! The range sensor rides on a pointing mechanism (a hobby servo on the
//! reference hardware). The actuator gives no completion signal: after
//! `point_to` returns, the head is only guaranteed to be at the commanded
//! angle once the caller has waited its own settle delay. The sampling loop
//! owns that delay so the per-angle read ordering stays strictly sequential.

/// Angle-addressable pointing mechanism for the range sensor
pub trait SweepActuator {
    /// Command the head to the given angle in degrees (0 = full right,
    /// 180 = full left, 90 = forward-center)
    fn point_to(&mut self, degrees: u16);
}
