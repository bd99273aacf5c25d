/// A timestamp in the context of the simulation, expressed in milliseconds.
///
/// The simulation is allowed to run faster or slower than real time, so the
/// wall clock is never consulted: time only advances when the world steps.
/// A run with a fixed seed and a fixed sequence of deltas is reproducible
/// bit for bit.
pub type TimeStamp = f32;

/// The duration between two timestamps, expressed in milliseconds.
pub type Duration = f32;

/// Gets a zero timestamp.
pub fn zero() -> TimeStamp {
    0.0
}

/// Converts a duration expressed in milliseconds. No conversion to do.
pub fn milliseconds_to_duration(ms: f32) -> Duration {
    ms
}
