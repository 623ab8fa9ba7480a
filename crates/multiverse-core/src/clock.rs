/// Monotonic animation time, advanced once per rendered frame by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: f32,
    delta: f32,
    frame: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by the host-supplied delta. Negative or non-finite deltas count
    /// as zero so the clock never runs backwards.
    pub fn advance(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        self.delta = dt;
        self.elapsed += dt;
        self.frame += 1;
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
