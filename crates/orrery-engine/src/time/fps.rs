/// Rolling frames-per-second counter.
///
/// Feed every frame delta to `record`; once at least one second has accumulated it
/// returns the average rate over that window and starts a new one.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    elapsed: f32,
    frames: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        self.frames += 1;

        if self.elapsed < 1.0 {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.elapsed = 0.0;
        self.frames = 0;
        Some(fps)
    }
}
