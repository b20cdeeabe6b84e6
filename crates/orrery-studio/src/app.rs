use orrery_engine::core::{App, AppControl, FrameCtx};
use orrery_engine::time::FpsCounter;
use orrery_scene::exercise::{Exercise, ExerciseControl};

/// Runs one exercise inside the engine runtime.
pub struct StudioApp {
    exercise: Box<dyn Exercise>,
    fps: FpsCounter,
}

impl StudioApp {
    pub fn new(exercise: Box<dyn Exercise>) -> Self {
        Self {
            exercise,
            fps: FpsCounter::new(),
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(fps) = self.fps.record(ctx.time.dt) {
            log::debug!("{}: {fps:.1} fps", self.exercise.name());
            ctx.window
                .set_title(&format!("orrery - {} ({fps:.0} fps)", self.exercise.name()));
        }

        if self.exercise.update(ctx.time, ctx.input_frame) == ExerciseControl::Exit {
            log::info!("{}: exit requested", self.exercise.name());
            return AppControl::Exit;
        }

        let clear = self.exercise.clear_color();
        let exercise = &mut self.exercise;
        ctx.render(clear, |rctx, target| exercise.draw(rctx, target))
    }
}
