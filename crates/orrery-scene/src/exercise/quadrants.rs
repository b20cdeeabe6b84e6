use orrery_engine::coords::Viewport;
use orrery_engine::input::InputFrame;
use orrery_engine::paint::Color;
use orrery_engine::render::{RenderCtx, RenderTarget, ScissorFill, ScissorFillRenderer};
use orrery_engine::time::FrameTime;

use super::{Exercise, ExerciseControl, control_for};

/// Four scissor-clipped fills in a square canvas.
#[derive(Default)]
pub struct Quadrants {
    fills: ScissorFillRenderer,
    last_viewport: Option<Viewport>,
}

impl Quadrants {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Red, green, blue and yellow quadrants of the top-left square of `viewport`.
pub fn quadrant_fills(viewport: Viewport) -> [ScissorFill; 4] {
    let [tl, tr, bl, br] = viewport.square().quadrants();
    [
        ScissorFill { rect: tl, color: Color::RED },
        ScissorFill { rect: tr, color: Color::GREEN },
        ScissorFill { rect: bl, color: Color::BLUE },
        ScissorFill { rect: br, color: Color::YELLOW },
    ]
}

impl Exercise for Quadrants {
    fn name(&self) -> &str {
        "quadrants"
    }

    fn clear_color(&self) -> Color {
        Color::BLACK
    }

    fn update(&mut self, _time: FrameTime, input: &InputFrame) -> ExerciseControl {
        control_for(input)
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.last_viewport != Some(ctx.viewport) {
            let side = ctx.viewport.square().w;
            log::debug!("quadrant canvas {side}x{side}");
            self.last_viewport = Some(ctx.viewport);
        }

        self.fills.render(ctx, target, &quadrant_fills(ctx.viewport));
    }
}
