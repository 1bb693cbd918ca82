use crate::{
    config::DelayLength,
    dsp::delay::DelayLine,
    graph::node::{GraphNode, RenderCtx},
};

/// Single-tap interpolated delay rendered in place.
///
/// The buffer is sized for `max_delay_ms` the first time the node renders
/// (or when the sample rate changes), never on every block.
pub struct DelayNode {
    delay_line: Option<DelayLine>,
    built_for: f32,
    delay_ms: f32,
    max_delay_ms: f32,
}

impl DelayNode {
    pub fn new(delay_ms: f32, max_delay_ms: f32) -> Self {
        let max_delay_ms = max_delay_ms.max(0.0);
        Self {
            delay_line: None,
            built_for: 0.0,
            delay_ms: delay_ms.clamp(0.0, max_delay_ms),
            max_delay_ms,
        }
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    /// Takes effect at the next block.
    pub fn set_delay_ms(&mut self, delay_ms: f32) {
        self.delay_ms = delay_ms.clamp(0.0, self.max_delay_ms);
    }

    fn line_for(&mut self, ctx: &RenderCtx) -> &mut DelayLine {
        let needed = ctx.ms_to_samples(self.max_delay_ms).ceil() as isize + 2;
        if self.built_for != ctx.sample_rate {
            self.delay_line = None;
            self.built_for = ctx.sample_rate;
        }
        self.delay_line
            .get_or_insert_with(|| DelayLine::new(needed, 1, ctx.sample_rate))
    }
}

impl GraphNode for DelayNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let length = DelayLength::Millis(self.delay_ms);
        let line = self.line_for(ctx);
        let applied = line.set_delay(0, length);
        debug_assert!(applied.is_ok(), "single-tap line lost tap 0");
        line.render(out);
    }

    fn reset(&mut self) {
        if let Some(line) = self.delay_line.as_mut() {
            line.clear();
        }
    }
}
