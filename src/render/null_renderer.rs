use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so invalid geometry is caught before a
/// real backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_path_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_line_count = frame.lines.len();
        self.last_path_count = frame.paths.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}

/// Renderer that keeps every validated frame it receives.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<RenderFrame>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames.push(frame.clone());
        Ok(())
    }
}
