//! Surface that records draw commands instead of rasterizing them

use serde::Serialize;

use super::{Paint, Path, Surface, SurfaceSize};

/// A recorded surface operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize { size: SurfaceSize },
    Clear,
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { angle: f64 },
    Fill { path: Path, paint: Paint },
}

/// Records every call made against it
///
/// Useful for tests and traces: it tracks the save/restore depth so
/// unbalanced state handling is observable.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
    unmatched_restores: usize,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, keeping size and depth
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded fills
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
            .count()
    }

    /// Number of recorded clears
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear))
            .count()
    }

    /// Open `save` calls not yet restored
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest nesting seen so far
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Every save restored and no restore without a save
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.unmatched_restores == 0
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
        self.commands.push(DrawCommand::Resize { size });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            self.unmatched_restores += 1;
        } else {
            self.depth -= 1;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate { angle });
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            paint: paint.clone(),
        });
    }
}
