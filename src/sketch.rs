//! The demo sketch: a brush that leaves dots on a canvas
//!
//! Key callbacks never touch the model directly. They send [`SketchMsg`]s
//! over a channel and the event loop applies them with [`update`].

/// Direction for brush movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything a key callback can ask the sketch to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchMsg {
    Move(Direction),
    GrowBrush,
    ShrinkBrush,
    TogglePen,
    Clear,
    CycleColor,
    Undo,
    ToggleHelp,
    Quit,
}

/// Side effects for the event loop to perform after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchCmd {
    Redraw,
    /// Redraw and flash a short message panel
    ShowMessage(String),
    ToggleHelp,
    Quit,
}

/// Brush colours, cycled with the colour binding (ARGB)
pub const PALETTE: [(&str, u32); 5] = [
    ("white", 0xFFF0F0F0),
    ("red", 0xFFE06C75),
    ("green", 0xFF98C379),
    ("blue", 0xFF61AFEF),
    ("yellow", 0xFFE5C07B),
];

pub const MIN_BRUSH: u32 = 1;
pub const MAX_BRUSH: u32 = 32;

/// A stamped dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub x: i32,
    pub y: i32,
    pub radius: u32,
    pub color: u32,
}

/// Sketch state
#[derive(Debug, Clone)]
pub struct Sketch {
    pub width: u32,
    pub height: u32,
    pub cursor: (i32, i32),
    pub brush_size: u32,
    pub pen_down: bool,
    pub color_index: usize,
    pub dots: Vec<Dot>,
}

impl Sketch {
    /// A blank canvas with the brush centred, pen down
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cursor: ((width / 2) as i32, (height / 2) as i32),
            brush_size: 4,
            pen_down: true,
            color_index: 0,
            dots: Vec::new(),
        }
    }

    pub fn color(&self) -> u32 {
        PALETTE[self.color_index % PALETTE.len()].1
    }

    pub fn color_name(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()].0
    }

    /// Track a window resize, keeping the brush on the canvas
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        self.cursor.0 = self.cursor.0.clamp(0, max_x);
        self.cursor.1 = self.cursor.1.clamp(0, max_y);
    }

    fn stamp(&mut self) {
        self.dots.push(Dot {
            x: self.cursor.0,
            y: self.cursor.1,
            radius: self.brush_size,
            color: self.color(),
        });
    }
}

/// Apply a message to the sketch
pub fn update(sketch: &mut Sketch, msg: SketchMsg) -> Option<SketchCmd> {
    tracing::debug!(?msg, "sketch update");

    match msg {
        SketchMsg::Move(direction) => {
            let step = (sketch.brush_size * 2).max(2) as i32;
            match direction {
                Direction::Up => sketch.cursor.1 -= step,
                Direction::Down => sketch.cursor.1 += step,
                Direction::Left => sketch.cursor.0 -= step,
                Direction::Right => sketch.cursor.0 += step,
            }
            sketch.clamp_cursor();
            if sketch.pen_down {
                sketch.stamp();
            }
            Some(SketchCmd::Redraw)
        }
        SketchMsg::GrowBrush | SketchMsg::ShrinkBrush => {
            let size = if msg == SketchMsg::GrowBrush {
                sketch.brush_size.saturating_mul(2)
            } else {
                sketch.brush_size / 2
            };
            sketch.brush_size = size.clamp(MIN_BRUSH, MAX_BRUSH);
            Some(SketchCmd::ShowMessage(format!(
                "Brush size {}",
                sketch.brush_size
            )))
        }
        SketchMsg::TogglePen => {
            sketch.pen_down = !sketch.pen_down;
            if sketch.pen_down {
                sketch.stamp();
            }
            let state = if sketch.pen_down { "down" } else { "up" };
            Some(SketchCmd::ShowMessage(format!("Pen {}", state)))
        }
        SketchMsg::Clear => {
            sketch.dots.clear();
            Some(SketchCmd::ShowMessage("Canvas cleared".to_string()))
        }
        SketchMsg::CycleColor => {
            sketch.color_index = (sketch.color_index + 1) % PALETTE.len();
            Some(SketchCmd::ShowMessage(format!(
                "Colour: {}",
                sketch.color_name()
            )))
        }
        SketchMsg::Undo => {
            if sketch.dots.pop().is_some() {
                Some(SketchCmd::Redraw)
            } else {
                Some(SketchCmd::ShowMessage("Nothing to undo".to_string()))
            }
        }
        SketchMsg::ToggleHelp => Some(SketchCmd::ToggleHelp),
        SketchMsg::Quit => Some(SketchCmd::Quit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_stamps_when_pen_down() {
        let mut sketch = Sketch::new(200, 100);
        let start = sketch.cursor;

        let cmd = update(&mut sketch, SketchMsg::Move(Direction::Right));
        assert_eq!(cmd, Some(SketchCmd::Redraw));
        assert_eq!(sketch.cursor, (start.0 + 8, start.1));
        assert_eq!(sketch.dots.len(), 1);
    }

    #[test]
    fn test_move_without_pen_leaves_no_dot() {
        let mut sketch = Sketch::new(200, 100);
        update(&mut sketch, SketchMsg::TogglePen);
        update(&mut sketch, SketchMsg::Move(Direction::Up));
        assert!(sketch.dots.is_empty());
    }

    #[test]
    fn test_cursor_clamped_to_canvas() {
        let mut sketch = Sketch::new(10, 10);
        for _ in 0..10 {
            update(&mut sketch, SketchMsg::Move(Direction::Left));
        }
        assert_eq!(sketch.cursor.0, 0);
    }

    #[test]
    fn test_brush_size_bounds() {
        let mut sketch = Sketch::new(10, 10);
        for _ in 0..10 {
            update(&mut sketch, SketchMsg::GrowBrush);
        }
        assert_eq!(sketch.brush_size, MAX_BRUSH);
        for _ in 0..10 {
            update(&mut sketch, SketchMsg::ShrinkBrush);
        }
        assert_eq!(sketch.brush_size, MIN_BRUSH);
    }

    #[test]
    fn test_cycle_color_wraps() {
        let mut sketch = Sketch::new(10, 10);
        for _ in 0..PALETTE.len() {
            update(&mut sketch, SketchMsg::CycleColor);
        }
        assert_eq!(sketch.color_index, 0);
    }

    #[test]
    fn test_undo_and_clear() {
        let mut sketch = Sketch::new(100, 100);
        update(&mut sketch, SketchMsg::Move(Direction::Down));
        update(&mut sketch, SketchMsg::Move(Direction::Down));
        update(&mut sketch, SketchMsg::Undo);
        assert_eq!(sketch.dots.len(), 1);

        update(&mut sketch, SketchMsg::Clear);
        assert!(sketch.dots.is_empty());
        assert_eq!(
            update(&mut sketch, SketchMsg::Undo),
            Some(SketchCmd::ShowMessage("Nothing to undo".to_string()))
        );
    }
}
