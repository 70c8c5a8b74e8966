//! Timed text panels drawn over the sketch
//!
//! A [`TextPanel`] fades in, holds, and fades out. Panels are configured with
//! a [`PanelConfig`] builder and collected in a [`PanelStack`] that the render
//! loop drains each frame.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Position anchor for overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

/// Configuration for a text panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Where the panel is anchored on screen
    pub anchor: OverlayAnchor,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Margin from viewport edge in pixels
    pub margin: usize,
    /// Space between the border and the text
    pub padding: usize,
    /// Background color in ARGB format (alpha in high byte)
    pub background: u32,
    /// Text color in ARGB format
    pub text_color: u32,
    pub fade_in: Duration,
    /// How long the panel stays fully visible; `None` until dismissed
    pub hold: Option<Duration>,
    pub fade_out: Duration,
}

impl PanelConfig {
    /// Create a new panel config with the given anchor and dimensions
    pub fn new(anchor: OverlayAnchor, width: usize, height: usize) -> Self {
        Self {
            anchor,
            width,
            height,
            margin: 10,
            padding: 8,
            background: 0xE0202020, // 88% alpha dark gray
            text_color: 0xFFE0E0E0,
            fade_in: Duration::from_millis(150),
            hold: Some(Duration::from_millis(1500)),
            fade_out: Duration::from_millis(400),
        }
    }

    /// Set the margin (builder pattern)
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// Set the padding (builder pattern)
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Set the background color (builder pattern)
    pub fn with_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    /// Set the text color (builder pattern)
    pub fn with_text_color(mut self, text_color: u32) -> Self {
        self.text_color = text_color;
        self
    }

    /// Set the fade timings (builder pattern)
    pub fn with_timing(mut self, fade_in: Duration, hold: Option<Duration>, fade_out: Duration) -> Self {
        self.fade_in = fade_in;
        self.hold = hold;
        self.fade_out = fade_out;
        self
    }

    /// Size the panel to fit `lines` of text in a monospaced font
    pub fn fit_text<S: AsRef<str>>(mut self, lines: &[S], char_width: f32, line_height: usize) -> Self {
        let longest = lines
            .iter()
            .map(|l| l.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        self.width = (longest as f32 * char_width).ceil() as usize + self.padding * 2;
        self.height = lines.len() * line_height + self.padding * 2;
        self
    }

    /// Calculate screen position from anchor and viewport dimensions
    pub fn compute_bounds(&self, viewport_width: usize, viewport_height: usize) -> OverlayBounds {
        let x = match self.anchor {
            OverlayAnchor::TopLeft | OverlayAnchor::BottomLeft => self.margin,
            OverlayAnchor::TopRight | OverlayAnchor::BottomRight => {
                viewport_width.saturating_sub(self.width + self.margin)
            }
            OverlayAnchor::Center => viewport_width.saturating_sub(self.width) / 2,
        };

        let y = match self.anchor {
            OverlayAnchor::TopLeft | OverlayAnchor::TopRight => self.margin,
            OverlayAnchor::BottomLeft | OverlayAnchor::BottomRight => {
                viewport_height.saturating_sub(self.height + self.margin)
            }
            OverlayAnchor::Center => viewport_height.saturating_sub(self.height) / 2,
        };

        OverlayBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Computed overlay bounds (screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayBounds {
    /// X position in pixels
    pub x: usize,
    /// Y position in pixels
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl OverlayBounds {
    /// Get the right edge X coordinate
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Get the bottom edge Y coordinate
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }
}

/// Lifecycle phase of a text panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    FadingIn,
    Showing,
    FadingOut,
    Finished,
}

/// A short-lived block of text on screen
#[derive(Debug, Clone)]
pub struct TextPanel {
    lines: Vec<String>,
    config: PanelConfig,
    started: Instant,
    /// Set once `dismiss` was called: when fade-out began and from which opacity
    dismissed: Option<(Instant, f32)>,
    tag: Option<&'static str>,
}

impl TextPanel {
    /// Create a panel that starts fading in at `now`
    pub fn new(lines: Vec<String>, config: PanelConfig, now: Instant) -> Self {
        Self {
            lines,
            config,
            started: now,
            dismissed: None,
            tag: None,
        }
    }

    /// Create a panel from newline-separated text
    pub fn from_text(text: &str, config: PanelConfig, now: Instant) -> Self {
        Self::new(text.lines().map(str::to_string).collect(), config, now)
    }

    /// Tag the panel so a [`PanelStack`] can find it again (builder pattern)
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Start fading out now, from whatever opacity the panel has
    pub fn dismiss(&mut self, now: Instant) {
        if self.dismissed.is_none() {
            let from = self.opacity(now);
            self.dismissed = Some((now, from));
        }
    }

    /// Where in its lifecycle the panel is at `now`
    pub fn phase(&self, now: Instant) -> PanelPhase {
        if let Some((at, _)) = self.dismissed {
            return if now.saturating_duration_since(at) < self.config.fade_out {
                PanelPhase::FadingOut
            } else {
                PanelPhase::Finished
            };
        }

        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < self.config.fade_in {
            return PanelPhase::FadingIn;
        }
        let Some(hold) = self.config.hold else {
            return PanelPhase::Showing;
        };
        let shown = elapsed - self.config.fade_in;
        if shown < hold {
            PanelPhase::Showing
        } else if shown - hold < self.config.fade_out {
            PanelPhase::FadingOut
        } else {
            PanelPhase::Finished
        }
    }

    /// Opacity in `0.0..=1.0` at `now`
    pub fn opacity(&self, now: Instant) -> f32 {
        if let Some((at, from)) = self.dismissed {
            return from * (1.0 - ratio(now.saturating_duration_since(at), self.config.fade_out));
        }

        let elapsed = now.saturating_duration_since(self.started);
        match self.phase(now) {
            PanelPhase::FadingIn => ratio(elapsed, self.config.fade_in),
            PanelPhase::Showing => 1.0,
            PanelPhase::FadingOut => {
                let hold = self.config.hold.unwrap_or_default();
                let into_fade = elapsed.saturating_sub(self.config.fade_in + hold);
                1.0 - ratio(into_fade, self.config.fade_out)
            }
            PanelPhase::Finished => 0.0,
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.phase(now) == PanelPhase::Finished
    }
}

/// `part / whole` clamped to `0.0..=1.0`; a zero-length span counts as complete
fn ratio(part: Duration, whole: Duration) -> f32 {
    if whole.is_zero() {
        return 1.0;
    }
    (part.as_secs_f32() / whole.as_secs_f32()).clamp(0.0, 1.0)
}

/// Live panels, oldest first
#[derive(Debug, Default)]
pub struct PanelStack {
    panels: Vec<TextPanel>,
}

impl PanelStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, panel: TextPanel) {
        self.panels.push(panel);
    }

    /// Replace any live panel with the same tag, or add it
    pub fn replace_tagged(&mut self, panel: TextPanel) {
        if let Some(tag) = panel.tag() {
            self.panels.retain(|p| p.tag() != Some(tag));
        }
        self.panels.push(panel);
    }

    /// Whether a not yet dismissed panel with `tag` is on screen
    pub fn is_showing(&self, tag: &str) -> bool {
        self.panels
            .iter()
            .any(|p| p.tag() == Some(tag) && p.dismissed.is_none())
    }

    /// Start fading out every panel with `tag`
    pub fn dismiss_tagged(&mut self, tag: &str, now: Instant) {
        for panel in self.panels.iter_mut().filter(|p| p.tag() == Some(tag)) {
            panel.dismiss(now);
        }
    }

    /// Drop finished panels; returns whether any are still animating
    pub fn prune(&mut self, now: Instant) -> bool {
        self.panels.retain(|p| !p.is_finished(now));
        !self.panels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextPanel> {
        self.panels.iter()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Blend a source pixel (with alpha) onto a destination pixel
///
/// Both colors are in ARGB format. The source alpha determines
/// the blend ratio.
#[inline]
pub fn blend_pixel(src: u32, dst: u32) -> u32 {
    let alpha = (src >> 24) & 0xFF;
    if alpha == 0 {
        return dst;
    }
    if alpha == 255 {
        return src | 0xFF000000;
    }

    let inv_alpha = 255 - alpha;

    let r = ((((src >> 16) & 0xFF) * alpha + ((dst >> 16) & 0xFF) * inv_alpha) / 255) & 0xFF;
    let g = ((((src >> 8) & 0xFF) * alpha + ((dst >> 8) & 0xFF) * inv_alpha) / 255) & 0xFF;
    let b = (((src & 0xFF) * alpha + (dst & 0xFF) * inv_alpha) / 255) & 0xFF;

    0xFF000000 | (r << 16) | (g << 8) | b
}

/// Multiply the alpha channel of an ARGB color by `opacity`
#[inline]
pub fn scale_alpha(color: u32, opacity: f32) -> u32 {
    let alpha = ((color >> 24) & 0xFF) as f32 * opacity.clamp(0.0, 1.0);
    ((alpha.round() as u32) << 24) | (color & 0x00FFFFFF)
}

/// Render an overlay background with alpha blending
pub fn render_overlay_background(
    buffer: &mut [u32],
    bounds: &OverlayBounds,
    background: u32,
    buffer_width: usize,
    buffer_height: usize,
) {
    let y_end = bounds.bottom().min(buffer_height);
    let x_end = bounds.right().min(buffer_width);

    for py in bounds.y..y_end {
        for px in bounds.x..x_end {
            let idx = py * buffer_width + px;
            if let Some(pixel) = buffer.get_mut(idx) {
                *pixel = blend_pixel(background, *pixel);
            }
        }
    }
}

/// Render a 1px border around overlay bounds
pub fn render_overlay_border(
    buffer: &mut [u32],
    bounds: &OverlayBounds,
    border_color: u32,
    buffer_width: usize,
    buffer_height: usize,
) {
    let y_end = bounds.bottom().min(buffer_height);
    let x_end = bounds.right().min(buffer_width);
    let bottom_y = y_end.saturating_sub(1);
    let right_x = x_end.saturating_sub(1);

    let mut plot = |px: usize, py: usize| {
        if let Some(pixel) = buffer.get_mut(py * buffer_width + px) {
            *pixel = blend_pixel(border_color, *pixel);
        }
    };

    if bounds.y < buffer_height {
        for px in bounds.x..x_end {
            plot(px, bounds.y);
        }
    }
    if bottom_y > bounds.y && bottom_y < buffer_height {
        for px in bounds.x..x_end {
            plot(px, bottom_y);
        }
    }
    if bounds.x < buffer_width {
        for py in bounds.y..y_end {
            plot(bounds.x, py);
        }
    }
    if right_x > bounds.x && right_x < buffer_width {
        for py in bounds.y..y_end {
            plot(right_x, py);
        }
    }
}

/// Draw a panel at its current opacity.
///
/// `draw_text(buffer, x, y, line, color)` renders one line of text with its
/// top-left corner at `(x, y)`; lines are `line_height` pixels apart.
pub fn render_panel<F>(
    buffer: &mut [u32],
    buffer_width: usize,
    buffer_height: usize,
    panel: &TextPanel,
    now: Instant,
    line_height: usize,
    mut draw_text: F,
) where
    F: FnMut(&mut [u32], usize, usize, &str, u32),
{
    let opacity = panel.opacity(now);
    if opacity <= 0.0 {
        return;
    }

    let config = panel.config();
    let bounds = config.compute_bounds(buffer_width, buffer_height);
    render_overlay_background(
        buffer,
        &bounds,
        scale_alpha(config.background, opacity),
        buffer_width,
        buffer_height,
    );
    render_overlay_border(
        buffer,
        &bounds,
        scale_alpha(config.text_color, opacity * 0.5),
        buffer_width,
        buffer_height,
    );

    let color = scale_alpha(config.text_color, opacity);
    let x = bounds.x + config.padding;
    for (i, line) in panel.lines().iter().enumerate() {
        let y = bounds.y + config.padding + i * line_height;
        if y + line_height > bounds.bottom() {
            break;
        }
        draw_text(buffer, x, y, line, color);
    }
}
