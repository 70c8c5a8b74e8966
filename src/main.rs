use anyhow::{Context as _, Result};
use clap::Parser;
use fontdue::{Font, FontSettings, Metrics};
use softbuffer::{Context, Surface};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use sketch_keys::cli::CliArgs;
use sketch_keys::config::SketchConfig;
use sketch_keys::keymap::{key_event_from_winit, sketch_bindings, KeyHandler};
use sketch_keys::overlay::{render_panel, PanelStack, TextPanel};
use sketch_keys::platform::Platform;
use sketch_keys::sketch::{self, Sketch, SketchCmd, SketchMsg};

const BACKGROUND: u32 = 0xFF1E1E1E;
const HELP_TAG: &str = "help";
const MESSAGE_TAG: &str = "message";
/// Frame interval while a panel is animating
const FRAME: Duration = Duration::from_millis(16);

/// Monospace fonts tried when the config names none
const SYSTEM_FONTS: &[&str] = &[
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

// Glyph cache key: (character, font_size as bits)
type GlyphCacheKey = (char, u32);
type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

// ============================================================================
// VIEW - Render the sketch to screen
// ============================================================================

/// Rasterized text for panels
struct TextRenderer {
    font: Font,
    font_size: f32,
    ascent: f32,
    line_height: usize,
    char_width: f32,
    glyph_cache: GlyphCache,
}

impl TextRenderer {
    fn load(path: &Path, font_size: f32) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to load font {}: {}", path.display(), e))?;

        let line_metrics = font
            .horizontal_line_metrics(font_size)
            .ok_or_else(|| anyhow::anyhow!("Font missing horizontal line metrics"))?;

        // 'M' as reference width for monospace
        let (metrics, _) = font.rasterize('M', font_size);

        Ok(Self {
            ascent: line_metrics.ascent,
            line_height: line_metrics.new_line_size.ceil() as usize,
            char_width: metrics.advance_width,
            font,
            font_size,
            glyph_cache: HashMap::new(),
        })
    }

    /// First font that loads: the configured one, then the system list
    fn find(configured: Option<&Path>, font_size: f32) -> Option<Self> {
        let candidates = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load(&path, font_size) {
                Ok(text) => {
                    tracing::info!("Using font {}", path.display());
                    return Some(text);
                }
                Err(e) => tracing::warn!("{:#}", e),
            }
        }

        tracing::warn!("No usable font found, panel text will not be drawn");
        None
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        buffer: &mut [u32],
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        text: &str,
        color: u32,
    ) {
        let mut current_x = x as f32;
        let baseline = y as f32 + self.ascent;
        let opacity = ((color >> 24) & 0xFF) as f32 / 255.0;

        for ch in text.chars() {
            let key = (ch, self.font_size.to_bits());
            let font = &self.font;
            let font_size = self.font_size;
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| font.rasterize(ch, font_size));

            // PositiveYDown: y = -height - ymin
            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let Some(&coverage) = bitmap.get(bitmap_y * metrics.width + bitmap_x) else {
                        continue;
                    };
                    if coverage == 0 {
                        continue;
                    }

                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px < 0 || py < 0 || px as usize >= width || py as usize >= height {
                        continue;
                    }

                    let idx = py as usize * width + px as usize;
                    let alpha = (coverage as f32 / 255.0 * opacity * 255.0) as u32;
                    let src = (alpha << 24) | (color & 0x00FFFFFF);
                    buffer[idx] = sketch_keys::overlay::blend_pixel(src, buffer[idx]);
                }
            }

            current_x += metrics.advance_width;
        }
    }
}

struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
    text: Option<TextRenderer>,
}

impl Renderer {
    fn new(window: Rc<Window>, context: &Context<Rc<Window>>, config: &SketchConfig) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let size = window.inner_size();

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            surface
                .resize(w, h)
                .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        }

        let font_size = config.font_size * scale_factor as f32;
        let text = TextRenderer::find(config.font_path.as_deref(), font_size);

        Ok(Self {
            surface,
            width: size.width,
            height: size.height,
            text,
        })
    }

    /// Character cell used to size panels
    fn cell(&self) -> (f32, usize) {
        self.text
            .as_ref()
            .map(|t| (t.char_width, t.line_height))
            .unwrap_or((8.0, 16))
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface
                .resize(w, h)
                .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        }
        Ok(())
    }

    fn render(&mut self, model: &Sketch, panels: &PanelStack, now: Instant) -> Result<()> {
        let width = self.width as usize;
        let height = self.height as usize;
        if width == 0 || height == 0 {
            return Ok(());
        }

        let Renderer { surface, text, .. } = self;
        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get buffer: {}", e))?;
        buffer.fill(BACKGROUND);

        for dot in &model.dots {
            fill_circle(&mut buffer, width, height, dot.x, dot.y, dot.radius, dot.color);
        }

        // Brush outline, dimmed while the pen is up
        let cursor_color = if model.pen_down {
            model.color()
        } else {
            0x80000000 | (model.color() & 0x00FFFFFF)
        };
        ring(
            &mut buffer,
            width,
            height,
            model.cursor,
            model.brush_size + 2,
            cursor_color,
        );

        let line_height = text.as_ref().map(|t| t.line_height).unwrap_or(16);
        for panel in panels.iter() {
            render_panel(&mut buffer, width, height, panel, now, line_height, |buf, x, y, line, color| {
                if let Some(text) = text.as_mut() {
                    text.draw_text(buf, width, height, x, y, line, color);
                }
            });
        }

        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}

fn fill_circle(buffer: &mut [u32], width: usize, height: usize, cx: i32, cy: i32, radius: u32, color: u32) {
    let r = radius as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                buffer[y as usize * width + x as usize] = color;
            }
        }
    }
}

fn ring(buffer: &mut [u32], width: usize, height: usize, center: (i32, i32), radius: u32, color: u32) {
    let r = radius as i32;
    let (inner, outer) = ((r - 1) * (r - 1), r * r);
    for dy in -r..=r {
        for dx in -r..=r {
            let d = dx * dx + dy * dy;
            if d < inner || d > outer {
                continue;
            }
            let (x, y) = (center.0 + dx, center.1 + dy);
            if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                let idx = y as usize * width + x as usize;
                buffer[idx] = sketch_keys::overlay::blend_pixel(color, buffer[idx]);
            }
        }
    }
}

// ============================================================================
// APP - Event loop glue
// ============================================================================

struct App {
    config: SketchConfig,
    handler: KeyHandler,
    model: Sketch,
    msg_rx: Receiver<SketchMsg>,
    panels: PanelStack,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
}

impl App {
    fn new(config: SketchConfig, handler: KeyHandler, msg_rx: Receiver<SketchMsg>) -> Self {
        let model = Sketch::new(config.window.width, config.window.height);
        Self {
            config,
            handler,
            model,
            msg_rx,
            panels: PanelStack::new(),
            renderer: None,
            window: None,
            context: None,
            modifiers: ModifiersState::empty(),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create context: {}", e))?;
        let renderer = Renderer::new(Rc::clone(&window), &context, &self.config)?;

        self.model.resize(renderer.width, renderer.height);
        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn show_panel(&mut self, lines: Vec<String>, tag: &'static str) {
        let (char_width, line_height) = self
            .renderer
            .as_ref()
            .map(Renderer::cell)
            .unwrap_or((8.0, 16));
        let settings = if tag == HELP_TAG {
            &self.config.help_panel
        } else {
            &self.config.message_panel
        };
        let config = settings
            .to_panel_config()
            .fit_text(&lines, char_width, line_height);
        self.panels
            .replace_tagged(TextPanel::new(lines, config, Instant::now()).with_tag(tag));
    }

    fn process_cmd(&mut self, cmd: SketchCmd, event_loop: &ActiveEventLoop) {
        match cmd {
            SketchCmd::Redraw => {}
            SketchCmd::ShowMessage(text) => self.show_panel(vec![text], MESSAGE_TAG),
            SketchCmd::ToggleHelp => {
                if self.panels.is_showing(HELP_TAG) {
                    self.panels.dismiss_tagged(HELP_TAG, Instant::now());
                } else {
                    let lines = self.handler.usage_lines();
                    self.show_panel(lines, HELP_TAG);
                }
            }
            SketchCmd::Quit => {
                tracing::info!("Quit requested");
                event_loop.exit();
                return;
            }
        }
        self.request_redraw();
    }

    /// Apply everything the key callbacks sent since the last call
    fn process_messages(&mut self, event_loop: &ActiveEventLoop) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(cmd) = sketch::update(&mut self.model, msg) {
                self.process_cmd(cmd, event_loop);
            }
        }
    }

    fn render(&mut self) {
        let now = Instant::now();
        self.panels.prune(now);
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.render(&self.model, &self.panels, now) {
                tracing::error!("Render failed: {:#}", e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to open window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        tracing::warn!("{:#}", e);
                    }
                }
                self.model.resize(size.width, size.height);
                self.request_redraw();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key_event) = key_event_from_winit(&event, self.modifiers) {
                    if self.handler.dispatch(&key_event) {
                        self.process_messages(event_loop);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.process_messages(event_loop);

        // Keep ticking only while a panel is on screen
        if self.panels.prune(Instant::now()) {
            self.request_redraw();
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME));
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}

// ============================================================================
// MAIN - Entry point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    sketch_keys::tracing::init();

    let config = match &args.config {
        Some(path) => SketchConfig::load_from(path)?,
        None => SketchConfig::load(),
    };

    let mut platform = Platform::detect().with_override(config.platform);
    if let Some(os) = args.platform_override() {
        platform.set_override(os);
    }
    tracing::info!(
        os = platform.os_name(),
        class = %platform.os_class(),
        "Platform classified"
    );

    let (msg_tx, msg_rx) = mpsc::channel();
    let mut handler = KeyHandler::new(platform);
    handler.register_all(sketch_bindings(&msg_tx))?;

    if args.print_usage {
        let separator = args.separator.as_deref().unwrap_or(&config.usage_separator);
        println!("{}", handler.usage_text_with_separator(separator));
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, handler, msg_rx);

    event_loop.run_app(&mut app)?;

    Ok(())
}
