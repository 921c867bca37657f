use crate::game::Game;
use crate::layout::Point;
use crate::renderer::{Input, Renderer};
use crate::scene::{self, DrawCmd, Paint, Scene};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

fn color(paint: Paint) -> Color {
    match paint {
        Paint::Board => Color::Rgb { r: 255, g: 248, b: 220 },
        Paint::Border => Color::Rgb { r: 245, g: 222, b: 179 },
        Paint::Dot => Color::Rgb { r: 160, g: 82, b: 45 },
        Paint::Human => Color::Rgb { r: 65, g: 105, b: 225 },
        Paint::HumanLit => Color::Rgb { r: 176, g: 196, b: 222 },
        Paint::Computer => Color::Rgb { r: 220, g: 20, b: 60 },
        Paint::ComputerLit => Color::Rgb { r: 255, g: 182, b: 193 },
        Paint::Tie => Color::Black,
    }
}

/// Character-cell raster of a [`Scene`]. Layout units are terminal cells.
struct Frame {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl Frame {
    fn new(width: usize, height: usize) -> Self {
        let blank = Glyph {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        };
        Self {
            width,
            height,
            glyphs: vec![blank; width * height],
        }
    }

    fn at(&mut self, x: i64, y: i64) -> Option<&mut Glyph> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(&mut self.glyphs[y as usize * self.width + x as usize])
    }

    fn put(&mut self, x: i64, y: i64, ch: char, fg: Color) {
        if let Some(glyph) = self.at(x, y) {
            glyph.ch = ch;
            glyph.fg = fg;
        }
    }

    fn fill(&mut self, left: f64, top: f64, right: f64, bottom: f64, bg: Color) {
        for y in top.round() as i64..bottom.round() as i64 {
            for x in left.round() as i64..right.round() as i64 {
                if let Some(glyph) = self.at(x, y) {
                    glyph.ch = ' ';
                    glyph.bg = bg;
                }
            }
        }
    }

    fn line(&mut self, from: Point, to: Point, fg: Color) {
        let (x0, y0) = (from.x.round() as i64, from.y.round() as i64);
        let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
        if y0 == y1 {
            for x in x0.min(x1)..=x0.max(x1) {
                self.put(x, y0, '─', fg);
            }
        } else {
            for y in y0.min(y1)..=y0.max(y1) {
                self.put(x0, y, '│', fg);
            }
        }
    }

    fn text(&mut self, text: &str, at: Point, fg: Color) {
        let len = text.chars().count() as i64;
        let start = at.x.round() as i64 - len / 2;
        let y = at.y.round() as i64;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i64, y, ch, fg);
        }
    }

    fn draw(&mut self, scene: &Scene) {
        for cmd in &scene.commands {
            match cmd {
                DrawCmd::FillRect { rect, paint } => {
                    self.fill(rect.left, rect.top, rect.right, rect.bottom, color(*paint))
                }
                DrawCmd::StrokeRect { rect, paint } => {
                    let fg = color(*paint);
                    // Snap outwards onto whole cells, inside the last row and column.
                    let (left, top) = (rect.left.floor(), rect.top.floor());
                    let (right, bottom) = (rect.right.ceil() - 1.0, rect.bottom.ceil() - 1.0);
                    self.line(Point::new(left, top), Point::new(right, top), fg);
                    self.line(Point::new(left, bottom), Point::new(right, bottom), fg);
                    self.line(Point::new(left, top), Point::new(left, bottom), fg);
                    self.line(Point::new(right, top), Point::new(right, bottom), fg);
                }
                DrawCmd::Line { from, to, paint } => self.line(*from, *to, color(*paint)),
                DrawCmd::Dot { center, paint, .. } => {
                    self.put(center.x.round() as i64, center.y.round() as i64, '●', color(*paint))
                }
                DrawCmd::Text { text, at, paint, .. } => self.text(text, *at, color(*paint)),
            }
        }
    }
}

pub struct CliRenderer {
    last_render: Instant,
    target_frame_time: Duration,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            last_render: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
        }
    }

    fn flush_frame(&self, frame: &Frame, stdout: &mut io::Stdout) -> io::Result<()> {
        for y in 0..frame.height {
            queue!(stdout, cursor::MoveTo(0, y as u16))?;
            let mut current: Option<(Color, Color)> = None;
            for glyph in &frame.glyphs[y * frame.width..(y + 1) * frame.width] {
                if current != Some((glyph.fg, glyph.bg)) {
                    queue!(
                        stdout,
                        SetForegroundColor(glyph.fg),
                        SetBackgroundColor(glyph.bg)
                    )?;
                    current = Some((glyph.fg, glyph.bg));
                }
                queue!(stdout, Print(glyph.ch))?;
            }
            queue!(stdout, ResetColor)?;
        }

        queue!(
            stdout,
            cursor::MoveTo(0, frame.height as u16 + 1),
            Print("Move the mouse to pick a line, click to draw it | Q to quit")
        )?;
        Ok(())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }

        self.last_render = Instant::now();

        let scene = scene::compose(game);
        let mut frame = Frame::new(scene.width.ceil() as usize, scene.height.ceil() as usize);
        frame.draw(&scene);

        let mut stdout = io::stdout();
        self.flush_frame(&frame, &mut stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(Duration::from_millis(5))? {
            return Ok(None);
        }
        let input = match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Input::Quit)
                }
                _ => None,
            },
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let at = Point::new(column as f64, row as f64);
                match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        Some(Input::PointerMove(at))
                    }
                    MouseEventKind::Down(MouseButton::Left) => Some(Input::Click(at)),
                    _ => None,
                }
            }
            _ => None,
        };
        Ok(input)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
