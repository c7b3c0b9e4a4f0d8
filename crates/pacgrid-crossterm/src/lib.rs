//! Crossterm terminal renderer for pacgrid.
//!
//! Provides a [`TermRenderer`] that implements [`pacgrid_core::Observer`],
//! redrawing the grid after every transition of a run, with optional pacing
//! or key-stepping between frames.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pacgrid_core::{Cell, Event, Grid, Observer, Point};

/// Frame pacing and display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// Pause after each frame.
    pub delay: Duration,
    /// Wait for a key press after each frame instead of sleeping.
    pub step_on_key: bool,
    /// Draw visited marks; otherwise visited squares look like open path.
    pub show_overlay: bool,
    /// Colour squares by kind.
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(100),
            step_on_key: false,
            show_overlay: true,
            color: true,
        }
    }
}

/// Line break that also returns the cursor to column 0 in raw mode.
const NEWLINE: &str = "\r\n";

/// Maps a cell to its terminal colour.
fn cell_color(cell: Cell) -> Color {
    match cell {
        Cell::Path => Color::Reset,
        Cell::Wall => Color::DarkBlue,
        Cell::Agent => Color::Yellow,
        Cell::Target => Color::Red,
        Cell::Visited => Color::DarkGrey,
    }
}

/// The cell drawn at `p`, with the overlay hidden unless `show_overlay`.
fn shown_cell(grid: &Grid, p: Point, show_overlay: bool) -> Cell {
    match grid.cell(p) {
        Some(Cell::Visited) if !show_overlay => Cell::Path,
        Some(c) => c,
        None => Cell::Wall,
    }
}

/// An [`Observer`] that draws every transition to a terminal.
///
/// [`Observer::observe`] cannot fail, so the first write error is kept,
/// drawing stops, and [`finish`](Self::finish) returns it.
pub struct TermRenderer<W: Write> {
    out: W,
    config: RenderConfig,
    frames: usize,
    error: Option<io::Error>,
    raw: bool,
    fast_forward: bool,
}

impl TermRenderer<Stdout> {
    /// A renderer on standard output.
    pub fn stdout(config: RenderConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> TermRenderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W, config: RenderConfig) -> Self {
        Self {
            out,
            config,
            frames: 0,
            error: None,
            raw: false,
            fast_forward: false,
        }
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Switch to the alternate screen and hide the cursor. Raw mode is only
    /// entered when stepping on key presses.
    pub fn start(&mut self) -> io::Result<()> {
        if self.config.step_on_key {
            terminal::enable_raw_mode()?;
            self.raw = true;
        }
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.out.flush()
    }

    /// Restore the terminal and hand back the writer, or the first error
    /// hit while drawing.
    pub fn finish(mut self) -> io::Result<W> {
        let restore = self.restore();
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        restore?;
        Ok(self.out)
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        queue!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        self.out.flush()
    }

    /// Draw one frame of `grid` with `status` below it.
    pub fn draw(&mut self, grid: &Grid, status: &str) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        self.write_grid(grid)?;
        queue!(
            self.out,
            Print(format!("targets left: {}", grid.targets().len())),
            Print(NEWLINE),
            Print(status),
            Print(NEWLINE)
        )?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }

    /// The framed grid: a border, one line per row, two columns per square.
    fn write_grid(&mut self, grid: &Grid) -> io::Result<()> {
        let border = format!("+{}+", "-".repeat(grid.width() as usize * 2));
        queue!(self.out, Print(&border), Print(NEWLINE))?;
        for y in 0..grid.height() {
            queue!(self.out, Print('|'))?;
            for x in 0..grid.width() {
                let cell = shown_cell(grid, Point::new(x, y), self.config.show_overlay);
                if self.config.color {
                    queue!(self.out, SetForegroundColor(cell_color(cell)))?;
                }
                queue!(self.out, Print(cell.rune()), Print(' '))?;
            }
            if self.config.color {
                queue!(self.out, ResetColor)?;
            }
            queue!(self.out, Print('|'), Print(NEWLINE))?;
        }
        queue!(self.out, Print(&border), Print(NEWLINE))
    }

    /// Whether `event` changes what is on screen.
    fn is_visible(&self, event: &Event) -> bool {
        match event {
            Event::Expanded(_)
            | Event::Visited(_)
            | Event::Unvisited(_)
            | Event::OverlayReset => {
                self.config.show_overlay
            }
            _ => true,
        }
    }

    fn pause(&mut self) -> io::Result<()> {
        if self.fast_forward {
            return Ok(());
        }
        if self.config.step_on_key {
            return self.wait_key();
        }
        if !self.config.delay.is_zero() {
            thread::sleep(self.config.delay);
        }
        Ok(())
    }

    /// Block until a key is pressed. `q`, Esc or Ctrl-C stop pausing for
    /// the rest of the run.
    fn wait_key(&mut self) -> io::Result<()> {
        loop {
            if let TermEvent::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                let quit = matches!(code, KeyCode::Char('q') | KeyCode::Esc)
                    || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    log::debug!("fast-forwarding to the end of the run");
                    self.fast_forward = true;
                }
                return Ok(());
            }
        }
    }

    fn frame(&mut self, grid: &Grid, event: &Event) -> io::Result<()> {
        if !self.is_visible(event) {
            return Ok(());
        }
        self.draw(grid, &event.to_string())?;
        if matches!(event, Event::Finished { .. }) {
            return Ok(());
        }
        self.pause()
    }
}

impl<W: Write> Observer for TermRenderer<W> {
    fn observe(&mut self, grid: &Grid, event: &Event) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.frame(grid, event) {
            log::warn!("rendering stopped: {e}");
            self.error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(show_overlay: bool) -> RenderConfig {
        RenderConfig {
            delay: Duration::ZERO,
            step_on_key: false,
            show_overlay,
            color: false,
        }
    }

    fn drawn(g: &Grid, config: RenderConfig) -> String {
        let mut r = TermRenderer::new(Vec::new(), config);
        r.draw(g, "status").unwrap();
        String::from_utf8(r.out).unwrap()
    }

    #[test]
    fn frame_has_border_and_runes() {
        let g = Grid::parse("2 0 1\n0 0 3").unwrap();
        let out = drawn(&g, quiet(true));
        assert!(out.contains("+------+\r\n|@ . # |\r\n|. . * |\r\n+------+\r\n"));
        assert!(out.ends_with("targets left: 1\r\nstatus\r\n"));
    }

    #[test]
    fn overlay_can_be_hidden() {
        let mut g = Grid::parse("2 0 3").unwrap();
        g.mark_visited(Point::at(0, 1));
        assert!(drawn(&g, quiet(true)).contains("|@ o * |"));
        assert!(drawn(&g, quiet(false)).contains("|@ . * |"));
    }

    #[test]
    fn colour_wraps_each_square() {
        let g = Grid::parse("2 1 3").unwrap();
        let plain = drawn(&g, quiet(true));
        let coloured = drawn(
            &g,
            RenderConfig {
                color: true,
                ..quiet(true)
            },
        );
        assert!(!plain.contains("\x1b[38;"));
        assert!(coloured.contains("\x1b[38;"));
        assert!(!coloured.contains("|@ # * |"));
        assert!(coloured.contains('#'));
    }

    #[test]
    fn draws_each_visible_event() {
        let g = Grid::parse("2 0 3").unwrap();
        let mut r = TermRenderer::new(Vec::new(), quiet(false));
        r.observe(&g, &Event::Expanded(Point::at(0, 1)));
        assert_eq!(r.frames(), 0);
        r.observe(
            &g,
            &Event::Moved {
                from: Point::at(0, 0),
                to: Point::at(0, 1),
            },
        );
        r.observe(&g, &Event::Finished { done: false });
        assert_eq!(r.frames(), 2);

        let out = String::from_utf8(r.finish().unwrap()).unwrap();
        assert!(out.contains("move (0, 0) -> (0, 1)"));
        assert!(out.contains("targets left: 1"));
        assert!(out.contains('@'));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_is_reported() {
        let g = Grid::parse("2 3").unwrap();
        let mut r = TermRenderer::new(Broken, quiet(true));
        r.observe(&g, &Event::Collected(Point::at(0, 1)));
        r.observe(&g, &Event::Finished { done: true });
        assert_eq!(r.frames(), 0);
        assert!(r.finish().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_from_json() {
        let c: RenderConfig = serde_json::from_str(r#"{"step_on_key":true}"#).unwrap();
        assert!(c.step_on_key);
        assert!(c.show_overlay);
    }
}
