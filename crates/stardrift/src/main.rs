mod background;
mod logging;
mod motion;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};
use stardrift_config::Config;
use stardrift_core::{Motion, Viewport};
use stardrift_field::{PixelCanvas, Schedule, StarField};

use crate::background::{HalfBlocks, ROWS_PER_CELL};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Some(path) = logging::init()? {
        info!("logging to {}", path.display());
    }

    // Read before the terminal is taken over so errors print normally.
    let config = Config::load()?;
    let motion = motion::detect(&config);
    info!("starting stardrift with {motion:?} motion at {} fps", config.fps);

    let terminal = ratatui::init();
    let result = App::new(&config, motion).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The animated background.
    field: StarField<PixelCanvas>,
    /// Canvas held while the field is paused, showing the last frame.
    parked: Option<PixelCanvas>,
    /// Canvas size in pixels for the current terminal size.
    grid: (usize, usize),
    /// Surface pixels per canvas pixel.
    pixel_scale: f32,
    /// Time between frames.
    frame_interval: Duration,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config, motion: Motion) -> Self {
        Self {
            running: false,
            field: StarField::new(config.field_settings(), motion),
            parked: None,
            grid: (0, 0),
            pixel_scale: config.pixel_scale,
            frame_interval: Duration::from_secs(1) / config.fps.max(1),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.activate(size.width, size.height);
        self.running = true;

        let mut next_frame = Instant::now();
        while self.running {
            if self.field.tick() == Schedule::Stopped && self.parked.is_none() {
                // Nothing to animate (no usable surface); just wait for input.
                next_frame = Instant::now() + Duration::from_millis(100);
            }
            terminal.draw(|frame| self.render(frame))?;

            next_frame += self.frame_interval;
            let now = Instant::now();
            if next_frame < now {
                next_frame = now;
            }
            self.handle_crossterm_events(next_frame)?;
        }

        self.field.stop();
        Ok(())
    }

    /// Size a canvas to the terminal and start the field on it.
    fn activate(&mut self, columns: u16, rows: u16) {
        self.grid = (columns as usize, rows as usize * ROWS_PER_CELL);
        let canvas = PixelCanvas::new(self.grid.0, self.grid.1, self.pixel_scale);
        self.field.start(canvas, self.viewport());
    }

    /// Surface size matching the current terminal.
    fn viewport(&self) -> Viewport {
        PixelCanvas::viewport_for(self.grid.0, self.grid.1, self.pixel_scale)
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(canvas) = self.field.surface().or(self.parked.as_ref()) {
            frame.render_widget(HalfBlocks::new(canvas), area);
        }

        if self.parked.is_some() {
            let [_, help_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            let help = Line::from(vec![
                "paused  ".dark_gray(),
                "space".bold().cyan(),
                " resume  ".dark_gray(),
                "s".bold().cyan(),
                " speed  ".dark_gray(),
                "q".bold().cyan(),
                " quit".dark_gray(),
            ])
            .centered();
            frame.render_widget(help, help_area);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Returns once `deadline` passes with no pending events.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, rows) => self.on_resize(columns, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            _ => {}
        }
    }

    /// Resize the running field, or retry activation if it never got a
    /// surface. A paused field picks up the new size when it resumes.
    fn on_resize(&mut self, columns: u16, rows: u16) {
        if !self.field.is_running() && self.parked.is_none() {
            self.activate(columns, rows);
            return;
        }
        self.grid = (columns as usize, rows as usize * ROWS_PER_CELL);
        self.field.resize(self.viewport());
    }

    /// Stop the field and keep its last frame on screen, or resume it.
    fn toggle_pause(&mut self) {
        match self.parked.take() {
            Some(canvas) => self.field.start(Some(canvas), self.viewport()),
            None => self.parked = self.field.stop(),
        }
    }

    /// Switch to the next animation speed and restart the field with it.
    /// A paused field stays paused and picks the speed up on resume.
    fn cycle_speed(&mut self) {
        let mut settings = self.field.settings();
        settings.speed = settings.speed.next();
        info!("animation speed {:?}", settings.speed);

        let surface = self.field.stop();
        self.field = StarField::new(settings, self.field.motion());
        if surface.is_some() {
            self.field.start(surface, self.viewport());
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_core::AnimationSpeed;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let mut app = App::new(&Config::default(), Motion::Full);
        app.running = true;
        app.activate(80, 24);
        app
    }

    #[test]
    fn test_activate_sizes_field_to_terminal() {
        let app = app();
        assert!(app.field.is_running());
        assert_eq!(app.field.viewport(), Viewport::new(480.0, 288.0));
        assert_eq!(app.field.stars().len(), 17);
        let canvas = app.field.surface().unwrap();
        assert_eq!((canvas.columns(), canvas.rows()), (80, 48));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut app = app();
        app.on_key_event(press(KeyCode::Char(' ')));
        assert!(!app.field.is_running());
        assert!(app.parked.is_some());
        assert_eq!(app.field.tick(), Schedule::Stopped);

        app.on_resize(100, 30);
        app.on_key_event(press(KeyCode::Char(' ')));
        assert!(app.field.is_running());
        assert!(app.parked.is_none());
        assert_eq!(app.field.viewport(), Viewport::new(600.0, 360.0));
    }

    #[test]
    fn test_speed_key_restarts_field() {
        let mut app = app();
        app.field.tick();
        assert_eq!(app.field.settings().speed, AnimationSpeed::Medium);

        app.on_key_event(press(KeyCode::Char('s')));
        assert_eq!(app.field.settings().speed, AnimationSpeed::Fast);
        assert!(app.field.is_running());
        assert_eq!(app.field.frame(), 0);
        assert_eq!(app.field.viewport(), Viewport::new(480.0, 288.0));
        assert_eq!(app.field.stars().len(), 17);
        assert!(
            app.field
                .stars()
                .iter()
                .all(|star| (0.015..0.045).contains(&star.rate))
        );

        app.on_key_event(press(KeyCode::Char('s')));
        assert_eq!(app.field.settings().speed, AnimationSpeed::Slow);
    }

    #[test]
    fn test_speed_key_while_paused_applies_on_resume() {
        let mut app = app();
        app.on_key_event(press(KeyCode::Char(' ')));
        app.on_key_event(press(KeyCode::Char('s')));
        assert!(!app.field.is_running());
        assert!(app.parked.is_some());

        app.on_key_event(press(KeyCode::Char(' ')));
        assert!(app.field.is_running());
        assert_eq!(app.field.settings().speed, AnimationSpeed::Fast);
        assert_eq!(app.field.meteors().len(), 3);
    }

    #[test]
    fn test_resize_while_running() {
        let mut app = app();
        app.on_resize(120, 40);
        assert_eq!(app.field.viewport(), Viewport::new(720.0, 480.0));
        assert_eq!(app.field.stars().len(), 43);
    }

    #[test]
    fn test_zero_size_terminal_retries_on_resize() {
        let mut app = App::new(&Config::default(), Motion::Full);
        app.activate(0, 0);
        assert!(!app.field.is_running());
        app.on_resize(40, 10);
        assert!(app.field.is_running());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.on_key_event(press(KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = self::app();
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
