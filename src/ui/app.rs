use crate::error::GameError;
use crate::game::{Engine, EventLog, GameEvent, GamePhase, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::{error, info};

pub struct App {
    engine: Engine,
    events: EventLog,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(mut engine: Engine) -> Self {
        let events = EventLog::new();
        engine.subscribe(events.clone());
        App {
            engine,
            events,
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.start();

        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    fn start(&mut self) {
        if let Err(err) = self.engine.start_game() {
            error!(error = %err, "could not start game");
        }
        let player = self.engine.current_turn().clone();
        self.engine.hover_entered(&player, self.selected_column);
        self.apply_events();
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.engine.close_session();
                self.should_quit = true;
            }
            KeyCode::Left if self.selected_column > 0 => {
                self.move_selection(self.selected_column - 1);
            }
            KeyCode::Right if self.selected_column + 1 < COLS => {
                self.move_selection(self.selected_column + 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.engine.reset_session();
                self.selected_column = COLS / 2;
                self.start();
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
        self.apply_events();
    }

    fn move_selection(&mut self, column: usize) {
        let player = self.engine.current_turn().clone();
        self.engine.hover_exited(&player, self.selected_column);
        self.selected_column = column;
        self.engine.hover_entered(&player, column);
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.engine.phase() == GamePhase::Finished {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        let player = self.engine.current_turn().clone();
        match self.engine.request_move(&player, self.selected_column) {
            // Column-full and game results arrive as events.
            Ok(_) | Err(GameError::ColumnFull { .. }) => {}
            Err(err) => {
                error!(error = %err, "move failed");
                self.message = Some(err.to_string());
            }
        }
    }

    /// Turn engine notifications into the status line.
    fn apply_events(&mut self) {
        for event in self.events.drain() {
            match event {
                GameEvent::GameStarted => {
                    self.message = Some(format!("{} to move", self.engine.current_turn().name()));
                }
                GameEvent::TurnChanged(player) => {
                    self.message = Some(format!("{} to move", player.name()));
                }
                GameEvent::ColumnFull(_) => {
                    self.message = Some("Column is full!".to_string());
                }
                GameEvent::GameOverWinner(player) => {
                    info!(winner = %player, "showing result");
                    self.message = Some(format!("{} wins!", player.name()));
                }
                GameEvent::GameTied => {
                    self.message = Some("It's a draw!".to_string());
                }
                GameEvent::PiecePlaced { .. }
                | GameEvent::HoverEntered { .. }
                | GameEvent::HoverExited { .. }
                | GameEvent::SessionClosed => {}
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.engine, self.selected_column, &self.message);
    }
}
