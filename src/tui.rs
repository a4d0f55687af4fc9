//! TUI (Terminal User Interface) front-end for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! - `EnteringGuess`: the player types a message and submits it with ENTER,
//!   while a countdown runs for the current prompt
//! - `GameOver`: the result is shown until any key is pressed

use crate::display::{footer, gallows, guessed_letters_line, outcome_message, result_message};
use crate::game_state::{BoardView, GuessOutcome};
use crate::session::{GameInterface, GameSummary, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_INPUT_LEN: usize = 24;
const GALLOWS_PANEL_WIDTH: u16 = 15;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WARNING_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    /// Result is on screen - waiting for a key before handing control back
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a BoardView>,
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
    seconds_left: Option<u64>,
}

/// Main TUI interface component.
///
/// Owns the terminal for the lifetime of one game; the terminal is restored
/// on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<BoardView>,
    current_input: String,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
    seconds_left: Option<u64>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            view: None,
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
            seconds_left: None,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            current_input: &self.current_input,
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
            seconds_left: self.seconds_left,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(9),    // Gallows + word
                Constraint::Length(4), // Messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_PANEL_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0]);
        Self::render_gallows(f, board[0], ctx.view);
        Self::render_word(f, board[1], ctx);
        Self::render_messages(f, chunks[2], ctx.message, ctx.error_message);
        Self::render_status(f, chunks[3], ctx);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, view: Option<&BoardView>) {
        let lines: Vec<Line> = view
            .map(|v| gallows(v.remaining_attempts).into_iter().map(Line::from).collect())
            .unwrap_or_default();
        let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(view) = ctx.view {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(view.revealed.clone(), WORD_STYLE),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(format!("  {}", guessed_letters_line(view))));
        }

        if ctx.state == TuiState::EnteringGuess {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  Your guess: ", HEADER_STYLE),
                Span::raw(format!("{}_", ctx.current_input)),
            ]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Word").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines = Vec::new();
        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut spans = Vec::new();
        if let Some(view) = ctx.view {
            spans.push(Span::styled(footer(view), HEADER_STYLE));
            if !ctx.status.is_empty() {
                spans.push(Span::styled(format!(" | {}", ctx.status), HEADER_STYLE));
            }
        } else {
            spans.push(Span::styled(ctx.status, HEADER_STYLE));
        }
        if let Some(seconds) = ctx.seconds_left {
            let style = if seconds <= 10 { WARNING_STYLE } else { HEADER_STYLE };
            spans.push(Span::styled(format!(" | Time left: {seconds}s"), style));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type a letter | ENTER: Submit | BACKSPACE: Erase | ESC: Quit",
            TuiState::GameOver => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self, poll_timeout: Duration) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(poll_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Resize(_, _) => {
                Ok(None)
            }
            Event::Paste(_) => {
                debug_log!("handle_input() - Ignoring paste event");
                Ok(None)
            }
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }

                // Garbage from escape sequences when alt-tabbing
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }

                match self.state {
                    TuiState::EnteringGuess => Ok(self.handle_guess_input(key)),
                    TuiState::GameOver => Ok(Some(UserAction::Exit)),
                }
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let has_alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if has_ctrl => {
                info_log!("handle_guess_input() - Ctrl-C pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Char(_) if has_ctrl || has_alt => None,
            KeyCode::Char(c) if self.current_input.chars().count() < MAX_INPUT_LEN => {
                self.current_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess: {:?}", guess);
                Some(UserAction::Guess(guess))
            }
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            _ => None,
        }
    }

    /// Block until any key is pressed (or input fails).
    fn wait_for_key(&mut self) {
        loop {
            match self.handle_input(Duration::from_millis(EVENT_POLL_TIMEOUT_MS)) {
                Ok(Some(_)) => return,
                Ok(None) => {}
                Err(e) => {
                    debug_log!("wait_for_key() - Input error: {}", e);
                    return;
                }
            }
        }
    }
}

/// Whole seconds left, rounded up so the display never shows 0 early.
fn ceil_seconds(left: Duration) -> u64 {
    left.as_secs() + u64::from(left.subsec_nanos() > 0)
}

impl GameInterface for TuiInterface {
    fn display_board(&mut self, view: &BoardView) {
        self.view = Some(view.clone());
        self.draw_or_log();
    }

    fn read_guess(&mut self, wait: Duration) -> UserAction {
        self.state = TuiState::EnteringGuess;
        self.current_input.clear();
        self.status.clear();
        let deadline = Instant::now() + wait;

        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                info_log!("read_guess() - Wait window expired");
                self.seconds_left = None;
                return UserAction::TimedOut;
            }
            self.seconds_left = Some(ceil_seconds(left));
            self.draw_or_log();

            let poll = left.min(Duration::from_millis(EVENT_POLL_TIMEOUT_MS));
            match self.handle_input(poll) {
                Ok(Some(action)) => {
                    self.seconds_left = None;
                    return action;
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_guess() - Input error: {}", e);
                    return UserAction::Exit;
                }
            }
        }
    }

    fn display_outcome(&mut self, outcome: GuessOutcome, guess: &str) {
        let Some(text) = outcome_message(outcome, guess) else {
            return;
        };
        if outcome == GuessOutcome::Correct {
            self.message = text;
            self.error_message.clear();
        } else {
            self.message.clear();
            self.error_message = text;
        }
        self.draw_or_log();
    }

    fn display_result(&mut self, summary: &GameSummary) {
        self.state = TuiState::GameOver;
        self.seconds_left = None;
        self.error_message.clear();
        self.message = result_message(summary.status, &summary.secret_word);
        self.status = format!("Game over - {}", summary.status);
        self.draw_or_log();
        self.wait_for_key();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn view() -> BoardView {
        BoardView {
            remaining_attempts: 3,
            revealed: "_ a _".to_string(),
            label: Some("Easy".to_string()),
            guessed_letters: vec!['a', 'q', 'x', 'z'],
        }
    }

    fn render_to_string(ctx: &RenderContext) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| TuiInterface::render_static(f, ctx))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_shows_board_and_footer() {
        let view = view();
        let ctx = RenderContext {
            view: Some(&view),
            current_input: "b",
            state: TuiState::EnteringGuess,
            message: "",
            error_message: "Sorry, `z` is not in the word.",
            status: "",
            seconds_left: Some(42),
        };
        let screen = render_to_string(&ctx);

        assert!(screen.contains("HANGMAN"));
        assert!(screen.contains("_ a _"));
        assert!(screen.contains("Guessed letters: a, q, x, z"));
        assert!(screen.contains("Your guess: b_"));
        assert!(screen.contains("Tries remaining: 3 | Difficulty: Easy"));
        assert!(screen.contains("Time left: 42s"));
        assert!(screen.contains("is not in the word"));
    }

    #[test]
    fn test_render_game_over_hides_input() {
        let view = view();
        let ctx = RenderContext {
            view: Some(&view),
            current_input: "",
            state: TuiState::GameOver,
            message: "You lost. The word was `cat`.",
            error_message: "",
            status: "Game over - lost",
            seconds_left: None,
        };
        let screen = render_to_string(&ctx);

        assert!(!screen.contains("Your guess"));
        assert!(screen.contains("The word was `cat`."));
        assert!(screen.contains("Press any key to exit"));
    }

    #[test]
    fn test_render_status_follows_footer_when_board_shown() {
        let view = view();
        let ctx = RenderContext {
            view: Some(&view),
            current_input: "",
            state: TuiState::GameOver,
            message: "",
            error_message: "",
            status: "Game over - lost",
            seconds_left: None,
        };
        let screen = render_to_string(&ctx);

        assert!(screen.contains("Tries remaining: 3 | Difficulty: Easy | Game over - lost"));
    }

    #[test]
    fn test_render_without_board_shows_status() {
        let ctx = RenderContext {
            view: None,
            current_input: "",
            state: TuiState::EnteringGuess,
            message: "",
            error_message: "",
            status: "Ready to start",
            seconds_left: None,
        };
        assert!(render_to_string(&ctx).contains("Ready to start"));
    }

    #[test]
    fn test_ceil_seconds() {
        assert_eq!(ceil_seconds(Duration::from_millis(59_001)), 60);
        assert_eq!(ceil_seconds(Duration::from_secs(60)), 60);
        assert_eq!(ceil_seconds(Duration::from_millis(1)), 1);
    }
}
