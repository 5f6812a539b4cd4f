//! Full-screen terminal chat over one session.
//!
//! Deliberately small: a transcript pane, a one-line input, and a
//! blocking ask on Enter. Remote failures are rendered into the
//! transcript so the screen survives a flaky endpoint.

use crate::agents::session::Session;
use crate::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Position};
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};

struct App {
    session: Session,
    transcript: Vec<Line<'static>>,
    input: String,
}

impl App {
    fn new(session: Session) -> Self {
        Self {
            session,
            transcript: vec![Line::from("Type a prompt and press Enter. Esc quits.").dim()],
            input: String::new(),
        }
    }

    fn submit(&mut self) {
        let prompt = std::mem::take(&mut self.input);
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return;
        }

        self.transcript
            .push(Line::from(format!("> {}", prompt)).bold());

        // Blocking on purpose: one in-flight ask per session
        match self.session.ask(prompt) {
            Ok(reply) => {
                for line in reply.lines() {
                    self.transcript.push(Line::from(line.to_string()));
                }
            }
            Err(err) => {
                self.transcript
                    .push(Line::from(format!("error: {}", err)).red());
            }
        }
        self.transcript.push(Line::from(""));
    }

    fn draw(&self, frame: &mut Frame) {
        let [transcript_area, input_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(frame.area());

        let visible = transcript_area.height.saturating_sub(2) as usize;
        let scroll = self.transcript.len().saturating_sub(visible) as u16;

        let transcript = Paragraph::new(self.transcript.clone())
            .block(Block::default().borders(Borders::ALL).title("agent-relay"))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(transcript, transcript_area);

        let input = Paragraph::new(self.input.as_str())
            .block(Block::default().borders(Borders::ALL).title("Ask something..."));
        frame.render_widget(input, input_area);

        frame.set_cursor_position(Position::new(
            input_area.x + 1 + self.input.len() as u16,
            input_area.y + 1,
        ));
    }
}

/// Run the chat interface until the user quits. The terminal is restored
/// before returning, whatever happened inside the loop.
pub fn run(session: Session) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, App::new(session));
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Enter => app.submit(),
                KeyCode::Backspace => {
                    app.input.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.input.push(c)
                }
                _ => {}
            }
        }
    }
}
