//! Client-side application state for the room view.

use crate::game::Outcome;
use crate::session::Session;
use crossterm::event::KeyCode;
use tracing::debug;

/// State behind the terminal client: the session plus display strings.
pub struct App {
    session: Session,
    share_line: String,
    status: String,
    notice: Option<String>,
}

impl App {
    /// Creates the client state around a joined session.
    pub fn new(session: Session, share_line: String) -> Self {
        let mut app = Self {
            session,
            share_line,
            status: String::new(),
            notice: None,
        };
        app.refresh_status();
        app
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Line describing how the second player joins.
    pub fn share_line(&self) -> &str {
        &self.share_line
    }

    /// Persistent status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// One-shot result notice, if a game just concluded.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Drains pending snapshots from the store into local state.
    pub async fn pump(&mut self) {
        while let Some(snapshot) = self.session.try_snapshot() {
            if let Some(result) = self.session.apply(snapshot).await {
                self.set_notice(result);
            }
        }
        self.refresh_status();
    }

    /// Handles a key press. Returns `true` when the client should quit.
    pub async fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('r') => {
                self.session.reset().await;
                self.notice = None;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let cell = c as usize - '1' as usize;
                debug!(cell, "cell key pressed");
                if let Some(result) = self.session.play(cell).await {
                    self.set_notice(result);
                }
            }
            _ => {}
        }
        self.refresh_status();
        false
    }

    fn set_notice(&mut self, result: Outcome) {
        self.notice = Some(match result {
            Outcome::Won(mark) => format!("{} wins!", mark),
            Outcome::Draw => "It's a draw!".to_string(),
        });
    }

    fn refresh_status(&mut self) {
        let state = self.session.state();
        self.status = if !self.session.connected() {
            "Sync ended. Restart the client to reconnect.".to_string()
        } else {
            match state.winner {
                Some(Outcome::Won(mark)) => {
                    format!("{} wins! Press 'r' for a rematch or 'q' to quit.", mark)
                }
                Some(Outcome::Draw) => {
                    "It's a draw! Press 'r' for a rematch or 'q' to quit.".to_string()
                }
                None => format!(
                    "{} to move. Press 1-9 to place a mark.",
                    state.mark_to_move()
                ),
            }
        };
    }
}
