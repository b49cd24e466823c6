// App state and main event loop.
// Owns the comment feed, the list cursor, and keyboard input handling.

use std::io;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::ListState};

use crate::api::{Comment, RemoteSource};
use crate::cache::CommentStore;
use crate::error::Result;
use crate::state::{CommentFeed, ImageChooser};
use crate::ui;

/// Main application state.
pub struct App {
    remote: Arc<dyn RemoteSource>,
    store: CommentStore,
    feed: CommentFeed,
    endpoint: String,
    /// Cursor in the comment list.
    pub list_state: ListState,
    /// Open image prompt, if any.
    pub chooser: Option<ImageChooser>,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Latest one-line notice for the status bar.
    pub notice: Option<String>,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        store: CommentStore,
        feed: CommentFeed,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            store,
            feed,
            endpoint: endpoint.into(),
            list_state: ListState::default(),
            chooser: None,
            show_help: false,
            notice: None,
            should_quit: false,
        }
    }

    pub fn feed(&self) -> &CommentFeed {
        &self.feed
    }

    /// URL of the comments being browsed.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.feed.start();
        while !self.should_quit {
            self.sync_selection();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Persist anything still pending before exit.
    pub async fn shutdown(&self) -> Result<()> {
        self.feed.flush().await
    }

    /// Poll for terminal events without blocking the redraw for long.
    #[allow(clippy::collapsible_if)]
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

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.chooser.is_some() {
            self.handle_chooser_key(key);
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(comment) = self.selected_comment() {
                    self.on_profile_click(&comment);
                }
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    fn handle_chooser_key(&mut self, key: KeyEvent) {
        let Some(chooser) = self.chooser.as_mut() else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.chooser = None,
            KeyCode::Enter => self.confirm_chooser(),
            KeyCode::Backspace => chooser.pop(),
            KeyCode::Char('u') if ctrl => chooser.clear(),
            KeyCode::Char('c') if ctrl => {
                self.chooser = None;
                self.should_quit = true;
            }
            KeyCode::Char(c) if !ctrl => chooser.push(c),
            _ => {}
        }
    }

    /// Avatar activated on a row: ask for an image for that comment.
    pub fn on_profile_click(&mut self, comment: &Comment) {
        let selections = self.feed.selections();
        let current = comment.id.and_then(|id| selections.get(id));
        match ImageChooser::for_comment(comment, current) {
            Some(chooser) => self.chooser = Some(chooser),
            None => self.notice = Some("This comment has no id to attach an image to".to_string()),
        }
    }

    /// Close the prompt and record its image. An empty prompt changes nothing.
    fn confirm_chooser(&mut self) {
        let Some(chooser) = self.chooser.take() else {
            return;
        };
        match chooser.finish() {
            Some(image) => {
                self.notice = Some(format!("Avatar set for #{}", chooser.comment_id));
                self.feed.select_image(chooser.comment_id, Some(image));
            }
            None => self.notice = Some("No image chosen".to_string()),
        }
    }

    /// Start a new fetch cycle with a fresh feed. Chosen images carry over.
    pub fn reload(&mut self) {
        let selections = self.feed.selections();
        let persistence = self.feed.persistence();
        // Replacing the feed drops the old one, which cancels its fetch.
        self.feed = CommentFeed::new(
            Arc::clone(&self.remote),
            self.store.clone(),
            persistence,
            selections,
        );
        self.feed.start();
        self.notice = Some("Reloading comments".to_string());
        tracing::info!("reload requested");
    }

    /// The comment under the cursor, if the list is showing.
    pub fn selected_comment(&self) -> Option<Comment> {
        let index = self.list_state.selected()?;
        self.feed.state().comments()?.get(index).cloned()
    }

    /// Keep the cursor inside the current list.
    pub fn sync_selection(&mut self) {
        let len = self.feed.state().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    fn select_next(&mut self) {
        let len = self.feed.state().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= len - 1 => i, // Stay at end
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.feed.state().len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_first(&mut self) {
        if self.feed.state().len() > 0 {
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.feed.state().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }
}
