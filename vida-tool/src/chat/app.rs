use tokio::sync::oneshot;
use vida_assistant::{
    DEFAULT_SUGGESTIONS, Message, PendingReply, ReplyOrigin, Resolution, Suggestion,
};

use crate::store::AppResponder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Chat,
    /// A reply is being resolved; sending is disabled.
    Waiting,
}

pub struct ChatApp {
    pub mode: AppMode,
    pub should_quit: bool,
    pub responder: AppResponder,
    pub input: String,
    pub cursor_pos: usize,
    pub messages_scroll: u16,
    pub suggestions_open: bool,
    pub last_origin: Option<ReplyOrigin>,
    pending: Option<PendingReply>,
    response_rx: Option<oneshot::Receiver<Resolution>>,
}

impl ChatApp {
    pub fn new(responder: AppResponder) -> Self {
        Self {
            mode: AppMode::Chat,
            should_quit: false,
            responder,
            input: String::new(),
            cursor_pos: 0,
            messages_scroll: 0,
            suggestions_open: true,
            last_origin: None,
            pending: None,
            response_rx: None,
        }
    }

    pub fn suggestions() -> &'static [Suggestion] {
        DEFAULT_SUGGESTIONS
    }

    pub fn messages(&self) -> &[Message] {
        self.responder.transcript().messages()
    }

    pub fn is_waiting(&self) -> bool {
        self.mode == AppMode::Waiting
    }

    pub fn send_message(&mut self) {
        let text = std::mem::take(&mut self.input);
        self.cursor_pos = 0;
        if !self.submit(&text) {
            // Nothing was sent, keep what the user typed
            self.input = text;
            self.cursor_pos = self.input.len();
        }
    }

    pub fn send_suggestion(&mut self, index: usize) {
        if let Some(suggestion) = DEFAULT_SUGGESTIONS.get(index) {
            if self.submit(suggestion.prompt) {
                self.suggestions_open = false;
            }
        }
    }

    /// Appends the user message and resolves its reply on a background task.
    fn submit(&mut self, text: &str) -> bool {
        if self.is_waiting() {
            return false;
        }
        let Some(pending) = self.responder.begin(text) else {
            return false;
        };

        let (tx, rx) = oneshot::channel();
        let resolver = self.responder.resolver();
        let request = pending.request().clone();

        tokio::spawn(async move {
            let resolution = resolver.resolve(&request).await;
            let _ = tx.send(resolution);
        });

        self.pending = Some(pending);
        self.response_rx = Some(rx);
        self.mode = AppMode::Waiting;
        self.messages_scroll = 0;
        true
    }

    pub fn poll_response(&mut self) {
        let Some(rx) = self.response_rx.as_mut() else {
            return;
        };

        let resolution = match rx.try_recv() {
            Ok(resolution) => resolution,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => {
                // The task died before answering; the rules still owe a reply
                let text = self
                    .pending
                    .as_ref()
                    .map(|p| p.request().message.clone())
                    .unwrap_or_default();
                Resolution {
                    content: self.responder.rules().respond(&text).to_string(),
                    origin: ReplyOrigin::Fallback,
                }
            }
        };

        self.response_rx = None;
        if let Some(pending) = self.pending.take() {
            let exchange = self.responder.finish(pending, resolution);
            self.last_origin = Some(exchange.origin);
        }
        self.mode = AppMode::Chat;
        self.messages_scroll = 0;
    }

    pub fn clear_conversation(&mut self) {
        if self.is_waiting() || !self.responder.clear() {
            return;
        }
        self.suggestions_open = true;
        self.last_origin = None;
        self.messages_scroll = 0;
    }

    pub fn toggle_suggestions(&mut self) {
        self.suggestions_open = !self.suggestions_open;
    }

    pub fn scroll_up(&mut self) {
        self.messages_scroll = self.messages_scroll.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.messages_scroll = self.messages_scroll.saturating_sub(1);
    }

    pub fn input_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn input_backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn input_delete(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn input_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor_pos = prev;
        }
    }

    pub fn input_right(&mut self) {
        if let Some(c) = self.input[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }

    pub fn input_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn input_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.input[..self.cursor_pos].chars().count()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}
