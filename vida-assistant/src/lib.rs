//! Conversational assistant core for the VIDA NL site.
//!
//! The assistant keeps a linear transcript of messages in a pluggable
//! [`Store`], and answers each user message with a [`Responder`] that prefers
//! a remote reply endpoint and falls back to a fixed, ordered set of keyword
//! rules whenever that endpoint is missing, failing, slow or silent.
//!
//! # Example
//!
//! ```ignore
//! use vida_assistant::{MemoryStore, Responder, Transcript};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transcript = Transcript::restore(MemoryStore::new());
//!     let mut responder = Responder::local(transcript);
//!
//!     let exchange = responder.send("¿Cuáles son los próximos eventos?").await.unwrap();
//!     println!("{}", exchange.reply.content);
//! }
//! ```

mod markup;
mod message;
mod remote;
mod responder;
mod rules;
mod store;
mod suggestion;
mod transcript;

pub use markup::{Inline, escape_html, parse_inline, to_html};
pub use message::{Message, Role};
pub use remote::{HistoryEntry, NoRemote, ReplyContext, ReplyError, ReplyRequest, ReplySource};
pub use responder::{
    DEFAULT_REPLY_TIMEOUT, Exchange, PendingReply, ReplyOrigin, ReplyResolver, Resolution,
    Responder, SendState,
};
pub use rules::{Intent, Rule, RuleSet};
pub use store::{MemoryStore, Store};
pub use suggestion::{DEFAULT_SUGGESTIONS, Suggestion, find_suggestion};
pub use transcript::{CLEARED_GREETING, DEFAULT_GREETING, DEFAULT_STORAGE_KEY, Transcript};
