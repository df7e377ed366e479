//! HTTP client for the site's remote reply endpoint.
//!
//! [`ReplyClient`] posts the user's message (and optional context tag) to an
//! endpoint such as `/api/chat` and implements the assistant's
//! [`ReplySource`](vida_assistant::ReplySource), so it can be handed straight
//! to a [`Responder`](vida_assistant::Responder).
//!
//! # Example
//!
//! ```ignore
//! use vida_assistant::{MemoryStore, ReplyContext, Responder, Transcript};
//! use vida_remote::ReplyClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ReplyClient::new("https://vidanl.mx/api/chat");
//!     let transcript = Transcript::restore(MemoryStore::new());
//!     let mut responder = Responder::with_remote(transcript, client)
//!         .with_context(ReplyContext::new("sitio_web_vida"));
//!
//!     let exchange = responder.send("Quiero afiliarme").await.unwrap();
//!     println!("{}", exchange.reply.content);
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::ReplyClient;
pub use error::ReplyClientError;
pub use types::ReplyResponse;
