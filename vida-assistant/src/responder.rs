use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::message::Message;
use crate::remote::{HistoryEntry, NoRemote, ReplyContext, ReplyError, ReplyRequest, ReplySource};
use crate::rules::RuleSet;
use crate::store::Store;
use crate::suggestion::Suggestion;
use crate::transcript::Transcript;

/// How long a remote reply may take before the local rules answer instead.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(8);

/// Progress of the current send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    /// A user message is in the transcript and its reply is being resolved.
    AwaitingReply,
    /// The reply was appended. Immediately followed by `Idle`.
    Resolved,
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOrigin {
    Remote,
    Fallback,
}

/// The reply chosen for one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub content: String,
    pub origin: ReplyOrigin,
}

/// A user message that has been appended and still awaits its reply.
#[derive(Debug, Clone)]
pub struct PendingReply {
    user: Message,
    request: ReplyRequest,
}

impl PendingReply {
    pub fn user(&self) -> &Message {
        &self.user
    }

    pub fn request(&self) -> &ReplyRequest {
        &self.request
    }
}

/// The pair of messages one successful send appends.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: Message,
    pub reply: Message,
    pub origin: ReplyOrigin,
}

/// Picks a reply for a request: remote first, local rules otherwise.
///
/// Detached from the transcript so it can run on another task while the
/// surface keeps rendering.
pub struct ReplyResolver<R = NoRemote> {
    rules: Arc<RuleSet>,
    remote: Option<Arc<R>>,
    timeout: Duration,
}

impl<R> Clone for ReplyResolver<R> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            remote: self.remote.clone(),
            timeout: self.timeout,
        }
    }
}

impl<R: ReplySource> ReplyResolver<R> {
    /// Resolves a reply. Never fails: every remote problem ends in the rules.
    #[instrument(skip(self, request), fields(remote = self.remote.is_some()))]
    pub async fn resolve(&self, request: &ReplyRequest) -> Resolution {
        if let Some(remote) = &self.remote {
            let outcome = match tokio::time::timeout(self.timeout, remote.fetch_reply(request)).await
            {
                Ok(result) => result,
                Err(_) => Err(ReplyError::Timeout(self.timeout)),
            };

            match outcome {
                Ok(reply) if !reply.trim().is_empty() => {
                    debug!("Using remote reply");
                    return Resolution {
                        content: reply,
                        origin: ReplyOrigin::Remote,
                    };
                }
                Ok(_) => debug!("Remote reply was blank, using fallback rules"),
                Err(e) => warn!(error = %e, "Remote reply unavailable, using fallback rules"),
            }
        }

        Resolution {
            content: self.rules.respond(&request.message).to_string(),
            origin: ReplyOrigin::Fallback,
        }
    }
}

/// Answers user messages and records both sides in the transcript.
///
/// Without a remote (`R = NoRemote`) every reply comes from the rules.
pub struct Responder<S: Store, R = NoRemote> {
    transcript: Transcript<S>,
    resolver: ReplyResolver<R>,
    context: Option<ReplyContext>,
    include_history: bool,
    state: watch::Sender<SendState>,
}

impl<S: Store> Responder<S, NoRemote> {
    /// A responder that never calls out and always uses the local rules.
    pub fn local(transcript: Transcript<S>) -> Self {
        Self::build(transcript, None)
    }
}

impl<S: Store, R: ReplySource> Responder<S, R> {
    /// A responder that asks `remote` first.
    pub fn with_remote(transcript: Transcript<S>, remote: R) -> Self {
        Self::build(transcript, Some(Arc::new(remote)))
    }

    /// Like [`Responder::with_remote`], but a missing remote means local-only.
    pub fn with_optional_remote(transcript: Transcript<S>, remote: Option<R>) -> Self {
        Self::build(transcript, remote.map(Arc::new))
    }

    pub fn with_shared_remote(transcript: Transcript<S>, remote: Arc<R>) -> Self {
        Self::build(transcript, Some(remote))
    }

    fn build(transcript: Transcript<S>, remote: Option<Arc<R>>) -> Self {
        let (state, _) = watch::channel(SendState::Idle);
        Self {
            transcript,
            resolver: ReplyResolver {
                rules: Arc::new(RuleSet::builtin()),
                remote,
                timeout: DEFAULT_REPLY_TIMEOUT,
            },
            context: None,
            include_history: false,
            state,
        }
    }

    /// Tags every remote request with a fixed surface context.
    pub fn with_context(mut self, context: ReplyContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Forwards the transcript along with each remote request.
    pub fn with_history(mut self, include: bool) -> Self {
        self.include_history = include;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.resolver.timeout = timeout;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.resolver.rules = Arc::new(rules);
        self
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.resolver.remote.is_some()
    }

    pub fn transcript(&self) -> &Transcript<S> {
        &self.transcript
    }

    pub fn rules(&self) -> &RuleSet {
        &self.resolver.rules
    }

    pub fn state(&self) -> SendState {
        *self.state.borrow()
    }

    /// Watches the send state, e.g. to show a typing indicator.
    pub fn subscribe(&self) -> watch::Receiver<SendState> {
        self.state.subscribe()
    }

    /// A detached handle that resolves replies for this responder.
    pub fn resolver(&self) -> ReplyResolver<R> {
        self.resolver.clone()
    }

    /// Sends a message and waits for its reply.
    ///
    /// Returns None without touching the transcript when the trimmed input is
    /// empty or another reply is still pending.
    pub async fn send(&mut self, input: &str) -> Option<Exchange> {
        let pending = self.begin(input)?;
        let resolution = self.resolver.resolve(pending.request()).await;
        Some(self.finish(pending, resolution))
    }

    /// Sends the literal prompt of a suggestion.
    pub async fn send_suggestion(&mut self, suggestion: &Suggestion) -> Option<Exchange> {
        self.send(suggestion.prompt).await
    }

    /// First half of a send: validates, appends the user message and enters
    /// [`SendState::AwaitingReply`].
    pub fn begin(&mut self, input: &str) -> Option<PendingReply> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        if self.state() == SendState::AwaitingReply {
            debug!("Ignoring send while a reply is pending");
            return None;
        }

        let user = self.transcript.push_user(text).clone();
        let request = ReplyRequest {
            message: text.to_string(),
            context: self.context.clone(),
            messages: self
                .include_history
                .then(|| self.transcript.iter().map(HistoryEntry::from).collect()),
        };

        self.state.send_replace(SendState::AwaitingReply);
        Some(PendingReply { user, request })
    }

    /// Second half of a send: appends the reply and returns to idle.
    pub fn finish(&mut self, pending: PendingReply, resolution: Resolution) -> Exchange {
        let reply = self.transcript.push_assistant(resolution.content).clone();

        self.state.send_replace(SendState::Resolved);
        self.state.send_replace(SendState::Idle);

        Exchange {
            user: pending.user,
            reply,
            origin: resolution.origin,
        }
    }

    /// Starts a new conversation.
    ///
    /// Does nothing and returns false while a reply is pending, so a late
    /// [`Responder::finish`] can never land after the fresh greeting.
    pub fn clear(&mut self) -> bool {
        if self.state() == SendState::AwaitingReply {
            debug!("Ignoring clear while a reply is pending");
            return false;
        }
        self.transcript.clear();
        self.state.send_replace(SendState::Idle);
        true
    }
}
