//! Global application state

use std::sync::Arc;

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use parking_lot::Mutex;

use crate::config::ClientConfig;
use crate::types::{ChatMessage, DocumentResponse, DocumentStatus};

// ============= Token persistence =============

/// Where the session token survives page reloads
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser local storage
pub struct LocalTokenStore {
    key: &'static str,
}

impl LocalTokenStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get(self.key).ok()
    }

    fn save(&self, token: &str) {
        if let Err(e) = LocalStorage::set(self.key, token) {
            tracing::warn!("Failed to persist session token: {}", e);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(self.key);
    }
}

/// Process-local store, used off the browser
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    fn save(&self, token: &str) {
        *self.slot.lock() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock() = None;
    }
}

// ============= Auth state =============

/// Bearer token holder
#[derive(Clone)]
pub struct AuthState {
    /// Current token, `None` when signed out
    pub token: RwSignal<Option<String>>,
    store: Arc<dyn TokenStore>,
}

impl AuthState {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load().filter(|t| !t.is_empty());
        Self {
            token: RwSignal::new(token),
            store,
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.store.save(&token);
        self.token.set(Some(token));
    }

    pub fn clear_token(&self) {
        self.store.clear();
        self.token.set(None);
    }

    /// Token without subscribing the caller to changes
    pub fn current_token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.with(|t| t.as_deref().is_some_and(|t| !t.is_empty()))
    }
}

// ============= Chat state =============

/// Transcript plus the active document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    document: DocumentStatus,
}

impl ChatSession {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn document(&self) -> &DocumentStatus {
        &self.document
    }

    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn set_document_status(&mut self, present: bool, display_name: Option<String>) {
        self.document = DocumentStatus {
            present,
            display_name,
        };
    }

    pub fn apply_status(&mut self, status: &DocumentResponse) {
        self.set_document_status(status.file, status.file_name().map(str::to_string));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.document = DocumentStatus::default();
    }

    /// The question to send for `input`, if one may be sent at all.
    pub fn submittable_question(&self, input: &str, is_loading: bool) -> Option<String> {
        if !self.document.present || is_loading || input.trim().is_empty() {
            return None;
        }
        Some(input.to_string())
    }
}

/// Reactive handle on the chat session
#[derive(Clone, Copy)]
pub struct ChatState {
    pub session: RwSignal<ChatSession>,
    /// Set while an upload or question is in flight
    pub is_loading: RwSignal<bool>,
    /// Bumped on every clear; results from an older epoch are dropped
    epoch: RwSignal<u64>,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(ChatSession::default()),
            is_loading: RwSignal::new(false),
            epoch: RwSignal::new(0),
        }
    }

    /// Identifies the session an in-flight request belongs to.
    pub fn epoch(&self) -> u64 {
        self.epoch.get_untracked()
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get_untracked() == epoch
    }

    pub fn add_message(&self, message: ChatMessage) {
        self.session.update(|s| s.add_message(message));
    }

    pub fn set_document_status(&self, present: bool, display_name: Option<String>) {
        self.session
            .update(|s| s.set_document_status(present, display_name));
    }

    pub fn apply_status(&self, status: &DocumentResponse) {
        self.session.update(|s| s.apply_status(status));
    }

    pub fn clear_chat(&self) {
        self.session.update(ChatSession::clear);
        self.is_loading.set(false);
        self.epoch.update(|e| *e += 1);
    }

    pub fn has_document(&self) -> bool {
        self.session.with(|s| s.document().present)
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

// ============= App state =============

/// Global application state
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub auth: AuthState,
    pub chat: ChatState,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        let store = Arc::new(LocalTokenStore::new(config.token_key));
        Self::with_store(config, store)
    }

    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        Self {
            config,
            auth: AuthState::new(store),
            chat: ChatState::new(),
        }
    }
}
