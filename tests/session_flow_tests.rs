use std::cell::{Cell, RefCell};
use std::sync::Arc;

use async_trait::async_trait;
use leptos::prelude::*;
use serde_json::json;
use tokio::sync::Notify;

use brain_ui::actions;
use brain_ui::api::BrainApi;
use brain_ui::config::ClientConfig;
use brain_ui::document::{UploadSource, DOCX_MIME, PDF_MIME};
use brain_ui::guard::{self, RouteAccess, CHAT_PATH, LOGIN_PATH};
use brain_ui::state::{AppState, MemoryTokenStore, TokenStore};
use brain_ui::types::*;
use brain_ui::types::Result;

// ============= Mock API =============

/// File picked in a test
struct MockFile {
    name: &'static str,
    mime: &'static str,
}

impl UploadSource for MockFile {
    fn file_name(&self) -> String {
        self.name.to_string()
    }

    fn mime_type(&self) -> String {
        self.mime.to_string()
    }
}

/// Backend double that records every call
#[derive(Default)]
struct MockApi {
    calls: RefCell<Vec<&'static str>>,
    questions: RefCell<Vec<String>>,
    failing: Vec<&'static str>,
    stored_file: RefCell<Option<String>>,
    answers: Cell<usize>,
    /// When set, `ask` and `upload_file` wait for a notification
    gate: Option<Notify>,
}

impl MockApi {
    fn new() -> Self {
        Self::default()
    }

    /// Every call named here answers with a 500
    fn failing(calls: &[&'static str]) -> Self {
        Self {
            failing: calls.to_vec(),
            ..Self::default()
        }
    }

    /// Holds answers and uploads until `release` is called
    fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::default()
        }
    }

    fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }

    fn with_stored_file(name: &str) -> Self {
        let api = Self::new();
        *api.stored_file.borrow_mut() = Some(name.to_string());
        api
    }

    fn record(&self, call: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if self.failing.contains(&call) {
            return Err(ClientError::Http {
                status: 500,
                message: format!("{} failed", call),
            });
        }
        Ok(())
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

fn token_response(token: &str) -> AuthResponse {
    serde_json::from_value(json!({ "token": token, "token_type": "bearer" })).unwrap()
}

#[async_trait(?Send)]
impl BrainApi for MockApi {
    type File = MockFile;

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        self.record("login")?;
        if credentials.password != "correct-horse" {
            return Err(ClientError::Http {
                status: 401,
                message: "Invalid email or password".to_string(),
            });
        }
        Ok(token_response("login-token"))
    }

    async fn signup(&self, credentials: &SignupCredentials) -> Result<AuthResponse> {
        self.record("signup")?;
        assert_eq!(credentials.password, credentials.confirm_password);
        Ok(token_response("signup-token"))
    }

    async fn upload_file(&self, file: &MockFile) -> Result<FileUploadResponse> {
        self.record("upload_file")?;
        self.wait_for_gate().await;
        *self.stored_file.borrow_mut() = Some(file.name.to_string());
        Ok(serde_json::from_value(json!({
            "filename": file.name,
            "data": { "message": "File processed" }
        }))
        .unwrap())
    }

    async fn chat_status(&self) -> Result<DocumentResponse> {
        self.record("chat_status")?;
        let body = match self.stored_file.borrow().as_deref() {
            Some(name) => json!({
                "file": true,
                "data": {
                    "doc_id": "doc-1",
                    "extra_info": {
                        "file_name": name,
                        "file_type": "application/pdf",
                        "file_size": 1024,
                        "creation_date": "2024-03-01T10:00:00"
                    }
                }
            }),
            None => json!({ "file": false, "data": null }),
        };
        Ok(serde_json::from_value(body).unwrap())
    }

    async fn ask(&self, question: &str) -> Result<AnswerResponse> {
        self.record("ask")?;
        self.wait_for_gate().await;
        self.questions.borrow_mut().push(question.to_string());
        self.answers.set(self.answers.get() + 1);
        Ok(AnswerResponse {
            answer: format!("answer {}", self.answers.get()),
        })
    }

    async fn delete_file(&self) -> Result<()> {
        self.record("delete_file")?;
        *self.stored_file.borrow_mut() = None;
        Ok(())
    }
}

// ============= Helpers =============

fn app_state() -> (AppState, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::default());
    let state = AppState::with_store(ClientConfig::with_api_base("http://test"), store.clone());
    (state, store)
}

fn transcript(state: &AppState) -> Vec<(MessageRole, String)> {
    state.chat.session.with_untracked(|s| {
        s.messages()
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect()
    })
}

fn document(state: &AppState) -> DocumentStatus {
    state.chat.session.with_untracked(|s| s.document().clone())
}

async fn state_with_document(api: &MockApi) -> AppState {
    let (state, _) = app_state();
    let file = MockFile { name: "handbook.pdf", mime: PDF_MIME };
    actions::upload_document(api, &state.chat, &file).await.unwrap();
    state
}

// ============= Auth flows =============

#[tokio::test]
async fn test_login_then_logout_round_trip() {
    let api = MockApi::new();
    let (state, store) = app_state();
    assert_eq!(
        guard::protected(state.auth.current_token().as_deref()),
        RouteAccess::Redirect(LOGIN_PATH)
    );

    let creds = LoginCredentials {
        email: "ada@example.com".to_string(),
        password: "correct-horse".to_string(),
    };
    actions::login(&api, &state.auth, &creds).await.unwrap();

    assert!(state.auth.is_authenticated());
    assert_eq!(store.load().as_deref(), Some("login-token"));
    let token = state.auth.current_token();
    assert_eq!(guard::protected(token.as_deref()), RouteAccess::Allow);
    assert_eq!(guard::public_only(token.as_deref()), RouteAccess::Redirect(CHAT_PATH));

    // some chat activity before signing out
    state.chat.set_document_status(true, Some("a.pdf".to_string()));
    state.chat.add_message(ChatMessage::user("hello"));

    actions::logout(&state.auth, &state.chat);

    assert!(!state.auth.is_authenticated());
    assert_eq!(store.load(), None);
    assert!(transcript(&state).is_empty());
    assert_eq!(document(&state), DocumentStatus::default());
    assert_eq!(guard::protected(None), RouteAccess::Redirect(LOGIN_PATH));
}

#[tokio::test]
async fn test_rejected_login_stays_signed_out() {
    let api = MockApi::new();
    let (state, store) = app_state();
    let creds = LoginCredentials {
        email: "ada@example.com".to_string(),
        password: "wrong-password".to_string(),
    };

    let err = actions::login(&api, &state.auth, &creds).await.unwrap_err();

    assert!(matches!(err, ClientError::Http { status: 401, .. }));
    assert!(!state.auth.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_signup_stores_token() {
    let api = MockApi::new();
    let (state, _) = app_state();
    let creds = SignupCredentials {
        email: "ada@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
    };

    actions::signup(&api, &state.auth, &creds).await.unwrap();

    assert_eq!(api.calls(), vec!["signup"]);
    assert_eq!(state.auth.current_token().as_deref(), Some("signup-token"));
}

#[test]
fn test_token_survives_reload() {
    let store = Arc::new(MemoryTokenStore::with_token("persisted"));
    let state = AppState::with_store(ClientConfig::with_api_base("http://test"), store);
    assert!(state.auth.is_authenticated());
    assert_eq!(state.auth.current_token().as_deref(), Some("persisted"));
}

// ============= Document flows =============

#[tokio::test]
async fn test_status_refresh_picks_up_existing_document() {
    let api = MockApi::with_stored_file("earlier.docx");
    let (state, _) = app_state();

    actions::refresh_status(&api, &state.chat).await.unwrap();

    assert_eq!(
        document(&state),
        DocumentStatus {
            present: true,
            display_name: Some("earlier.docx".to_string()),
        }
    );
}

#[tokio::test]
async fn test_status_refresh_without_document() {
    let api = MockApi::new();
    let (state, _) = app_state();
    state.chat.set_document_status(true, Some("stale.pdf".to_string()));

    actions::refresh_status(&api, &state.chat).await.unwrap();

    assert_eq!(document(&state), DocumentStatus::default());
}

#[tokio::test]
async fn test_upload_rejects_unsupported_type_without_request() {
    let api = MockApi::new();
    let (state, _) = app_state();

    for (name, mime) in [
        ("notes.txt", "text/plain"),
        ("legacy.doc", "application/msword"),
        ("scan.png", "image/png"),
        ("unknown", ""),
    ] {
        let file = MockFile { name, mime };
        let err = actions::upload_document(&api, &state.chat, &file)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedFileType(_)), "{name}");
    }

    assert!(api.calls().is_empty());
    assert!(!state.chat.is_loading.get_untracked());
    assert_eq!(document(&state), DocumentStatus::default());
}

#[tokio::test]
async fn test_upload_then_status_refresh() {
    let api = MockApi::new();
    let (state, _) = app_state();
    let file = MockFile { name: "contract.docx", mime: DOCX_MIME };

    actions::upload_document(&api, &state.chat, &file).await.unwrap();

    assert_eq!(api.calls(), vec!["upload_file", "chat_status"]);
    assert!(!state.chat.is_loading.get_untracked());
    assert_eq!(
        document(&state),
        DocumentStatus {
            present: true,
            display_name: Some("contract.docx".to_string()),
        }
    );
}

#[tokio::test]
async fn test_failed_upload_clears_loading() {
    let api = MockApi::failing(&["upload_file"]);
    let (state, _) = app_state();
    let file = MockFile { name: "paper.pdf", mime: PDF_MIME };

    let err = actions::upload_document(&api, &state.chat, &file)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Http { status: 500, .. }));
    assert_eq!(api.calls(), vec!["upload_file"]);
    assert!(!state.chat.is_loading.get_untracked());
    assert!(!state.chat.has_document());
}

#[tokio::test]
async fn test_remove_document_clears_chat() {
    let api = MockApi::new();
    let state = state_with_document(&api).await;
    actions::ask_question(&api, &state.chat, "Summarize it").await.unwrap();

    actions::remove_document(&api, &state.chat).await.unwrap();

    assert_eq!(api.calls().last(), Some(&"delete_file"));
    assert!(transcript(&state).is_empty());
    assert_eq!(document(&state), DocumentStatus::default());
}

#[tokio::test]
async fn test_failed_delete_keeps_document() {
    let api = MockApi::failing(&["delete_file"]);
    let state = state_with_document(&api).await;

    assert!(actions::remove_document(&api, &state.chat).await.is_err());

    assert!(state.chat.has_document());
    assert_eq!(document(&state).display_name.as_deref(), Some("handbook.pdf"));
}

// ============= Question flows =============

#[tokio::test]
async fn test_question_without_document_is_noop() {
    let api = MockApi::new();
    let (state, _) = app_state();

    let sent = actions::ask_question(&api, &state.chat, "What is this about?")
        .await
        .unwrap();

    assert!(!sent);
    assert!(api.calls().is_empty());
    assert!(transcript(&state).is_empty());
}

#[tokio::test]
async fn test_blank_question_is_noop() {
    let api = MockApi::new();
    let state = state_with_document(&api).await;
    let before = api.calls().len();

    for input in ["", "   ", "\n\t"] {
        let sent = actions::ask_question(&api, &state.chat, input).await.unwrap();
        assert!(!sent);
    }

    assert_eq!(api.calls().len(), before);
    assert!(transcript(&state).is_empty());
}

#[tokio::test]
async fn test_question_while_loading_is_noop() {
    let api = MockApi::new();
    let state = state_with_document(&api).await;
    state.chat.is_loading.set(true);

    let sent = actions::ask_question(&api, &state.chat, "Anything?").await.unwrap();

    assert!(!sent);
    assert!(api.questions.borrow().is_empty());
    assert!(transcript(&state).is_empty());
}

#[tokio::test]
async fn test_questions_append_in_order() {
    let api = MockApi::new();
    let state = state_with_document(&api).await;

    for q in ["First?", "Second?", "Third?"] {
        assert!(actions::ask_question(&api, &state.chat, q).await.unwrap());
    }

    assert_eq!(
        transcript(&state),
        vec![
            (MessageRole::User, "First?".to_string()),
            (MessageRole::Bot, "answer 1".to_string()),
            (MessageRole::User, "Second?".to_string()),
            (MessageRole::Bot, "answer 2".to_string()),
            (MessageRole::User, "Third?".to_string()),
            (MessageRole::Bot, "answer 3".to_string()),
        ]
    );
    assert_eq!(*api.questions.borrow(), vec!["First?", "Second?", "Third?"]);
    assert!(!state.chat.is_loading.get_untracked());
}

#[tokio::test]
async fn test_failed_question_keeps_user_turn() {
    let api = MockApi::failing(&["ask"]);
    let state = state_with_document(&api).await;

    let err = actions::ask_question(&api, &state.chat, "Will this fail?")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Http { status: 500, .. }));
    assert_eq!(
        transcript(&state),
        vec![(MessageRole::User, "Will this fail?".to_string())]
    );
    assert!(!state.chat.is_loading.get_untracked());
}

// ============= Logout during requests =============

#[tokio::test]
async fn test_logout_drops_answer_in_flight() {
    let api = MockApi::gated();
    let (state, _) = app_state();
    state.auth.set_token("tok-1");
    state.chat.set_document_status(true, Some("handbook.pdf".to_string()));

    let (sent, _) = tokio::join!(
        actions::ask_question(&api, &state.chat, "Still there?"),
        async {
            assert!(state.chat.is_loading.get_untracked());
            actions::logout(&state.auth, &state.chat);
            assert!(!state.chat.is_loading.get_untracked());
            api.release();
        }
    );

    assert!(!sent.unwrap());
    assert_eq!(api.calls(), vec!["ask"]);
    assert!(transcript(&state).is_empty());
    assert!(!state.chat.is_loading.get_untracked());
    assert!(!state.auth.is_authenticated());
}

#[tokio::test]
async fn test_logout_drops_upload_in_flight() {
    let api = MockApi::gated();
    let (state, _) = app_state();
    state.auth.set_token("tok-1");
    let file = MockFile { name: "late.pdf", mime: PDF_MIME };

    let (uploaded, _) = tokio::join!(
        actions::upload_document(&api, &state.chat, &file),
        async {
            actions::logout(&state.auth, &state.chat);
            api.release();
        }
    );

    uploaded.unwrap();
    assert_eq!(api.calls(), vec!["upload_file", "chat_status"]);
    assert_eq!(document(&state), DocumentStatus::default());
    assert!(!state.chat.is_loading.get_untracked());
}

#[tokio::test]
async fn test_chat_usable_after_dropped_answer() {
    let api = MockApi::gated();
    let (state, _) = app_state();
    state.chat.set_document_status(true, Some("handbook.pdf".to_string()));

    let (first, _) = tokio::join!(
        actions::ask_question(&api, &state.chat, "First?"),
        async {
            state.chat.clear_chat();
            api.release();
        }
    );
    assert!(!first.unwrap());

    state.chat.set_document_status(true, Some("handbook.pdf".to_string()));
    api.release();
    assert!(actions::ask_question(&api, &state.chat, "Second?").await.unwrap());

    assert_eq!(
        transcript(&state),
        vec![
            (MessageRole::User, "Second?".to_string()),
            (MessageRole::Bot, "answer 2".to_string()),
        ]
    );
}
