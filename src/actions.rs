//! Async flows triggered by the views
//!
//! Each flow issues at most one request at a time and writes the outcome
//! into [`AuthState`] or [`ChatState`]. Errors are returned to the caller,
//! which logs them.

use leptos::prelude::*;

use crate::api::BrainApi;
use crate::document::check_upload;
use crate::state::{AuthState, ChatState};
use crate::types::*;
use crate::types::Result;

pub async fn login<A: BrainApi>(
    api: &A,
    auth: &AuthState,
    credentials: &LoginCredentials,
) -> Result<()> {
    let resp = api.login(credentials).await?;
    auth.set_token(resp.token);
    tracing::info!("Signed in as {}", credentials.email);
    Ok(())
}

pub async fn signup<A: BrainApi>(
    api: &A,
    auth: &AuthState,
    credentials: &SignupCredentials,
) -> Result<()> {
    let resp = api.signup(credentials).await?;
    auth.set_token(resp.token);
    tracing::info!("Created account for {}", credentials.email);
    Ok(())
}

/// Drop the session and everything tied to it.
pub fn logout(auth: &AuthState, chat: &ChatState) {
    auth.clear_token();
    chat.clear_chat();
}

/// Reload the active document from the backend.
pub async fn refresh_status<A: BrainApi>(api: &A, chat: &ChatState) -> Result<()> {
    let epoch = chat.epoch();
    let status = api.chat_status().await?;
    if chat.is_current(epoch) {
        chat.apply_status(&status);
    }
    Ok(())
}

/// Upload a PDF/DOCX and adopt the resulting document status.
///
/// Unsupported files are rejected before any request is made. A result
/// that arrives after the chat was cleared is dropped.
pub async fn upload_document<A: BrainApi>(api: &A, chat: &ChatState, file: &A::File) -> Result<()> {
    let kind = check_upload(file)?;
    if chat.is_loading.get_untracked() {
        return Ok(());
    }

    let epoch = chat.epoch();
    chat.is_loading.set(true);
    let result: Result<DocumentResponse> = async {
        let uploaded = api.upload_file(file).await?;
        tracing::info!(
            "Uploaded {} ({}): {}",
            uploaded.filename,
            kind.mime(),
            uploaded.data.message
        );
        api.chat_status().await
    }
    .await;

    if !chat.is_current(epoch) {
        tracing::debug!("Dropping upload result from a cleared chat");
        return Ok(());
    }
    chat.is_loading.set(false);

    chat.apply_status(&result?);
    Ok(())
}

/// Ask about the active document.
///
/// Returns `Ok(false)` without touching the transcript when no question
/// can be sent: no document, blank input, or a request already in flight.
/// Also returns `Ok(false)` when the chat was cleared while waiting for
/// the answer; the answer is then dropped.
pub async fn ask_question<A: BrainApi>(api: &A, chat: &ChatState, input: &str) -> Result<bool> {
    let is_loading = chat.is_loading.get_untracked();
    let Some(question) = chat
        .session
        .with_untracked(|s| s.submittable_question(input, is_loading))
    else {
        return Ok(false);
    };

    let epoch = chat.epoch();
    chat.is_loading.set(true);
    chat.add_message(ChatMessage::user(question.clone()));

    let result = api.ask(&question).await;
    if !chat.is_current(epoch) {
        tracing::debug!("Dropping answer for a cleared chat");
        return Ok(false);
    }
    chat.is_loading.set(false);

    let resp = result?;
    chat.add_message(ChatMessage::bot(resp.answer));
    Ok(true)
}

/// Delete the active document, then reset the chat.
pub async fn remove_document<A: BrainApi>(api: &A, chat: &ChatState) -> Result<()> {
    api.delete_file().await?;
    chat.clear_chat();
    Ok(())
}
