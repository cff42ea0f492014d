//! API client for communicating with the Brain backend

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::config::ClientConfig;
use crate::document::UploadSource;
use crate::state::AppState;
use crate::types::*;

/// Backend operations used by the views
///
/// Futures run on the browser event loop, so they are not `Send`.
#[async_trait(?Send)]
pub trait BrainApi {
    /// File handle accepted by [`BrainApi::upload_file`]
    type File: UploadSource;

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse>;
    async fn signup(&self, credentials: &SignupCredentials) -> Result<AuthResponse>;
    async fn upload_file(&self, file: &Self::File) -> Result<FileUploadResponse>;
    async fn chat_status(&self) -> Result<DocumentResponse>;
    async fn ask(&self, question: &str) -> Result<AnswerResponse>;
    async fn delete_file(&self) -> Result<()>;
}

/// `gloo-net` implementation
#[derive(Debug, Clone)]
pub struct HttpApi {
    config: ClientConfig,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(config: ClientConfig, token: Option<String>) -> Self {
        Self { config, token }
    }

    /// Client carrying the current session token, if any.
    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.config.clone(), state.auth.current_token())
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match bearer_value(self.token.as_deref()) {
            Some(value) => req.header("Authorization", &value),
            None => req,
        }
    }

    async fn post_json<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        tracing::debug!("POST {}", url);
        let req = self
            .authorize(Request::post(&url))
            .header("Content-Type", "application/json")
            .json(body)?;
        let resp = req.send().await?;
        read_json(resp).await
    }
}

/// `Authorization` header value, only for a non-empty token.
fn bearer_value(token: Option<&str>) -> Option<String> {
    token
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {}", t))
}

/// Error for a non-2xx response; the backend's `detail` wins over the
/// status text.
fn http_error(status: u16, body: Option<ApiErrorBody>, status_text: String) -> ClientError {
    let message = body
        .and_then(|b| b.message())
        .filter(|m| !m.is_empty())
        .unwrap_or(status_text);
    ClientError::Http { status, message }
}

fn js_error(err: JsValue) -> ClientError {
    ClientError::Browser(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Turn a non-2xx response into an error, otherwise pass it through.
async fn check_status(resp: Response) -> Result<Response> {
    if resp.ok() {
        return Ok(resp);
    }
    let body = resp.json::<ApiErrorBody>().await.ok();
    Err(http_error(resp.status(), body, resp.status_text()))
}

async fn read_json<R: DeserializeOwned>(resp: Response) -> Result<R> {
    let resp = check_status(resp).await?;
    resp.json::<R>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl BrainApi for HttpApi {
    type File = web_sys::File;

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        self.post_json("/auth/login", credentials).await
    }

    async fn signup(&self, credentials: &SignupCredentials) -> Result<AuthResponse> {
        self.post_json("/auth/signup", credentials).await
    }

    async fn upload_file(&self, file: &web_sys::File) -> Result<FileUploadResponse> {
        let url = self.config.endpoint("/chat/upload");
        tracing::debug!("POST {} ({})", url, file.name());

        let form = web_sys::FormData::new().map_err(js_error)?;
        form.append_with_blob("file", file).map_err(js_error)?;

        // The browser sets the multipart boundary header itself
        let resp = self.authorize(Request::post(&url)).body(form)?.send().await?;
        read_json(resp).await
    }

    async fn chat_status(&self) -> Result<DocumentResponse> {
        let url = self.config.endpoint("/chat");
        tracing::debug!("GET {}", url);
        let resp = self.authorize(Request::get(&url)).send().await?;
        read_json(resp).await
    }

    async fn ask(&self, question: &str) -> Result<AnswerResponse> {
        let body = AskRequest {
            question: question.to_string(),
        };
        self.post_json("/chat/ask", &body).await
    }

    async fn delete_file(&self) -> Result<()> {
        let url = self.config.endpoint("/chat/delete");
        tracing::debug!("DELETE {}", url);
        let resp = self.authorize(Request::delete(&url)).send().await?;
        check_status(resp).await?;
        Ok(())
    }
}
