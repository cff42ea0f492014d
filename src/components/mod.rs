//! Reusable UI components

pub mod chat_input;
pub mod chat_message;
pub mod form_field;
pub mod header;
pub mod loading;
pub mod route_guard;

pub use chat_input::ChatInput;
pub use chat_message::ChatMessage;
pub use form_field::FormField;
pub use header::Header;
pub use loading::{LoadingDots, LoadingSpinner, TypingIndicator};
pub use route_guard::{ProtectedRoute, PublicRoute};
