//! Route access rules based on session presence

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const CHAT_PATH: &str = "/chat";

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Allow,
    Redirect(&'static str),
}

fn has_session(token: Option<&str>) -> bool {
    token.is_some_and(|t| !t.is_empty())
}

/// Routes that need a session, i.e. the chat view.
pub fn protected(token: Option<&str>) -> RouteAccess {
    if has_session(token) {
        RouteAccess::Allow
    } else {
        RouteAccess::Redirect(LOGIN_PATH)
    }
}

/// Routes only for signed-out users: login and signup.
pub fn public_only(token: Option<&str>) -> RouteAccess {
    if has_session(token) {
        RouteAccess::Redirect(CHAT_PATH)
    } else {
        RouteAccess::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_route() {
        assert_eq!(protected(None), RouteAccess::Redirect(LOGIN_PATH));
        assert_eq!(protected(Some("")), RouteAccess::Redirect(LOGIN_PATH));
        assert_eq!(protected(Some("tok")), RouteAccess::Allow);
    }

    #[test]
    fn test_public_only_route() {
        assert_eq!(public_only(None), RouteAccess::Allow);
        assert_eq!(public_only(Some("")), RouteAccess::Allow);
        assert_eq!(public_only(Some("tok")), RouteAccess::Redirect(CHAT_PATH));
    }
}
