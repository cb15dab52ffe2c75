use crate::models::user::User;

/// Holds the signed-in user and their bearer token for the lifetime of the
/// process. Booking and loyalty calls require both.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn login(&mut self, user: User, token: impl Into<String>) {
        self.user = Some(user);
        self.token = Some(token.into());
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// User and token together, present only when fully signed in.
    pub fn credentials(&self) -> Option<(&User, &str)> {
        match (self.user.as_ref(), self.token.as_deref()) {
            (Some(user), Some(token)) => Some((user, token)),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().is_some()
    }
}
