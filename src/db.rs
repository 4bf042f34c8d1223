use crate::models::User;

/// Read-only user lookup.
///
/// Absence is a normal `None`, never an error. Implementations must be safe to
/// share across worker threads; lookups take `&self` and do not mutate.
pub trait CredentialStore: Send + Sync {
    /// Exact, case-sensitive match on both fields.
    fn find_by_credentials(&self, username: &str, password: &str) -> Option<User>;

    fn find_by_id(&self, id: i64) -> Option<User>;
}

/// Fixed user list built at startup and scanned linearly.
///
/// Fine for a handful of accounts; a deployment with real users would put an
/// indexed store behind [`CredentialStore`] instead.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Vec<User>,
}

impl InMemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The two accounts the server ships with.
    pub fn seeded() -> Self {
        Self::new(vec![
            User::new(1, "testuser", "testpass"),
            User::new(2, "admin", "admin123"),
        ])
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for InMemoryUserStore {
    fn find_by_credentials(&self, username: &str, password: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
    }

    fn find_by_id(&self, id: i64) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }
}
