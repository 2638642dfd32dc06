use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

/// Process-local credential store keyed by username.
///
/// Inserts go through the map's entry API under a single write lock, so two
/// concurrent registrations of one username cannot both succeed. Contents are
/// lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        match users.entry(user.username.as_str().to_string()) {
            Entry::Occupied(_) => Err(AuthError::DuplicateUser(user.username.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        Ok(self.users.read().await.get(username.as_str()).cloned())
    }
}
