//! Static in-memory identity set.
//!
//! # Spring Security Equivalent
//! `InMemoryUserDetailsManager`, minus the "manager" part: the set is a value
//! loaded once at startup, with no create/update/delete path. Identities live
//! only in process memory and are gone after a restart.

use std::collections::HashMap;

use crate::http::error::ConfigError;
use crate::http::security::user::User;

/// Read-only identity set keyed by username.
///
/// # Example
/// ```
/// use bank_security_core::http::security::{InMemoryIdentities, User};
///
/// let identities = InMemoryIdentities::new(vec![
///     User::with_username("admin").password("12345").roles(&["admin"]),
///     User::with_username("user").password("12345").roles(&["read"]),
/// ])
/// .unwrap();
///
/// assert!(identities.find("admin").is_some());
/// assert!(identities.find("nobody").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryIdentities {
    users: HashMap<String, User>,
}

impl InMemoryIdentities {
    /// Loads the identity set.
    ///
    /// Fails on an empty set, an empty username, a user without roles, or
    /// two users sharing a username.
    pub fn new(users: Vec<User>) -> Result<Self, ConfigError> {
        use std::collections::hash_map::Entry;

        if users.is_empty() {
            return Err(ConfigError::EmptyIdentitySet);
        }

        let mut by_name = HashMap::with_capacity(users.len());
        for user in users {
            if user.get_username().is_empty() {
                return Err(ConfigError::EmptyUsername);
            }
            if user.get_roles().is_empty() {
                return Err(ConfigError::EmptyRoles {
                    username: user.get_username().to_string(),
                });
            }
            match by_name.entry(user.get_username().to_string()) {
                Entry::Occupied(e) => {
                    return Err(ConfigError::DuplicateUsername {
                        username: e.key().clone(),
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(user);
                }
            }
        }

        Ok(InMemoryIdentities { users: by_name })
    }

    /// Looks up a user by username.
    pub fn find(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User::with_username("admin").password("12345").roles(&["admin"])
    }

    fn user() -> User {
        User::with_username("user").password("12345").roles(&["read"])
    }

    #[test]
    fn test_load_and_find() {
        let identities = InMemoryIdentities::new(vec![admin(), user()]).unwrap();

        assert_eq!(identities.iter().count(), 2);
        assert_eq!(identities.find("admin"), Some(&admin()));
        assert_eq!(identities.find("user").unwrap().get_roles(), &["read".to_string()]);
        assert!(identities.find("ADMIN").is_none());
    }

    #[test]
    fn test_duplicate_username_fails() {
        let err = InMemoryIdentities::new(vec![admin(), user(), admin()]).unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateUsername { ref username } if username == "admin"));
    }

    #[test]
    fn test_empty_set_fails() {
        let err = InMemoryIdentities::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyIdentitySet));
    }

    #[test]
    fn test_user_without_roles_fails() {
        let err =
            InMemoryIdentities::new(vec![User::with_username("ghost").password("x")]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRoles { .. }));
    }

    #[test]
    fn test_empty_username_fails() {
        let err = InMemoryIdentities::new(vec![User::with_username("").roles(&["read"])])
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyUsername));
    }
}
