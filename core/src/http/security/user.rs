//! User identity model.
//!
//! # Spring Equivalent
//! `UserDetails` / `User.withUsername(..).password(..).roles(..)`

use std::fmt;

/// A static user identity: username, stored credential and role claims.
///
/// The stored credential is opaque; its format is whatever the configured
/// [`PasswordEncoder`](crate::http::security::crypto::PasswordEncoder) produces.
///
/// # Example
/// ```
/// use bank_security_core::http::security::User;
///
/// let user = User::with_username("admin").password("12345").roles(&["admin"]);
///
/// assert!(user.has_role("admin"));
/// assert!(!user.has_role("read"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    username: String,
    password: String,
    roles: Vec<String>,
}

impl User {
    /// Starts a user with the given username and no credential or roles.
    pub fn with_username(username: &str) -> Self {
        User {
            username: username.to_string(),
            password: String::new(),
            roles: Vec::new(),
        }
    }

    /// Sets the stored credential (already encoded for the active encoder).
    pub fn password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    /// Adds roles, skipping ones already present.
    pub fn roles(mut self, roles: &[&str]) -> Self {
        for role in roles {
            if !self.has_role(role) {
                self.roles.push(role.to_string());
            }
        }
        self
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }

    pub fn get_password(&self) -> &str {
        &self.password
    }

    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    /// Checks if the user has a specific role (case sensitive).
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Checks if the user has ANY of the specified roles.
    /// Copy of this user without its stored credential.
    ///
    /// This is what goes into request extensions and sessions.
    pub fn erase_credentials(&self) -> User {
        User {
            username: self.username.clone(),
            password: String::new(),
            roles: self.roles.clone(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {{ username: {}, roles: {:?} }}",
            self.username, self.roles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_builder() {
        let user = User::with_username("admin").password("12345").roles(&["admin"]);
        assert_eq!(user.get_username(), "admin");
        assert_eq!(user.get_password(), "12345");
        assert_eq!(user.get_roles(), &["admin".to_string()]);
    }

    #[test]
    fn test_roles_no_duplicates() {
        let user = User::with_username("user")
            .roles(&["read", "write"])
            .roles(&["read", "audit"]);

        assert_eq!(user.get_roles().len(), 3);
    }

    #[test]
    fn test_case_sensitive_roles() {
        let user = User::with_username("admin").roles(&["admin"]);

        assert!(user.has_role("admin"));
        assert!(!user.has_role("ADMIN"));
    }

    #[test]
    fn test_erase_credentials() {
        let user = User::with_username("admin").password("12345").roles(&["admin"]);
        let erased = user.erase_credentials();

        assert_eq!(erased.get_password(), "");
        assert_eq!(erased.get_roles(), user.get_roles());
    }

    #[test]
    fn test_display_hides_password() {
        let user = User::with_username("admin").password("12345").roles(&["admin"]);

        let display = user.to_string();
        assert!(display.contains("admin"));
        assert!(!display.contains("12345"));
    }
}
