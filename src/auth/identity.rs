use serde::{Deserialize, Serialize};
use std::fmt;

use crate::security::constant_time_eq;

/// A registered user's stored credential record
#[derive(Clone)]
pub struct Identity {
    email: String,
    display_name: String,
    secret_credential: String,
}

/// Public view of an identity, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    pub name: String,
}

impl Identity {
    pub fn new(email: String, display_name: String, secret_credential: String) -> Self {
        Self {
            email,
            display_name,
            secret_credential,
        }
    }

    /// Unique identity key
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Check a presented credential against the stored one.
    ///
    /// Credentials are stored as given; swapping in a hash scheme only touches
    /// this method and `Identity::new`.
    pub fn verify(&self, secret_credential: &str) -> bool {
        constant_time_eq(&self.secret_credential, secret_credential)
    }

    pub fn profile(&self) -> Profile {
        Profile {
            email: self.email.clone(),
            name: self.display_name.clone(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("secret_credential", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity::new("a@x.com".into(), "Alice".into(), "p4ss".into())
    }

    #[test]
    fn test_verify() {
        let identity = alice();
        assert!(identity.verify("p4ss"));
        assert!(!identity.verify("p4sS"));
        assert!(!identity.verify(""));
    }

    #[test]
    fn test_profile_has_no_credential() {
        let profile = alice().profile();
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.name, "Alice");
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("p4ss"));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let rendered = format!("{:?}", alice());
        assert!(rendered.contains("a@x.com"));
        assert!(!rendered.contains("p4ss"));
    }
}
