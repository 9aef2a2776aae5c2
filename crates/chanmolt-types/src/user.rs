//! Slack user objects.

use serde::Deserialize;

/// A Slack user record, as returned by `users.info`.
///
/// The two guest flags encode the restriction tier: `is_restricted`
/// marks a multi-channel guest, `is_ultra_restricted` a single-channel
/// guest. A single-channel guest cannot be invited into a second channel
/// without being upgraded first.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User id (e.g. `U012A3CDE`).
    pub id: String,

    /// Workspace/team id the user belongs to.
    #[serde(default)]
    pub team_id: String,

    /// Login name.
    #[serde(default)]
    pub name: String,

    /// Full display name.
    #[serde(default)]
    pub real_name: String,

    /// Multi-channel guest.
    #[serde(default)]
    pub is_restricted: bool,

    /// Single-channel guest.
    #[serde(default)]
    pub is_ultra_restricted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_guest_flags() {
        let json = r#"{
            "id": "W012A3CDE",
            "team_id": "T012AB3C4",
            "name": "guest",
            "real_name": "Egon Spengler",
            "is_restricted": true,
            "is_ultra_restricted": true
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "W012A3CDE");
        assert_eq!(user.team_id, "T012AB3C4");
        assert_eq!(user.real_name, "Egon Spengler");
        assert!(user.is_ultra_restricted);
    }

    #[test]
    fn flags_default_to_false() {
        let json = r#"{ "id": "U1" }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.is_restricted);
        assert!(!user.is_ultra_restricted);
    }
}
