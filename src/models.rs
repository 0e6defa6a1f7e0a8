use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated principal as returned by Checkpoint
///
/// Only `id` is interpreted; every other field is kept in `attributes` and
/// serialized back unchanged. A missing `id` stays missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            attributes: Map::new(),
        }
    }

    /// Look up a pass-through field
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Supplementary attributes of the principal, sent alongside the identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Profile {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            attributes: Map::new(),
        }
    }

    /// Look up a pass-through field
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Response body of `GET /identities/me`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityEnvelope {
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_decodes_identity_and_profile() {
        let envelope: IdentityEnvelope =
            serde_json::from_str(r#"{"identity":{"id":"u1"},"profile":{"name":"Ann"}}"#).unwrap();
        assert_eq!(envelope.identity, Some(Identity::new("u1")));
        assert_eq!(envelope.profile, Some(Profile::named("Ann")));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let raw = json!({
            "identity": {"id": "u9", "realm": "area51", "god": false},
            "profile": {"name": "Bob", "email": "bob@example.com"}
        });
        let envelope: IdentityEnvelope = serde_json::from_value(raw.clone()).unwrap();

        let identity = envelope.identity.as_ref().unwrap();
        assert_eq!(identity.attribute("realm"), Some(&json!("area51")));
        assert_eq!(identity.attribute("god"), Some(&json!(false)));
        let profile = envelope.profile.as_ref().unwrap();
        assert_eq!(profile.attribute("email"), Some(&json!("bob@example.com")));

        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }

    #[test]
    fn test_identity_without_id_round_trips() {
        let raw = json!({"identity": {"realm": "area51"}});
        let envelope: IdentityEnvelope = serde_json::from_value(raw.clone()).unwrap();

        let identity = envelope.identity.as_ref().unwrap();
        assert_eq!(identity.id, None);
        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }

    #[test]
    fn test_missing_sections_decode_to_none() {
        let envelope: IdentityEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope, IdentityEnvelope::default());

        let envelope: IdentityEnvelope =
            serde_json::from_str(r#"{"identity":null,"profile":null}"#).unwrap();
        assert!(envelope.identity.is_none());
        assert!(envelope.profile.is_none());
    }
}
