use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// OAuth 1.0a user credentials, as stored in the bot's secret file.
#[derive(Deserialize, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token_key: String,
    pub access_token_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token_key", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// The bot's own user ID, as returned by `account/verify_credentials`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user given to a lookup, either already resolved to an ID or still a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    NumericId(String),
    Handle(String),
}

impl UserRef {
    /// Digit-only input is an ID; anything else is a handle with one leading `@` removed.
    pub fn classify(input: &str) -> Self {
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            UserRef::NumericId(input.to_string())
        } else {
            let handle = input.strip_prefix('@').unwrap_or(input);
            UserRef::Handle(handle.to_string())
        }
    }
}

/// Splits lookup input into `(ids, handles)`, each keeping input order.
pub fn partition_users<S: AsRef<str>>(names: &[S]) -> (Vec<String>, Vec<String>) {
    let mut ids = Vec::new();
    let mut handles = Vec::new();
    for name in names {
        match UserRef::classify(name.as_ref()) {
            UserRef::NumericId(id) => ids.push(id),
            UserRef::Handle(handle) => handles.push(handle),
        }
    }
    (ids, handles)
}

/// Request parameters for a single API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestData(BTreeMap<String, String>);

impl RequestData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for RequestData {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Target of a reply: the tweet being answered and its author.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status_id: String,
    pub username: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct VerifiedAccount {
    pub id_str: AccountId,
}

#[derive(Deserialize, Debug)]
pub(crate) struct LookupUser {
    pub id_str: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct FriendIds {
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_ids() {
        assert_eq!(
            UserRef::classify("123"),
            UserRef::NumericId("123".to_string())
        );
    }

    #[test]
    fn handles_lose_one_leading_at() {
        assert_eq!(
            UserRef::classify("@alice"),
            UserRef::Handle("alice".to_string())
        );
        assert_eq!(UserRef::classify("bob"), UserRef::Handle("bob".to_string()));
        assert_eq!(
            UserRef::classify("@@carol"),
            UserRef::Handle("@carol".to_string())
        );
    }

    #[test]
    fn mixed_or_empty_input_is_a_handle() {
        assert_eq!(
            UserRef::classify("12ab"),
            UserRef::Handle("12ab".to_string())
        );
        assert_eq!(UserRef::classify("@123"), UserRef::Handle("123".to_string()));
        assert_eq!(UserRef::classify(""), UserRef::Handle(String::new()));
    }

    #[test]
    fn partition_keeps_order() {
        let (ids, handles) = partition_users(&["9", "@x", "1", "y"]);
        assert_eq!(ids, vec!["9", "1"]);
        assert_eq!(handles, vec!["x", "y"]);
    }

    #[test]
    fn credentials_from_secret_file() {
        let json = r#"{
            "consumer_key": "ck",
            "consumer_secret": "hunter2-secret",
            "access_token_key": "ak",
            "access_token_secret": "as"
        }"#;
        let creds: Credentials = serde_json::from_str(json).unwrap();
        assert_eq!(creds.consumer_key, "ck");
        assert_eq!(creds.access_token_secret, "as");
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }

    #[test]
    fn credentials_require_all_keys() {
        let json = r#"{"consumer_key": "ck", "consumer_secret": "cs"}"#;
        assert!(serde_json::from_str::<Credentials>(json).is_err());
    }
}
