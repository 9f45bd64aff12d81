//! The bot's view of Twitter: a handful of account-level operations mapped
//! one-to-one onto REST endpoints.
//!
//! Every operation reports its failure to the [`ErrorLog`] exactly once and
//! then returns the error. Nothing is retried, cached or swallowed.

use crate::model::{
    partition_users, AccountId, FriendIds, LookupUser, Reply, RequestData, VerifiedAccount,
};
use crate::twitter::{Error, ErrorLog, TwitterApi};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{PoisonError, RwLock};

const VERIFY_CREDENTIALS: &str = "account/verify_credentials";
const USERS_LOOKUP: &str = "users/lookup";
const STATUSES_UPDATE: &str = "statuses/update";
const DIRECT_MESSAGES_NEW: &str = "direct_messages/new";
const MENTIONS_TIMELINE: &str = "statuses/mentions_timeline";
const FRIENDS_IDS: &str = "friends/ids";
const USER_TIMELINE: &str = "statuses/user_timeline";

/// Largest batch `users/lookup` accepts in one request.
pub const LOOKUP_BATCH_LIMIT: usize = 100;

type BotResult<T, A> = Result<T, Error<<A as TwitterApi>::Error>>;

pub struct TwitterBot<A, L> {
    api: A,
    log: L,
    own_id: RwLock<Option<AccountId>>,
}

impl<A: TwitterApi, L: ErrorLog> TwitterBot<A, L> {
    pub fn new(api: A, log: L) -> Self {
        Self {
            api,
            log,
            own_id: RwLock::new(None),
        }
    }

    /// The bot's own user ID, known once [`verify`](Self::verify) has succeeded.
    pub fn own_id(&self) -> BotResult<AccountId, A> {
        self.own_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::NotVerified)
    }

    /// Checks the credentials and remembers the account they belong to.
    pub async fn verify(&self) -> BotResult<AccountId, A> {
        let data = RequestData::new()
            .with("include_entities", false)
            .with("skip_status", true);
        let result = self
            .get_request(VERIFY_CREDENTIALS, &data)
            .await
            .map_err(Error::Api)
            .and_then(|body| decode::<VerifiedAccount, _>(VERIFY_CREDENTIALS, body));
        let account = self.report(result, "Failed to verify twitter configuration")?;
        *self.own_id.write().unwrap_or_else(PoisonError::into_inner) =
            Some(account.id_str.clone());
        Ok(account.id_str)
    }

    /// Resolves handles (with or without `@`) and numeric IDs to user IDs.
    ///
    /// Results follow the order of the lookup response, which need not match
    /// the order of `names`.
    pub async fn get_user_id<S: AsRef<str>>(&self, names: &[S]) -> BotResult<Vec<String>, A> {
        let (ids, handles) = partition_users(names);
        let data = RequestData::new()
            .with("include_entities", false)
            .with("screen_name", handles.join(","))
            .with("user_id", ids.join(","));
        let result = self
            .post_request(USERS_LOOKUP, &data)
            .await
            .map_err(Error::Api)
            .and_then(|body| decode::<Vec<LookupUser>, _>(USERS_LOOKUP, body));
        let result = self.report(result, "Failed to get Twitter IDs");
        if result.is_err() && names.len() > LOOKUP_BATCH_LIMIT {
            self.log
                .log_error("Cannot get user IDs for more than 100 users at a time.");
        }
        result.map(|users| users.into_iter().map(|user| user.id_str).collect())
    }

    /// Posts `message`, or a reply to `reply` prefixed with `@username`.
    pub async fn post_tweet(&self, message: &str, reply: Option<&Reply>) -> BotResult<(), A> {
        let data = match reply {
            Some(reply) => RequestData::new()
                .with("status", format!("@{} {}", reply.username, message))
                .with("in_reply_to_status_id", &reply.status_id),
            None => RequestData::new().with("status", message),
        };
        let result = self
            .post_request(STATUSES_UPDATE, &data)
            .await
            .map(|_| ())
            .map_err(Error::Api);
        self.report(result, "Failed to send tweet")
    }

    pub async fn send_dm(&self, message: &str, user_id: &str) -> BotResult<(), A> {
        let data = RequestData::new()
            .with("text", message)
            .with("user_id", user_id);
        let result = self
            .post_request(DIRECT_MESSAGES_NEW, &data)
            .await
            .map(|_| ())
            .map_err(Error::Api);
        self.report(
            result,
            &format!("Failed to send Direct Message to: {}", user_id),
        )
    }

    pub async fn get_mentions(&self, data: &RequestData) -> BotResult<Vec<Value>, A> {
        let result = self
            .get_request(MENTIONS_TIMELINE, data)
            .await
            .map_err(Error::Api)
            .and_then(|body| decode(MENTIONS_TIMELINE, body));
        self.report(result, "Failed to retrieve mentions from bot")
    }

    /// IDs of the accounts the bot follows. Requires a prior [`verify`](Self::verify).
    pub async fn get_following(&self) -> BotResult<Vec<String>, A> {
        let result = match self.own_id() {
            Ok(own_id) => {
                let data = RequestData::new()
                    .with("user_id", &own_id)
                    .with("stringify_ids", true);
                self.get_request(FRIENDS_IDS, &data)
                    .await
                    .map_err(Error::Api)
                    .and_then(|body| decode::<FriendIds, _>(FRIENDS_IDS, body))
                    .map(|friends| friends.ids)
            }
            Err(e) => Err(e),
        };
        self.report(result, "Failed to retrieve following list of bot")
    }

    /// Timeline of the user named by `data["user_id"]`.
    pub async fn get_tweets(&self, data: &RequestData) -> BotResult<Vec<Value>, A> {
        let result = self
            .get_request(USER_TIMELINE, data)
            .await
            .map_err(Error::Api)
            .and_then(|body| decode(USER_TIMELINE, body));
        self.report(
            result,
            &format!(
                "Failed to retrieve tweets from user: {}",
                data.get("user_id").unwrap_or_default()
            ),
        )
    }

    pub async fn get_request(&self, path: &str, data: &RequestData) -> Result<Value, A::Error> {
        self.api.get(path, data).await
    }

    pub async fn post_request(&self, path: &str, data: &RequestData) -> Result<Value, A::Error> {
        self.api.post(path, data).await
    }

    fn report<T>(&self, result: BotResult<T, A>, message: &str) -> BotResult<T, A> {
        if result.is_err() {
            self.log.log_error(message);
        }
        result
    }
}

fn decode<T: DeserializeOwned, E: std::error::Error + 'static>(
    path: &'static str,
    body: Value,
) -> Result<T, Error<E>> {
    serde_json::from_value(body).map_err(|source| Error::UnexpectedResponse { path, source })
}
