use crate::model::{Credentials, RequestData};
use crate::twitter::TwitterApi;
use async_trait::async_trait;
use egg_mode::raw::{self, ParamList};
use egg_mode::{KeyPair, Token};

const API_ROOT: &str = "https://api.twitter.com/1.1";

pub struct TwitterClientV1 {
    token: Token,
}

impl TwitterClientV1 {
    pub fn new(auth: &Credentials) -> Self {
        let consumer = KeyPair::new(auth.consumer_key.clone(), auth.consumer_secret.clone());
        let access = KeyPair::new(
            auth.access_token_key.clone(),
            auth.access_token_secret.clone(),
        );
        Self {
            token: Token::Access { consumer, access },
        }
    }
}

#[async_trait]
impl TwitterApi for TwitterClientV1 {
    type Error = egg_mode::error::Error;

    async fn get(&self, path: &str, data: &RequestData) -> Result<serde_json::Value, Self::Error> {
        let url = endpoint_url(path);
        log::debug!("GET {}", url);
        let params = to_param_list(data);
        let request = raw::request_get(&url, &self.token, Some(&params));
        let response = raw::response_json::<serde_json::Value>(request).await?;
        Ok(response.response)
    }

    async fn post(
        &self,
        path: &str,
        data: &RequestData,
    ) -> Result<serde_json::Value, Self::Error> {
        let url = endpoint_url(path);
        log::debug!("POST {}", url);
        let params = to_param_list(data);
        let request = raw::request_post(&url, &self.token, Some(&params));
        let response = raw::response_json::<serde_json::Value>(request).await?;
        Ok(response.response)
    }
}

fn endpoint_url(path: &str) -> String {
    format!("{API_ROOT}/{path}.json")
}

fn to_param_list(data: &RequestData) -> ParamList {
    data.iter().fold(ParamList::new(), |params, (key, value)| {
        params.add_param(key.to_string(), value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_against_v1_1_root() {
        assert_eq!(
            endpoint_url("statuses/mentions_timeline"),
            "https://api.twitter.com/1.1/statuses/mentions_timeline.json"
        );
    }
}
