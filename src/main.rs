mod model;
mod twitter;

use crate::model::{Credentials, Reply, RequestData};
use crate::twitter::bot::TwitterBot;
use crate::twitter::v1::TwitterClientV1;
use crate::twitter::LogErrors;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;

#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Path to the Twitter API secrets file
    #[clap(short, long, default_value = "./config/secret.json")]
    secret: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the credentials and print the bot's user ID
    Verify,
    /// Resolve usernames or user IDs to user IDs (at most 100 at a time)
    Lookup {
        #[clap(required = true)]
        names: Vec<String>,
    },
    /// Post a tweet, optionally as a reply
    Tweet {
        message: String,
        /// ID of the tweet to reply to
        #[clap(long)]
        reply_to: Option<String>,
        /// Author of the tweet being replied to
        #[clap(long)]
        reply_user: Option<String>,
    },
    /// Send a direct message
    Dm { user_id: String, message: String },
    /// List recent mentions of the bot
    Mentions {
        #[clap(long)]
        count: Option<u32>,
        #[clap(long)]
        since_id: Option<String>,
    },
    /// List the IDs of accounts the bot follows
    Following,
    /// List recent tweets of a user
    Tweets {
        user_id: String,
        #[clap(long)]
        count: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(e) = main2().await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn main2() -> anyhow::Result<()> {
    let args: Args = Args::parse();
    let secret = fs::read_to_string(&args.secret)
        .await
        .context("Unable to read secret file")?;
    let credentials =
        serde_json::from_str::<Credentials>(&secret).context("Unable to deserialize secret file")?;
    let bot = TwitterBot::new(TwitterClientV1::new(&credentials), LogErrors);

    match args.command {
        Command::Verify => print_json(&bot.verify().await?),
        Command::Lookup { names } => print_json(&bot.get_user_id(&names).await?),
        Command::Tweet {
            message,
            reply_to,
            reply_user,
        } => {
            let reply = match (reply_to, reply_user) {
                (Some(status_id), Some(username)) => Some(Reply {
                    status_id,
                    username,
                }),
                (None, None) => None,
                _ => bail!("--reply-to and --reply-user must be given together"),
            };
            bot.post_tweet(&message, reply.as_ref()).await?;
            println!("Tweet sent");
            Ok(())
        }
        Command::Dm { user_id, message } => {
            bot.send_dm(&message, &user_id).await?;
            println!("Direct message sent to {}", user_id);
            Ok(())
        }
        Command::Mentions { count, since_id } => {
            let mut data = RequestData::new();
            if let Some(count) = count {
                data.insert("count", count);
            }
            if let Some(since_id) = since_id {
                data.insert("since_id", since_id);
            }
            print_json(&bot.get_mentions(&data).await?)
        }
        Command::Following => {
            bot.verify().await.context("Unable to verify bot account")?;
            print_json(&bot.get_following().await?)
        }
        Command::Tweets { user_id, count } => {
            let mut data = RequestData::new().with("user_id", user_id);
            if let Some(count) = count {
                data.insert("count", count);
            }
            print_json(&bot.get_tweets(&data).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reply_flags() {
        let args = Args::parse_from([
            "twitbot",
            "tweet",
            "hello",
            "--reply-to",
            "999",
            "--reply-user",
            "carol",
        ]);
        match args.command {
            Command::Tweet {
                message,
                reply_to,
                reply_user,
            } => {
                assert_eq!(message, "hello");
                assert_eq!(reply_to.as_deref(), Some("999"));
                assert_eq!(reply_user.as_deref(), Some("carol"));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(args.secret, PathBuf::from("./config/secret.json"));
    }

    #[test]
    fn lookup_needs_a_name() {
        assert!(Args::try_parse_from(["twitbot", "lookup"]).is_err());
    }
}
