//! Line-oriented shell over a tenant's cache provider.
//!
//! Reads one command per line from stdin, e.g. `SET greeting hello` or
//! `HGET user:1 name`, and prints one reply per line. Operations the
//! provider does not support print an `ERR` line and the shell keeps going.

use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::{open_tenant, resolve_tenant};
use crate::cli::types::TenantArgs;
use crate::domain::errors::CacheResult;
use crate::domain::models::{Capability, Config, OpContext, Reply};
use crate::domain::ports::CacheProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Set { key: String, value: String },
    SetEx { key: String, ttl: Duration, value: String },
    Get { key: String },
    Exists { key: String },
    Del { keys: Vec<String> },
    HSet { key: String, field: String, value: String },
    HGet { key: String, field: String },
    HGetAll { key: String },
    HDel { key: String, fields: Vec<String> },
    HExists { key: String, field: String },
    Stats,
    Caps,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("wrong number of arguments for '{command}', usage: {usage}")]
    Arity { command: String, usage: &'static str },

    #[error("invalid ttl '{0}', expected whole seconds")]
    InvalidTtl(String),
}

impl ShellCommand {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    ///
    /// Values for `SET`, `SETEX` and `HSET` take the rest of the line, so they
    /// may contain spaces.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (name, rest) = split_word(line);
        let command = name.to_ascii_uppercase();
        let arity = |usage| ParseError::Arity {
            command: command.clone(),
            usage,
        };

        let parsed = match command.as_str() {
            "SET" => {
                let (key, value) = split_word(rest);
                if key.is_empty() || value.is_empty() {
                    return Err(arity("SET key value"));
                }
                Self::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "SETEX" => {
                let (key, rest) = split_word(rest);
                let (ttl, value) = split_word(rest);
                if key.is_empty() || ttl.is_empty() || value.is_empty() {
                    return Err(arity("SETEX key seconds value"));
                }
                let seconds = ttl
                    .parse::<u64>()
                    .map_err(|_| ParseError::InvalidTtl(ttl.to_string()))?;
                Self::SetEx {
                    key: key.to_string(),
                    ttl: Duration::from_secs(seconds),
                    value: value.to_string(),
                }
            }
            "HSET" => {
                let (key, rest) = split_word(rest);
                let (field, value) = split_word(rest);
                if key.is_empty() || field.is_empty() || value.is_empty() {
                    return Err(arity("HSET key field value"));
                }
                Self::HSet {
                    key: key.to_string(),
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            _ => {
                let args: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
                Self::from_words(name, &command, args)?
            }
        };
        Ok(Some(parsed))
    }

    fn from_words(name: &str, command: &str, mut args: Vec<String>) -> Result<Self, ParseError> {
        let arity = |usage| ParseError::Arity {
            command: command.to_string(),
            usage,
        };
        let exact = |args: &[String], n: usize, usage: &'static str| {
            if args.len() == n {
                Ok(())
            } else {
                Err(arity(usage))
            }
        };

        match command {
            "GET" => {
                exact(&args, 1, "GET key")?;
                Ok(Self::Get { key: args.remove(0) })
            }
            "EXISTS" => {
                exact(&args, 1, "EXISTS key")?;
                Ok(Self::Exists { key: args.remove(0) })
            }
            "DEL" => {
                if args.is_empty() {
                    return Err(arity("DEL key [key ...]"));
                }
                Ok(Self::Del { keys: args })
            }
            "HGET" => {
                exact(&args, 2, "HGET key field")?;
                let field = args.remove(1);
                Ok(Self::HGet { key: args.remove(0), field })
            }
            "HGETALL" => {
                exact(&args, 1, "HGETALL key")?;
                Ok(Self::HGetAll { key: args.remove(0) })
            }
            "HDEL" => {
                if args.len() < 2 {
                    return Err(arity("HDEL key field [field ...]"));
                }
                let key = args.remove(0);
                Ok(Self::HDel { key, fields: args })
            }
            "HEXISTS" => {
                exact(&args, 2, "HEXISTS key field")?;
                let field = args.remove(1);
                Ok(Self::HExists { key: args.remove(0), field })
            }
            "STATS" => exact(&args, 0, "STATS").map(|()| Self::Stats),
            "CAPS" => exact(&args, 0, "CAPS").map(|()| Self::Caps),
            "QUIT" | "EXIT" => exact(&args, 0, "QUIT").map(|()| Self::Quit),
            _ => Err(ParseError::UnknownCommand(name.to_string())),
        }
    }
}

/// Split off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

/// Run one command against the provider.
pub async fn apply(
    cache: &dyn CacheProvider,
    ctx: &OpContext,
    command: &ShellCommand,
) -> CacheResult<Reply> {
    match command {
        ShellCommand::Set { key, value } => {
            cache.set(ctx, key, value).await?;
            Ok(ok())
        }
        ShellCommand::SetEx { key, ttl, value } => {
            cache.set_expires(ctx, key, value, *ttl).await?;
            Ok(ok())
        }
        ShellCommand::Get { key } => Ok(cache.get(ctx, key).await?.map_or(Reply::Nil, Reply::Text)),
        ShellCommand::Exists { key } => Ok(flag(cache.exists(ctx, key).await?)),
        ShellCommand::Del { keys } => {
            let removed = if keys.len() > 1 && cache.supports(Capability::BatchDelete) {
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                cache.batch_delete(ctx, &keys).await?
            } else {
                let mut removed = 0;
                for key in keys {
                    if cache.delete(ctx, key).await? {
                        removed += 1;
                    }
                }
                removed
            };
            Ok(count(removed))
        }
        ShellCommand::HSet { key, field, value } => {
            cache.hset(ctx, key, field, value).await?;
            Ok(ok())
        }
        ShellCommand::HGet { key, field } => Ok(cache
            .hget(ctx, key, field)
            .await?
            .map_or(Reply::Nil, Reply::Text)),
        ShellCommand::HGetAll { key } => {
            let mut fields: Vec<_> = cache.hget_all(ctx, key).await?.into_iter().collect();
            fields.sort();
            Ok(Reply::List(
                fields
                    .into_iter()
                    .flat_map(|(field, value)| [Reply::Text(field), Reply::Text(value)])
                    .collect(),
            ))
        }
        ShellCommand::HDel { key, fields } => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            Ok(count(cache.hdelete(ctx, key, &fields).await?))
        }
        ShellCommand::HExists { key, field } => Ok(flag(cache.hexists(ctx, key, field).await?)),
        ShellCommand::Stats => Ok(cache.stats().map_or(Reply::Nil, |stats| {
            Reply::List(vec![
                Reply::Text(format!("len {}", stats.len)),
                Reply::Text(format!("capacity {}", stats.capacity)),
                Reply::Text(format!("hits {}", stats.hits)),
                Reply::Text(format!("misses {}", stats.misses())),
                Reply::Text(format!("hit_ratio {:.3}", stats.hit_ratio())),
            ])
        })),
        ShellCommand::Caps => Ok(Reply::List(
            cache
                .capabilities()
                .iter()
                .map(|c| Reply::Text(c.as_str().to_string()))
                .collect(),
        )),
        ShellCommand::Quit => Ok(ok()),
    }
}

fn ok() -> Reply {
    Reply::Text("OK".to_string())
}

fn flag(value: bool) -> Reply {
    Reply::Int(i64::from(value))
}

fn count(n: usize) -> Reply {
    Reply::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Human rendering in the style of `redis-cli`.
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Nil => "(nil)".to_string(),
        Reply::Int(n) => format!("(integer) {n}"),
        Reply::Text(text) if text == "OK" => text.clone(),
        Reply::Text(text) => format!("\"{text}\""),
        Reply::List(items) if items.is_empty() => "(empty list)".to_string(),
        Reply::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}) {}", i + 1, render(item)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_line(result: Result<Reply, String>, json_mode: bool) -> String {
    match (result, json_mode) {
        (Ok(reply), true) => serde_json::json!({ "reply": reply }).to_string(),
        (Ok(reply), false) => render(&reply),
        (Err(message), true) => serde_json::json!({ "error": message }).to_string(),
        (Err(message), false) => format!("ERR {message}"),
    }
}

pub async fn execute(args: TenantArgs, config: &Config, json_mode: bool) -> Result<()> {
    let tenant = resolve_tenant(args.tenant, config)?;
    let cache = open_tenant(&tenant, config).await?;
    tracing::info!(%tenant, provider = cache.name(), "shell started");

    let ctx = OpContext::background();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match ShellCommand::parse(&line) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                let out = render_line(Err(err.to_string()), json_mode);
                stdout.write_all(format!("{out}\n").as_bytes()).await?;
                continue;
            }
        };

        let result = apply(cache.as_ref(), &ctx, &command)
            .await
            .map_err(|err| err.to_string());
        let out = render_line(result, json_mode);
        stdout.write_all(format!("{out}\n").as_bytes()).await?;
        stdout.flush().await?;
    }

    cache.close().await.context("Failed to close cache")?;
    tracing::info!(%tenant, "shell finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryProvider;
    use crate::adapters::null::NullProvider;

    fn parse(line: &str) -> ShellCommand {
        ShellCommand::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            parse("set greeting hello   world"),
            ShellCommand::Set {
                key: "greeting".to_string(),
                value: "hello   world".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_setex() {
        assert_eq!(
            parse("SETEX k 30 v"),
            ShellCommand::SetEx {
                key: "k".to_string(),
                ttl: Duration::from_secs(30),
                value: "v".to_string(),
            }
        );
        assert_eq!(
            ShellCommand::parse("SETEX k soon v"),
            Err(ParseError::InvalidTtl("soon".to_string()))
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(ShellCommand::parse("   "), Ok(None));
        assert_eq!(ShellCommand::parse("# seed data"), Ok(None));
    }

    #[test]
    fn test_parse_arity_errors() {
        assert!(matches!(
            ShellCommand::parse("GET"),
            Err(ParseError::Arity { .. })
        ));
        assert!(matches!(
            ShellCommand::parse("HGET user"),
            Err(ParseError::Arity { .. })
        ));
        assert!(matches!(
            ShellCommand::parse("SET lonely"),
            Err(ParseError::Arity { .. })
        ));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            ShellCommand::parse("FLUSHALL"),
            Err(ParseError::UnknownCommand("FLUSHALL".to_string()))
        );
    }

    #[test]
    fn test_parse_multi_key_del() {
        assert_eq!(
            parse("del a b c"),
            ShellCommand::Del {
                keys: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            }
        );
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&Reply::Nil), "(nil)");
        assert_eq!(render(&Reply::Int(2)), "(integer) 2");
        assert_eq!(render(&ok()), "OK");
        assert_eq!(render(&Reply::Text("v".to_string())), "\"v\"");
        assert_eq!(
            render(&Reply::List(vec![
                Reply::Text("a".to_string()),
                Reply::Text("b".to_string()),
            ])),
            "1) \"a\"\n2) \"b\""
        );
    }

    #[test]
    fn test_render_line_json() {
        assert_eq!(render_line(Ok(Reply::Nil), true), r#"{"reply":null}"#);
        assert_eq!(
            render_line(Err("closed".to_string()), true),
            r#"{"error":"closed"}"#
        );
    }

    #[tokio::test]
    async fn test_apply_against_memory_provider() {
        let cache = MemoryProvider::new(10);
        let ctx = OpContext::background();

        assert_eq!(apply(&cache, &ctx, &parse("SET a 1")).await.unwrap(), ok());
        assert_eq!(
            apply(&cache, &ctx, &parse("GET a")).await.unwrap(),
            Reply::Text("1".to_string())
        );
        assert_eq!(apply(&cache, &ctx, &parse("EXISTS a")).await.unwrap(), Reply::Int(1));
        assert_eq!(apply(&cache, &ctx, &parse("DEL a b")).await.unwrap(), Reply::Int(1));
        assert_eq!(apply(&cache, &ctx, &parse("GET a")).await.unwrap(), Reply::Nil);

        apply(&cache, &ctx, &parse("HSET user name ada")).await.unwrap();
        assert_eq!(
            apply(&cache, &ctx, &parse("HGET user name")).await.unwrap(),
            Reply::Text("ada".to_string())
        );
    }

    #[tokio::test]
    async fn test_apply_reports_unsupported_operations() {
        let cache = MemoryProvider::new(10);
        let ctx = OpContext::background();

        let err = apply(&cache, &ctx, &parse("HGETALL user")).await.unwrap_err();
        assert!(err.is_unsupported());
    }

    #[tokio::test]
    async fn test_apply_stats_and_caps() {
        let cache = MemoryProvider::new(4);
        let ctx = OpContext::background();

        let Reply::List(stats) = apply(&cache, &ctx, &parse("STATS")).await.unwrap() else {
            panic!("Expected list reply");
        };
        assert!(stats.contains(&Reply::Text("capacity 4".to_string())));

        let caps = apply(&cache, &ctx, &parse("CAPS")).await.unwrap();
        assert_eq!(
            caps,
            Reply::List(vec![
                Reply::Text("key_value".to_string()),
                Reply::Text("hash".to_string()),
            ])
        );

        let null = NullProvider::new();
        assert_eq!(apply(&null, &ctx, &parse("STATS")).await.unwrap(), Reply::Nil);
    }

    #[tokio::test]
    async fn test_apply_multi_delete_uses_batch_when_supported() {
        let cache = NullProvider::new();
        let ctx = OpContext::background();
        assert_eq!(
            apply(&cache, &ctx, &parse("DEL a b")).await.unwrap(),
            Reply::Int(0)
        );
    }
}
