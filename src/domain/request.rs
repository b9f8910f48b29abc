use super::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};

/// Raw option set for one launch, as gathered from the CLI or a profile.
///
/// Nothing here is trusted yet; see [`super::ContainerSpec::from_request`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "port_from_text_or_number"
    )]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "env_from_text_or_list"
    )]
    pub env: Vec<String>,
}

// Hand-written files say `port: 5432`, older ones `port: '5432'`
fn port_from_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Port>::deserialize(deserializer)?.map(|port| match port {
        Port::Number(n) => n.to_string(),
        Port::Text(s) => s,
    }))
}

// A single string holds whitespace-separated KEY=VALUE entries
fn env_from_text_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Env {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<Env>::deserialize(deserializer)? {
        Some(Env::List(list)) => list,
        Some(Env::Text(text)) => text.split_whitespace().map(str::to_string).collect(),
        None => Vec::new(),
    })
}

/// Parses a host port. Accepts 1-65535 only.
pub fn parse_port(value: &str) -> Result<u16, ValidationError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(ValidationError::InvalidPort {
            value: value.to_string(),
        }),
    }
}

/// Splits `KEY=VALUE` on the first `=`. The value may be empty, the key may not.
pub fn parse_env_pair(entry: &str) -> Result<(String, String), ValidationError> {
    let invalid = || ValidationError::InvalidEnv {
        entry: entry.to_string(),
    };

    let (key, value) = entry.split_once('=').ok_or_else(invalid)?;
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    Ok((key.to_string(), value.to_string()))
}

/// Docker's container name rule: `[a-zA-Z0-9][a-zA-Z0-9_.-]*`
pub fn validate_container_name(name: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("name is empty".into()));
    };

    if !first.is_ascii_alphanumeric() {
        return Err(invalid("must start with a letter or digit".into()));
    }

    if let Some(c) = chars.find(|&c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '.' | '-')) {
        return Err(invalid(format!("contains invalid character '{c}'")));
    }

    Ok(())
}
