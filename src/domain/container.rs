use super::request::{parse_env_pair, parse_port, validate_container_name};
use super::{DatabaseKind, LaunchRequest, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Stopped,
    NotCreated,
}

impl ContainerState {
    pub fn exists(&self) -> bool {
        !matches!(self, Self::NotCreated)
    }
}

/// A validated launch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub kind: DatabaseKind,
    pub image: String,
    /// Host port
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    /// Extra variables, custom containers only. Order is preserved.
    pub env: Vec<(String, String)>,
}

impl ContainerSpec {
    /// Validates `request` against the rules for `kind`.
    ///
    /// `default_image` replaces the built-in default for the kind when the
    /// request carries no `image` (used for configured overrides).
    pub fn from_request(
        kind: DatabaseKind,
        request: &LaunchRequest,
        default_image: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = required(kind, "name", request.name.as_deref())?;
        validate_container_name(name)?;

        let (user, password, database) = if kind.requires_credentials() {
            (
                Some(required(kind, "user", request.user.as_deref())?.to_string()),
                Some(required(kind, "password", request.password.as_deref())?.to_string()),
                Some(required(kind, "db", request.db.as_deref())?.to_string()),
            )
        } else {
            rejected(kind, "user", request.user.as_deref())?;
            rejected(kind, "password", request.password.as_deref())?;
            rejected(kind, "db", request.db.as_deref())?;
            (None, None, None)
        };

        let port = parse_port(required(kind, "port", request.port.as_deref())?)?;

        let image = match request.image.as_deref() {
            Some(image) => non_empty("image", image)?.to_string(),
            None => default_image
                .or(kind.default_image())
                .ok_or(ValidationError::MissingOption {
                    kind,
                    flag: "image",
                })?
                .to_string(),
        };

        if !kind.accepts_env() && !request.env.is_empty() {
            return Err(ValidationError::UnexpectedOption { kind, flag: "env" });
        }
        let env = request
            .env
            .iter()
            .map(|entry| parse_env_pair(entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            kind,
            image,
            port,
            user,
            password,
            database,
            env,
        })
    }

    /// Variables passed with `-e`, in the order they are emitted
    pub fn environment(&self) -> Vec<(String, String)> {
        let user = self.user.clone().unwrap_or_default();
        let password = self.password.clone().unwrap_or_default();
        let database = self.database.clone().unwrap_or_default();

        let pairs: Vec<(&str, String)> = match self.kind {
            DatabaseKind::Postgres => vec![
                ("POSTGRES_USER", user),
                ("POSTGRES_PASSWORD", password),
                ("POSTGRES_DB", database),
            ],
            DatabaseKind::Mysql => vec![
                ("MYSQL_ROOT_PASSWORD", password.clone()),
                ("MYSQL_DATABASE", database),
                ("MYSQL_USER", user),
                ("MYSQL_PASSWORD", password),
            ],
            DatabaseKind::Mongodb => vec![
                ("MONGO_INITDB_ROOT_USERNAME", user),
                ("MONGO_INITDB_ROOT_PASSWORD", password),
                ("MONGO_INITDB_DATABASE", database),
            ],
            DatabaseKind::Redis => Vec::new(),
            DatabaseKind::Custom => return self.env.clone(),
        };

        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    /// `HOST:CONTAINER`
    pub fn port_mapping(&self) -> String {
        let container_port = self.kind.container_port().unwrap_or(self.port);
        format!("{}:{}", self.port, container_port)
    }

    /// Arguments for `docker run`, one token per element
    pub fn run_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec!["run".into(), "--name".into(), self.name.clone()];

        for (key, value) in self.environment() {
            args.push("-e".into());
            args.push(format!("{key}={value}"));
        }

        args.push("-p".into());
        args.push(self.port_mapping());

        args.push("-d".into());
        args.push(self.image.clone());

        args
    }

    /// Canonical request that validates back into this spec
    pub fn to_request(&self) -> LaunchRequest {
        LaunchRequest {
            name: Some(self.name.clone()),
            image: Some(self.image.clone()),
            port: Some(self.port.to_string()),
            user: self.user.clone(),
            password: self.password.clone(),
            db: self.database.clone(),
            env: self.env.iter().map(|(k, v)| format!("{k}={v}")).collect(),
        }
    }
}

pub fn stop_args(name: &str) -> Vec<String> {
    vec!["stop".into(), name.into()]
}

pub fn remove_args(name: &str) -> Vec<String> {
    vec!["rm".into(), name.into()]
}

fn required<'a>(
    kind: DatabaseKind,
    flag: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    let value = value.ok_or(ValidationError::MissingOption { kind, flag })?;
    non_empty(flag, value)
}

fn non_empty<'a>(flag: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyValue { flag });
    }
    Ok(value)
}

fn rejected(
    kind: DatabaseKind,
    flag: &'static str,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(_) => Err(ValidationError::UnexpectedOption { kind, flag }),
        None => Ok(()),
    }
}
