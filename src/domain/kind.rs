use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported container presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Postgres,
    Mysql,
    Redis,
    #[serde(alias = "mongo")]
    Mongodb,
    Custom,
}

impl DatabaseKind {
    pub const ALL: [DatabaseKind; 5] = [
        Self::Postgres,
        Self::Mysql,
        Self::Redis,
        Self::Mongodb,
        Self::Custom,
    ];

    /// Image used when `--image` is omitted. `Custom` has no default.
    pub fn default_image(self) -> Option<&'static str> {
        match self {
            Self::Postgres => Some("postgres:16"),
            Self::Mysql => Some("mysql:8"),
            Self::Redis => Some("redis:7"),
            Self::Mongodb => Some("mongo:7"),
            Self::Custom => None,
        }
    }

    /// Port the service listens on inside the container.
    /// `Custom` maps the host port onto itself, so it has none.
    pub fn container_port(self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::Mysql => Some(3306),
            Self::Redis => Some(6379),
            Self::Mongodb => Some(27017),
            Self::Custom => None,
        }
    }

    /// Whether `--user`, `--password` and `--db` are required
    pub fn requires_credentials(self) -> bool {
        matches!(self, Self::Postgres | Self::Mysql | Self::Mongodb)
    }

    /// Only custom containers take arbitrary `--env` pairs
    pub fn accepts_env(self) -> bool {
        matches!(self, Self::Custom)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Redis => "redis",
            Self::Mongodb => "mongodb",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_images() {
        assert_eq!(DatabaseKind::Postgres.default_image(), Some("postgres:16"));
        assert_eq!(DatabaseKind::Mysql.default_image(), Some("mysql:8"));
        assert_eq!(DatabaseKind::Redis.default_image(), Some("redis:7"));
        assert_eq!(DatabaseKind::Mongodb.default_image(), Some("mongo:7"));
        assert_eq!(DatabaseKind::Custom.default_image(), None);
    }

    #[test]
    fn test_credentials_only_for_databases_with_auth() {
        let credentialed: Vec<_> = DatabaseKind::ALL
            .into_iter()
            .filter(|k| k.requires_credentials())
            .collect();
        assert_eq!(
            credentialed,
            vec![
                DatabaseKind::Postgres,
                DatabaseKind::Mysql,
                DatabaseKind::Mongodb
            ]
        );
    }

    #[test]
    fn test_mongo_alias_deserializes() {
        #[derive(Deserialize)]
        struct Doc {
            kind: DatabaseKind,
        }

        let doc: Doc = serde_yml::from_str("kind: mongo").unwrap();
        assert_eq!(doc.kind, DatabaseKind::Mongodb);

        let doc: Doc = serde_yml::from_str("kind: mongodb").unwrap();
        assert_eq!(doc.kind, DatabaseKind::Mongodb);
    }

    #[test]
    fn test_display() {
        assert_eq!(DatabaseKind::Mongodb.to_string(), "mongodb");
        assert_eq!(DatabaseKind::Custom.to_string(), "custom");
    }
}
