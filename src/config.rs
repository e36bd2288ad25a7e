use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Network listener configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Listener {
    pub host: String,
    pub port: u16,
}

impl Default for Listener {
    fn default() -> Self {
        Listener {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

/// Connection parameters for the Airtable REST API.
///
/// A missing base id or API key is not a startup error; requests made
/// without them fail with the upstream's status when attempted.
#[derive(Clone, Debug, PartialEq)]
pub struct AirtableConfig {
    /// API root, overridable so tests can point at a local server
    pub api_url: String,
    pub base_id: Option<String>,
    pub api_key: Option<String>,
    /// Table id or name. Table ids are stable across renames.
    pub table: String,
}

/// Maps the four logical field roles to the literal column names used in
/// the table. Field names are case-sensitive in Airtable.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldNames {
    pub person_assigned: String,
    pub session_name: String,
    pub role: String,
    pub confirmation: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        FieldNames {
            person_assigned: "WCAA Assigned".into(),
            session_name: "Event Name".into(),
            role: "Role".into(),
            confirmation: "Confirmation from Invite?".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listener: Listener,
    pub airtable: AirtableConfig,
    pub fields: FieldNames,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any name -> value lookup. Tests pass a closure
    /// over a map instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Listener::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let field_defaults = FieldNames::default();

        Ok(Config {
            listener: Listener {
                host: lookup("HOST").unwrap_or(defaults.host),
                port,
            },
            airtable: AirtableConfig {
                api_url: lookup("AIRTABLE_API_URL")
                    .unwrap_or_else(|| "https://api.airtable.com/v0".into()),
                base_id: lookup("AIRTABLE_BASE_ID"),
                api_key: lookup("AIRTABLE_API_KEY"),
                table: lookup("EVENT_TABLE").unwrap_or_else(|| "tblLYaj9vr91ryIH9".into()),
            },
            fields: FieldNames {
                person_assigned: lookup("FIELD_PERSON_ASSIGNED")
                    .unwrap_or(field_defaults.person_assigned),
                session_name: lookup("FIELD_SESSION_NAME").unwrap_or(field_defaults.session_name),
                role: lookup("FIELD_ROLE").unwrap_or(field_defaults.role),
                confirmation: lookup("FIELD_CONFIRMATION").unwrap_or(field_defaults.confirmation),
            },
        })
    }
}
