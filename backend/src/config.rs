use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use lettre::message::Mailbox;
use lettre::Address;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpEncryption {
    /// STARTTLS upgrade, usually port 587.
    StartTls,
    /// TLS from the first byte, usually port 465.
    Implicit,
    None,
}

impl FromStr for SmtpEncryption {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tls" | "starttls" => Ok(SmtpEncryption::StartTls),
            "ssl" | "smtps" => Ok(SmtpEncryption::Implicit),
            "none" => Ok(SmtpEncryption::None),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub encryption: SmtpEncryption,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub smtp: SmtpConfig,
    pub from: Mailbox,
    pub recipient: Mailbox,
    /// Set Reply-To to whoever filled in the form.
    pub reply_to_submitter: bool,
    pub subject_prefix: String,
    pub bind_addr: SocketAddr,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let smtp = SmtpConfig {
            host: required("SMTP_HOST")?,
            port: parse_or("SMTP_PORT", get("SMTP_PORT"), 587)?,
            username: required("SMTP_USERNAME")?,
            password: required("SMTP_PASSWORD")?,
            encryption: parse_or("SMTP_ENCRYPTION", get("SMTP_ENCRYPTION"), SmtpEncryption::StartTls)?,
        };

        let from = mailbox(
            "SMTP_FROM_EMAIL",
            required("SMTP_FROM_EMAIL")?,
            get("SMTP_FROM_NAME").unwrap_or_else(|| "Website Contact Form".to_string()),
        )?;
        let recipient = mailbox(
            "RECIPIENT_EMAIL",
            required("RECIPIENT_EMAIL")?,
            get("RECIPIENT_NAME").unwrap_or_default(),
        )?;

        let reply_to_submitter = match get("REPLY_TO_EMAIL") {
            None => true,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "REPLY_TO_EMAIL",
                value,
            })?,
        };

        Ok(Config {
            smtp,
            from,
            recipient,
            reply_to_submitter,
            subject_prefix: get("SUBJECT_PREFIX").unwrap_or_else(|| "[Contact Form]".to_string()),
            bind_addr: parse_or("BIND_ADDR", get("BIND_ADDR"), SocketAddr::from(([127, 0, 0, 1], 3001)))?,
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        })
    }

    pub fn recipient_email(&self) -> String {
        self.recipient.email.to_string()
    }

    #[cfg(test)]
    pub fn for_tests() -> Config {
        let vars = test_vars();
        Self::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
            .expect("test config is valid")
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn mailbox(name: &'static str, email: String, display: String) -> Result<Mailbox, ConfigError> {
    let address: Address = email
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value: email.clone() })?;
    let display = display.trim();
    Ok(Mailbox::new((!display.is_empty()).then(|| display.to_string()), address))
}

#[cfg(test)]
fn test_vars() -> std::collections::HashMap<&'static str, &'static str> {
    std::collections::HashMap::from([
        ("SMTP_HOST", "smtp.example.com"),
        ("SMTP_USERNAME", "relay"),
        ("SMTP_PASSWORD", "secret"),
        ("SMTP_FROM_EMAIL", "noreply@example.com"),
        ("SMTP_FROM_NAME", "Example Website"),
        ("RECIPIENT_EMAIL", "hello@example.com"),
        ("RECIPIENT_NAME", "Example Sales"),
        ("SUBJECT_PREFIX", "[Website]"),
    ])
}
