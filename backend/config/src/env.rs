//! Credential resolution over an explicit variable map.
//!
//! The map is built once at startup (process environment layered over an
//! optional `.env` file) and injected into `EnvConfig`; nothing here reads
//! the process environment after construction.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use imgextract_core::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::fs;
use tracing::debug;

/// Variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Value shipped in sample `.env` files; never a real key.
const API_KEY_PLACEHOLDER: &str = "your-api-key-here";

const API_KEY_PREFIX: &str = "sk-";

/// `KEY=value` lines, with an optional leading `export`.
static DOTENV_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*?)\s*$").unwrap()
});

/// Trailing ` # comment` on an unquoted value.
static INLINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+#.*$").unwrap());

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
    env_file: Option<PathBuf>,
}

impl EnvConfig {
    /// Build from an already-resolved variable map (useful for testing).
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self { vars, env_file: None }
    }

    /// Snapshot the process environment, filling gaps from `env_file`.
    ///
    /// A missing `.env` file is not an error. Process variables win over
    /// file entries.
    pub async fn load(env_file: &Path) -> Result<Self, ConfigError> {
        let mut vars = HashMap::new();
        if fs::try_exists(env_file).await.unwrap_or(false) {
            let raw = fs::read_to_string(env_file)
                .await
                .map_err(|e| ConfigError::SettingsFile {
                    path: env_file.to_path_buf(),
                    message: e.to_string(),
                })?;
            vars = parse_dotenv(&raw);
            debug!(path = %env_file.display(), count = vars.len(), "Loaded .env file");
        } else {
            debug!(path = %env_file.display(), ".env file not found; using process environment only");
        }
        vars.extend(process_vars());
        Ok(Self {
            vars,
            env_file: Some(env_file.to_path_buf()),
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Return the API key after presence and shape checks.
    pub fn credential(&self) -> Result<String, ConfigError> {
        let key = self.get(API_KEY_VAR).map(str::trim).unwrap_or("");
        if key.is_empty() {
            return Err(ConfigError::CredentialMissing { var: API_KEY_VAR.to_string() });
        }
        if key == API_KEY_PLACEHOLDER || !key.starts_with(API_KEY_PREFIX) {
            return Err(ConfigError::CredentialInvalid { var: API_KEY_VAR.to_string() });
        }
        Ok(key.to_string())
    }
}

impl fmt::Display for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.env_file {
            Some(p) => write!(f, "EnvConfig(env_file={})", p.display()),
            None => write!(f, "EnvConfig(env_file=<none>)"),
        }
    }
}

/// Process variables whose name and value are both valid UTF-8. Anything
/// else is skipped rather than aborting the snapshot.
fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

/// Parse `.env` contents. Blank lines and `#` comments are skipped. A quoted
/// value is taken verbatim up to its closing quote; an unquoted value loses
/// any whitespace-preceded `# comment` tail.
pub fn parse_dotenv(contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in contents.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(caps) = DOTENV_LINE.captures(line) else { continue };
        vars.insert(caps[1].to_string(), dotenv_value(&caps[2]).to_string());
    }
    vars
}

fn dotenv_value(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw.strip_prefix(quote) {
            if let Some(end) = inner.find(quote) {
                return &inner[..end];
            }
        }
    }
    match INLINE_COMMENT.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    }
}
