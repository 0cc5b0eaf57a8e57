use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Json,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "file" => Ok(Self::Json),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub store_backend: StoreBackend,
    pub event_channel_capacity: usize,

    /// Signups with these emails get the admin role.
    pub admin_emails: Vec<String>,

    // Demo / guest mode
    pub seed_demo: bool,
    pub demo_email: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/fitforge.json"),
            store_backend: StoreBackend::Json,
            event_channel_capacity: 256,
            admin_emails: Vec::new(),
            seed_demo: false,
            demo_email: "guest@fitforge.demo".into(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't touch process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_backend = match lookup("STORE_BACKEND").filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse().map_err(|e: String| anyhow::anyhow!(e))?,
            None => defaults.store_backend,
        };

        Ok(Self {
            data_file: lookup("DATA_FILE")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            store_backend,
            event_channel_capacity: parse_or(
                "EVENT_CHANNEL_CAPACITY",
                lookup("EVENT_CHANNEL_CAPACITY"),
                defaults.event_channel_capacity,
            )
            .max(1),
            admin_emails: lookup("ADMIN_EMAILS")
                .map(|raw| {
                    raw.split(',')
                        .map(|e| e.trim().to_ascii_lowercase())
                        .filter(|e| !e.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            seed_demo: parse_or("SEED_DEMO", lookup("SEED_DEMO"), defaults.seed_demo),
            demo_email: lookup("DEMO_EMAIL")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.demo_email),
        })
    }
}

impl Config {
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim();
        self.admin_emails.iter().any(|a| a.eq_ignore_ascii_case(email))
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Debug,
{
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %value, default = ?default, "Invalid config value, using default");
            default
        }),
        None => default,
    }
}
