use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Env var that overrides `email.password` so the credential can stay out of the config file.
pub const SMTP_PASSWORD_ENV: &str = "SMTP_PASSWORD";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Used for the log file name (`Logs/<name>Log.txt`) and lifecycle messages.
    #[serde(default = "default_agent_name")]
    pub name: String,
    /// Directory that holds the `Logs` subdirectory. Defaults to the executable's directory.
    #[serde(default = "default_install_dir")]
    pub install_dir: PathBuf,
    #[serde(default = "default_collection_interval_secs")]
    pub collection_interval_secs: u64,
}

fn default_agent_name() -> String {
    "DiskHealthService".into()
}

/// Directory of the running executable; `.` if it cannot be resolved.
pub fn default_install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_collection_interval_secs() -> u64 {
    3600
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            install_dir: default_install_dir(),
            collection_interval_secs: default_collection_interval_secs(),
        }
    }
}

impl AgentConfig {
    pub fn collection_interval(&self) -> Duration {
        Duration::from_secs(self.collection_interval_secs)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.install_dir.join("Logs")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    "DiskHealth.db".into()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsConfig {
    /// Send an email for every capacity or hardware warning. Requires `[email]`.
    #[serde(default)]
    pub email_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub from_address: String,
    #[serde(default)]
    pub password: String,
    pub to_address: String,
}

fn default_smtp_port() -> u16 {
    587
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        let mut config: AppConfig = toml::from_str(&s)?;
        if let Ok(password) = std::env::var(SMTP_PASSWORD_ENV)
            && let Some(email) = config.email.as_mut()
        {
            email.password = password;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.agent.name.is_empty(), "agent.name must be non-empty");
        anyhow::ensure!(
            self.agent.collection_interval_secs > 0,
            "agent.collection_interval_secs must be > 0, got {}",
            self.agent.collection_interval_secs
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        if self.alerts.email_enabled {
            let Some(email) = &self.email else {
                anyhow::bail!("alerts.email_enabled requires an [email] section");
            };
            email.validate()?;
        }
        Ok(())
    }
}

impl EmailConfig {
    // Presence only; addresses are parsed when the message is built.
    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.smtp_host.is_empty(),
            "email.smtp_host must be non-empty"
        );
        anyhow::ensure!(self.smtp_port > 0, "email.smtp_port must be > 0");
        anyhow::ensure!(
            !self.from_address.is_empty(),
            "email.from_address must be non-empty"
        );
        anyhow::ensure!(
            !self.to_address.is_empty(),
            "email.to_address must be non-empty"
        );
        Ok(())
    }
}
