use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod check; // use submodule at src/config/check.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub payroll: PayrollConfig,
    #[serde(default)]
    pub crm: CrmConfig,
}

/// Destination identifiers and intake folder for the payroll pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    pub project_id: String,
    pub dataset_id: String,
    pub table_prefix: String,
    pub source_folder: String,
    pub loaded_folder: String,
    pub name_filter: String,
    pub view: String,
    pub materialized_view: String,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            project_id: "tys-bi".to_string(),
            dataset_id: "homebase".to_string(),
            table_prefix: "timesheet_".to_string(),
            source_folder: Config::config_dir()
                .join("intake")
                .to_string_lossy()
                .to_string(),
            loaded_folder: "loaded".to_string(),
            name_filter: "timesheets".to_string(),
            view: "timesheets_v".to_string(),
            materialized_view: "timesheets_mv".to_string(),
        }
    }
}

impl PayrollConfig {
    pub fn dataset_ref(&self) -> String {
        format!("{}.{}", self.project_id, self.dataset_id)
    }

    /// Fully qualified name of a table living in the payroll dataset.
    pub fn qualified(&self, table: &str) -> String {
        format!("{}.{}", self.dataset_ref(), table)
    }
}

/// CRM endpoint, credentials and scrape pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub webdriver_url: String,
    pub ip_echo_url: String,
    pub batch_size: usize,
    pub worklist_limit: usize,
    pub login_settle_secs: u64,
    pub verification_wait_secs: u64,
    pub element_timeout_secs: u64,
    pub field_retries: u32,
    /// Offset used to decide which snapshot is "yesterday"; host time when unset.
    pub utc_offset_hours: Option<i32>,
    pub clients_table: String,
    pub mapping_table: String,
    pub staging_table: String,
    pub verification_table: String,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.referrizer.com".to_string(),
            username: String::new(),
            password: String::new(),
            webdriver_url: "http://localhost:9515".to_string(),
            ip_echo_url: "https://www.curlmyip.org".to_string(),
            batch_size: 200,
            worklist_limit: 500,
            login_settle_secs: 2,
            verification_wait_secs: 100,
            element_timeout_secs: 10,
            field_retries: 0,
            utc_offset_hours: None,
            clients_table: "tys-bi.referrizer.ret_clients".to_string(),
            mapping_table: "tys-bi.referrizer.pow_mapping".to_string(),
            staging_table: "tys-bi.referrizer.pow_mapping_staging".to_string(),
            verification_table: "tys-bi.referrizer.verification_code".to_string(),
        }
    }
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            payroll: PayrollConfig::default(),
            crm: CrmConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rbizsync")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rbizsync")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rbizsync.conf")
    }

    /// Return the full path of the SQLite warehouse
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rbizsync.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write the configuration file (and its directory) for a fresh install.
    ///
    /// A relative `custom_db` is resolved inside the config directory.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(config)
    }
}
