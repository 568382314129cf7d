//! `init` command
//!
//! Writes a starter `healthx.toml`. The commented template documents every
//! setting and its environment override.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path of the configuration file to create
    #[arg(short, long, default_value = "healthx.toml")]
    pub output: String,

    /// Write the commented template
    #[arg(long)]
    pub with_examples: bool,

    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let target = Path::new(&self.output);
        tracing::info!(output = %target.display(), commented = self.with_examples, "Writing configuration template");

        if target.exists() && !self.force {
            println!("❌ {} already exists (use --force to replace it)", target.display());
            return Ok(EXIT_CONFIG);
        }

        if let Err(e) = fs::write(target, self.template()) {
            tracing::error!(error = %e, "Failed to write configuration template");
            println!("❌ Could not write {}: {e}", target.display());
            return Ok(EXIT_FATAL);
        }

        println!("✅ Created {}", target.display());
        println!();
        println!("Try next:");
        println!("  healthx --config {} validate-config", self.output);
        println!("  healthx import people people.csv");
        println!("  healthx export weight --person-id 1");
        Ok(EXIT_SUCCESS)
    }

    fn template(&self) -> String {
        if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# HealthX Configuration File
# Health Tracker Data Exchange Engine

[application]
log_level = "info"
dry_run = false

[store]
snapshot_path = "data/healthx.json"

[exchange]
delimiter = ","
export_path = "exports"

[spreadsheet]
date_column_title = "Date"
systolic_column_title = "Systolic (mmHg)"
diastolic_column_title = "Diastolic (mmHg)"
date_format = "%m/%d/%Y"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# HealthX Configuration File
# Health Tracker Data Exchange Engine
#
# Every setting can be overridden with an environment variable of the
# form HEALTHX_<SECTION>_<KEY>, e.g. HEALTHX_STORE_SNAPSHOT_PATH.
# Values may reference environment variables as ${VAR_NAME}.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

# Validate imports without committing anything
dry_run = false

# ============================================================================
# Store
# ============================================================================
[store]
# JSON snapshot the CLI loads before and saves after each import
snapshot_path = "data/healthx.json"

# ============================================================================
# Exchange Format
# ============================================================================
[exchange]
# Single ASCII field separator. Fields are always double-quoted.
delimiter = ","

# Directory exports are written to when no --output is given
export_path = "exports"

# ============================================================================
# Health Monitor Spreadsheets
# ============================================================================
[spreadsheet]
# Header titles of the columns holding each reading
date_column_title = "Date"
systolic_column_title = "Systolic (mmHg)"
diastolic_column_title = "Diastolic (mmHg)"

# chrono format tried first for the date part of the date column.
# Day and month are swapped once if it does not match.
date_format = "%m/%d/%Y"

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON logs to local files
local_enabled = false
local_path = "logs"

# Rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HealthXConfig;

    #[tokio::test]
    async fn test_init_writes_commented_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("healthx.toml");

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: true,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_SUCCESS);
        assert!(fs::read_to_string(&path).unwrap().contains("HEALTHX_"));
    }

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: HealthXConfig = toml::from_str(&content).unwrap();
            config.validate().unwrap();
            assert_eq!(config.exchange.delimiter, ",");
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("healthx.toml");
        fs::write(&path, "").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
    }
}
