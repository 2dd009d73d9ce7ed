use std::path::Path;

use tracing::instrument;

/// Command arguments for `relief init`.
#[derive(Debug, Default, clap::Parser)]
#[command(about = "Write the default configuration file")]
pub struct Init {}

impl Init {
    #[instrument]
    pub fn run(self, config: &Path) -> anyhow::Result<()> {
        if config.exists() {
            anyhow::bail!(
                "Config file {} already exists (edit it directly, or remove it to start over)",
                config.display()
            );
        }

        let defaults = relief::Config::default();
        defaults
            .save(config)
            .map_err(|e| anyhow::anyhow!("Failed to create config file: {e}"))?;

        println!("Initialized relief registry configuration");
        println!("  Created: {}", config.display());
        println!();
        println!("Next steps:");
        println!("  Edit {} to adjust the gender vocabulary", config.display());
        println!("  relief run  # start an interactive session");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn init_writes_a_loadable_default_config() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("relief.toml");

        Init {}.run(&path).expect("init should create the config file");

        let config = relief::Config::load(&path).expect("created file should load");
        assert_eq!(config.genders(), relief::Config::default().genders());
    }

    #[test]
    fn init_refuses_to_overwrite_an_existing_config() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("relief.toml");

        Init {}.run(&path).expect("first init should succeed");
        let err = Init {}
            .run(&path)
            .expect_err("second init should refuse to clobber the file");
        assert!(err.to_string().contains("already exists"));
    }
}
