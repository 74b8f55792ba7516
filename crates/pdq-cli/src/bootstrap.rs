use anyhow::Context;
use pdq_config::PdqConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PdqConfig> {
    load_dotenv()?;
    PdqConfig::load(flags.config.as_deref()).with_context(|| match &flags.config {
        Some(path) => format!("failed to load configuration with {}", path.display()),
        None => "failed to load configuration".to_string(),
    })
}

fn load_dotenv() -> anyhow::Result<()> {
    let env_path = std::env::current_dir()
        .context("failed to determine current directory")?
        .join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

