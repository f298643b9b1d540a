use std::path::Path;

use anyhow::bail;

use crate::config::DubConfig;

pub fn init(path: &Path, config: &DubConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config.save(path)?;
    println!("✓ Wrote {}", path.display());
    Ok(())
}

pub fn show(path: &Path, config: &DubConfig) -> anyhow::Result<()> {
    let source = if path.is_file() {
        path.display().to_string()
    } else {
        "defaults".to_string()
    };
    println!("# effective config ({source})");
    print!("{}", toml::to_string_pretty(config)?);
    println!("# missing log: {}", config.missing_log_path().display());
    Ok(())
}
