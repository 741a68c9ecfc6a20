use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Indentation used when pretty-printing HTML
    #[arg(short, long, default_value = "    ")]
    pub indent: String,

    /// Reject malformed element selectors
    #[arg(long)]
    pub strict: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        indent: args.indent,
        strict_selectors: args.strict,
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)? + "\n")?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = std::env::temp_dir().join(format!("trellis-init-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let cwd = dir.display().to_string();

        let args = InitArgs {
            indent: "  ".to_string(),
            strict: true,
            force: true,
        };
        init(args, &cwd).unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.indent, "  ");
        assert!(config.strict_selectors);
        assert!(config.pretty);

        fs::remove_dir_all(&dir).unwrap();
    }
}
