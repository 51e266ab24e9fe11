//! `quill build` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_site::{Site, SiteLayout};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for rendered pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Directory containing the layout template (overrides config).
    #[arg(short, long)]
    template_dir: Option<PathBuf>,

    /// Static assets directory mirrored into the output tree (overrides config).
    #[arg(short, long)]
    assets_dir: Option<PathBuf>,

    /// Enable verbose output (per-page logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or the build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            template_dir: self.template_dir,
            assets_dir: self.assets_dir,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source directory: {}",
            config.site.source_dir.display()
        ));
        output.info(&format!(
            "Output directory: {}",
            config.site.output_dir.display()
        ));

        let layout = SiteLayout {
            source_dir: config.site.source_dir,
            output_dir: config.site.output_dir,
            template_dir: config.site.template_dir,
            assets_dir: config.site.assets_dir,
        };

        let mut site = Site::load(layout)?;
        let summary = site.build()?;

        output.success(&format!(
            "Rendered {} pages, copied {} asset files",
            summary.pages, summary.assets
        ));
        Ok(())
    }
}
