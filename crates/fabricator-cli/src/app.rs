//! The `fabricator` application.
//!
//! [`FabricatorCli`] is generic over a [`ConfigProvider`] so embedding
//! applications can supply their own resolver defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fabricator::{Blueprint, BlueprintLoader, Fabricator, Report, Stack, read_manifest};
use fabricator_core::{ConfigProvider, FabricateOptions, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command, ResolveArgs};
use crate::config::{FabricatorConfig, OutputFormat};
use crate::config_handlers;
use crate::render::{RenderOptions, render};

/// CLI application parameterized over a config provider.
pub struct FabricatorCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
    format: OutputFormat,
}

impl FabricatorCli<FabricatorConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = FabricatorConfig::load(args.config.as_deref())?;
        let format = config.output.format;
        Ok(Self::new(name, config).with_format(format))
    }
}

impl<C: ConfigProvider> FabricatorCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: OutputFormat::default(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Output format used when `--format` is absent.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Install the tracing subscriber.
    ///
    /// `RUST_LOG` wins over the verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments, printing to stdout.
    pub fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        let output = self.execute(args)?;
        if !output.is_empty() {
            println!("{}", output.trim_end());
        }
        Ok(())
    }

    /// Run a command and return what it would print.
    pub fn execute(&self, args: CliArgs) -> Result<String> {
        match args.command {
            Some(Command::Resolve(resolve)) => self.resolve(&resolve),
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(Command::Version) => Ok(format!("{} {}", self.name, self.version)),
            None => Ok(format!(
                "{} {}: use --help for usage",
                self.name, self.version
            )),
        }
    }

    /// Fabricate the requested stack and render it.
    pub fn resolve(&self, args: &ResolveArgs) -> Result<String> {
        let (stack, options) = self.prepare(args)?;
        let report = self.fabricate(stack, &options)?;
        info!(
            project = self.config.project_name(),
            units = report.units.len(),
            skipped = report.skipped.len(),
            "resolved"
        );
        render(
            &report,
            args.format.unwrap_or(self.format),
            RenderOptions {
                construct: args.construct,
                explain: args.explain,
            },
        )
    }

    fn prepare(&self, args: &ResolveArgs) -> Result<(Stack<Blueprint>, FabricateOptions)> {
        let mut options = self.config.fabricate_options()?;
        if args.no_recursive {
            options.recursive = false;
        }
        if let Some(name) = &args.name {
            options = options.with_name(name.as_str());
        }

        let stack = match (&args.manifest, &args.path) {
            (Some(manifest), _) => {
                let manifest = Path::new(manifest);
                // Manifest entries are relative to the manifest unless a
                // source root was configured.
                if options.source.is_none() {
                    options.source = manifest.parent().map(Path::to_path_buf);
                }
                read_manifest(manifest)?
            }
            (None, Some(path)) => Stack::path(path.as_str()),
            (None, None) => Stack::path("."),
        };
        if let Some(source) = &args.source {
            options.source = Some(PathBuf::from(source));
        }

        debug!(?options, shape = %stack.shape(), "prepared stack");
        Ok((stack, options))
    }

    fn fabricate(
        &self,
        stack: Stack<Blueprint>,
        options: &FabricateOptions,
    ) -> Result<Report<Blueprint>> {
        let loader = BlueprintLoader::new()
            .with_extension(self.config.source_extension())
            .with_index_stem(self.config.index_stem());
        Fabricator::new(loader).fabricate_report(stack, options)
    }
}

// ============================================================================
// Tests
// ============================================================================
