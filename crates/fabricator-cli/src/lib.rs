//! Command-line front end for the fabricator resolver.
//!
//! # Key Abstractions
//!
//! - [`FabricatorCli`]: the application, generic over a config provider
//! - [`FabricatorConfig`]: file/env/default configuration via `confyg`
//! - [`CliArgs`]: clap argument definitions

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod render;

pub use app::FabricatorCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand, ResolveArgs};
pub use config::{FabricatorConfig, OutputConfig, OutputFormat, ResolverConfig};
pub use render::{RenderOptions, render};
