//! CLI Tooling
//!
//! Command-line interface over the virtual file system. Every command runs
//! against the configured store; the store is initialized (and seeded when
//! empty) before each command.

use crate::agent::{AgentFileTools, CapabilityGateway};
use crate::config::{ConfigLoader, PkgfsConfig, StorageBackend};
use crate::error::ApiError;
use crate::logging::{LogFormat, LogOutput, LoggingConfig};
use crate::store::NodeType;
use crate::tooling::format::{format_listing_table, format_tree_text};
use crate::vfs::FileSystem;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// pkgfs CLI - virtual project file system for R packages
#[derive(Parser)]
#[command(name = "pkgfs")]
#[command(about = "Virtual project file system for R package authoring")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of the on-disk store (implies the sled backend)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log output
    #[arg(long, value_enum)]
    pub log_output: Option<LogOutput>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Overlay the logging flags on top of the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.format = format;
        }
        if let Some(output) = self.log_output {
            config.output = output;
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create the store and seed the initial layout if it is empty
    Init,
    /// Delete every file and folder and restore the initial layout
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the file tree
    Tree {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List every node with type, size and modification time
    Ls {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the content of a file
    Cat { path: String },
    /// Create an empty file
    Touch { path: String },
    /// Create a folder
    Mkdir { path: String },
    /// Replace the content of an existing file
    Write { path: String, content: String },
    /// Delete a file or folder and everything beneath it
    Rm { path: String },
    /// Rename a file or folder in place
    Mv { path: String, new_name: String },
    /// Duplicate a file or folder next to the original
    Cp { path: String },
    /// Create Untitled.R (or the next free Untitled-N.R) in a folder
    NewFile {
        #[arg(default_value = "/")]
        parent: String,
    },
    /// Create NewFolder (or the next free NewFolder-N) in a folder
    NewFolder {
        #[arg(default_value = "/")]
        parent: String,
    },
    /// Copy a local file into /Resources
    Upload {
        file: PathBuf,
        /// Name inside /Resources (defaults to the local file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the export manifest as JSON
    Export,
    /// Run a tool call through the agent gateway
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AgentCommands {
    /// Create a file (or folder with --folder)
    Create {
        path: String,
        #[arg(long)]
        folder: bool,
        #[arg(long)]
        content: Option<String>,
    },
    /// Replace the content of a file
    Edit { path: String, content: String },
    /// Duplicate a file or folder
    Duplicate { path: String },
    /// Print the resource files offered as context
    Resources,
}

/// CLI context for executing commands
pub struct CliContext {
    fs: Arc<FileSystem>,
    gateway: CapabilityGateway,
    runtime: tokio::runtime::Runtime,
}

impl CliContext {
    /// Load configuration from an explicit file, or from the standard sources.
    pub fn load_config(config_path: Option<&Path>) -> Result<PkgfsConfig, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(config)
    }

    /// Open the configured store. `store_override` forces a sled store at that directory.
    pub fn new(config: &PkgfsConfig, store_override: Option<PathBuf>) -> Result<Self, ApiError> {
        let mut storage = config.storage.clone();
        if let Some(path) = store_override {
            storage.backend = StorageBackend::Sled;
            storage.path = Some(path);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let fs = Arc::new(FileSystem::new(storage.open()?));
        let gateway = CapabilityGateway::with_policy(Arc::clone(&fs), config.policy.clone());

        Ok(Self {
            fs,
            gateway,
            runtime,
        })
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        self.runtime.block_on(self.execute_inner(command))
    }

    async fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        let seeded = self.fs.initialize().await?;

        match command {
            Commands::Init => Ok(if seeded {
                "Initialized store with the default layout".to_string()
            } else {
                "Store already initialized".to_string()
            }),
            Commands::Reset { yes } => self.handle_reset(*yes).await,
            Commands::Tree { format } => {
                let forest = self.fs.tree().await?;
                match format.as_str() {
                    "json" => Ok(serde_json::to_string_pretty(&forest)?),
                    "text" => Ok(format_tree_text(&forest).trim_end().to_string()),
                    other => Err(invalid_format(other)),
                }
            }
            Commands::Ls { format } => {
                let records = self.fs.list_all().await?;
                match format.as_str() {
                    "json" => Ok(serde_json::to_string_pretty(&records)?),
                    "text" => Ok(format_listing_table(&records)),
                    other => Err(invalid_format(other)),
                }
            }
            Commands::Cat { path } => Ok(self.fs.read_file(path).await?),
            Commands::Touch { path } => {
                self.fs.create_node(path, NodeType::File, Some("")).await?;
                Ok(format!("Created file {}", path))
            }
            Commands::Mkdir { path } => {
                self.fs.create_node(path, NodeType::Folder, None).await?;
                Ok(format!("Created folder {}", path))
            }
            Commands::Write { path, content } => {
                let record = self.fs.save_file_content(path, content).await?;
                Ok(format!("Saved {} ({} characters)", path, record.size))
            }
            Commands::Rm { path } => {
                let removed = self.fs.delete_node(path).await?;
                Ok(format!("Removed {} ({} nodes)", path, removed))
            }
            Commands::Mv { path, new_name } => {
                let new_path = self.fs.rename_node(path, new_name).await?;
                Ok(format!("Renamed {} -> {}", path, new_path))
            }
            Commands::Cp { path } => {
                let new_path = self.fs.duplicate_node(path).await?;
                Ok(format!("Duplicated {} -> {}", path, new_path))
            }
            Commands::NewFile { parent } => {
                let new_path = self.fs.create_untitled_file(parent).await?;
                Ok(format!("Created file {}", new_path))
            }
            Commands::NewFolder { parent } => {
                let new_path = self.fs.create_untitled_folder(parent).await?;
                Ok(format!("Created folder {}", new_path))
            }
            Commands::Upload { file, name } => self.handle_upload(file, name.as_deref()).await,
            Commands::Export => {
                let entries = self.fs.export_entries().await?;
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            Commands::Agent { command } => self.handle_agent(command).await,
        }
    }

    async fn handle_reset(&self, yes: bool) -> Result<String, ApiError> {
        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt("Delete every file and folder and restore the initial layout?")
                .default(false)
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

            if !confirmed {
                return Ok("Reset cancelled".to_string());
            }
        }
        self.fs.reset().await?;
        info!("Reset requested from CLI");
        Ok("File system reset to the initial layout".to_string())
    }

    async fn handle_upload(&self, file: &Path, name: Option<&str>) -> Result<String, ApiError> {
        let content = std::fs::read_to_string(file)?;
        let name = match name {
            Some(name) => name.to_string(),
            None => file
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    ApiError::ConfigError(format!("Cannot derive a name from {}", file.display()))
                })?,
        };
        let record = self.fs.upload_resource(&name, &content).await?;
        Ok(format!("Uploaded {} ({} characters)", record.path, record.size))
    }

    async fn handle_agent(&self, command: &AgentCommands) -> Result<String, ApiError> {
        let outcome = match command {
            AgentCommands::Create {
                path,
                folder,
                content,
            } => {
                let node_type = if *folder {
                    NodeType::Folder
                } else {
                    NodeType::File
                };
                self.gateway
                    .create_node(path, node_type, content.clone())
                    .await
            }
            AgentCommands::Edit { path, content } => {
                self.gateway.edit_file(path, content.clone()).await
            }
            AgentCommands::Duplicate { path } => self.gateway.duplicate_node(path).await,
            AgentCommands::Resources => {
                let files = self.gateway.list_resource_files().await?;
                return Ok(serde_json::to_string_pretty(&files)?);
            }
        };
        Ok(serde_json::to_string_pretty(&outcome)?)
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::ConfigError(format!(
        "Invalid output format: {} (must be 'text' or 'json')",
        format
    ))
}
