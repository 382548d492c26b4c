//! Configuration types for carve-server

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use utoipa::ToSchema;

/// Top-level configuration
///
/// Works out of the box with zero configuration: scratch directories next to
/// the working directory, foremost discovered from PATH, API on
/// `127.0.0.1:3001`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Scratch workspace layout
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// External carving tool settings
    #[serde(default)]
    pub carver: CarverConfig,

    /// API server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Workspace layout: the two scratch directories and the archive location
///
/// Both directories are created at startup and cleared at the start of every
/// upload cycle. The archive file is overwritten, never versioned.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkspaceConfig {
    /// Directory holding the currently uploaded file (default: "./intake")
    #[serde(default = "default_intake_dir")]
    pub intake_dir: PathBuf,

    /// Directory the carver writes reconstructed files into (default: "./recovered")
    #[serde(default = "default_recovered_dir")]
    pub recovered_dir: PathBuf,

    /// Location of the downloadable archive (default: "./recovered_files.zip")
    #[serde(default = "default_archive_path")]
    pub archive_path: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            intake_dir: default_intake_dir(),
            recovered_dir: default_recovered_dir(),
            archive_path: default_archive_path(),
        }
    }
}

/// External carving tool settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CarverConfig {
    /// Path to the foremost executable (auto-detected if None)
    #[serde(default)]
    pub foremost_path: Option<PathBuf>,

    /// Whether to search PATH for the binary if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Extra arguments appended to every carver invocation
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for CarverConfig {
    fn default() -> Self {
        Self {
            foremost_path: None,
            search_path: true,
            extra_args: Vec::new(),
        }
    }
}

/// Server configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerConfig {
    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address the API server binds to (default: 127.0.0.1:3001)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Whether to add a CORS layer (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins; "*" allows any origin (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Serve interactive Swagger UI at /swagger-ui (default: false)
    #[serde(default)]
    pub swagger_ui: bool,

    /// Maximum accepted upload size in bytes (None = unlimited, the default;
    /// uploaded disk images are routinely larger than any sensible cap)
    #[serde(default)]
    pub upload_limit_bytes: Option<usize>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: false,
            upload_limit_bytes: None,
        }
    }
}

fn default_intake_dir() -> PathBuf {
    PathBuf::from("./intake")
}

fn default_recovered_dir() -> PathBuf {
    PathBuf::from("./recovered")
}

fn default_archive_path() -> PathBuf {
    PathBuf::from("./recovered_files.zip")
}

fn default_true() -> bool {
    true
}

#[allow(clippy::unwrap_used)] // literal always parses
fn default_bind_address() -> SocketAddr {
    "127.0.0.1:3001".parse().unwrap()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
