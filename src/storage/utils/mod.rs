// Utilities for storage module
#[cfg(feature = "gcs")]
pub mod gcs;
pub mod path;
pub mod size;

/// Output format for CLI commands that can render machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human friendly multi-line output
    Human,
    /// Key-value lines, one field per line
    Raw,
    /// Single-line JSON output
    Json,
}
