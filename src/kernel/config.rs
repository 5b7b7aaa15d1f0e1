use serde::{Deserialize, Serialize};

/// Startup program bundled with the crate
pub const STARTUP_PROGRAM: &str = include_str!("startup.pls");

/// Kernel settings
///
/// Every field has a default, so a partial document deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Program evaluated at construction and after every reset
    pub startup_program: String,
    /// Relaunch the worker once `Kernel::reset` has joined it
    pub restart_after_reset: bool,
    /// Name given to the worker thread
    pub thread_name: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig {
            startup_program: STARTUP_PROGRAM.to_string(),
            restart_after_reset: false,
            thread_name: "plotlisp-kernel".to_string(),
        }
    }
}

impl KernelConfig {
    /// Config with no startup program
    pub fn bare() -> Self {
        KernelConfig {
            startup_program: String::new(),
            ..Self::default()
        }
    }
}
