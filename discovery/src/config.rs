//! Run configuration.
//!
//! The only inputs besides the target selector are two environment
//! variables: `PATH` for executable discovery and `HOME` for redacting the
//! user's home directory from descriptions. Both can be pinned explicitly,
//! which is how tests isolate a run from the process environment.

use std::env;
use std::ffi::OsString;

use crate::output::OutputFormat;

/// Settings for one generation run.
///
/// # Examples
///
/// ```
/// use completion_gen_discovery::config::GenerateConfig;
/// use completion_gen_discovery::output::OutputFormat;
///
/// let config = GenerateConfig::new("docker")
///     .with_format(OutputFormat::Json)
///     .with_home_dir("/home/me");
/// assert_eq!(config.selector, "docker");
/// assert_eq!(config.resolved_home_dir().as_deref(), Some("/home/me"));
/// ```
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Target tool selector as given by the user.
    pub selector: String,
    pub format: OutputFormat,
    /// Search path; `None` reads `PATH` when discovery runs.
    pub search_path: Option<OsString>,
    /// Home directory; `None` reads `HOME` when rendering.
    pub home_dir: Option<String>,
}

impl GenerateConfig {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            format: OutputFormat::default(),
            search_path: None,
            home_dir: None,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn with_home_dir(mut self, home_dir: impl Into<String>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    /// Explicit search path, else `PATH`.
    pub fn resolved_search_path(&self) -> Option<OsString> {
        self.search_path.clone().or_else(|| env::var_os("PATH"))
    }

    /// Explicit home directory, else `HOME`. Empty values count as unset.
    pub fn resolved_home_dir(&self) -> Option<String> {
        self.home_dir
            .clone()
            .or_else(|| env::var("HOME").ok())
            .filter(|home| !home.is_empty())
    }
}
