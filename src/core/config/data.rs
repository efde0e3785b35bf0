use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read once at startup. Every key is required; a file missing any
/// of them is rejected rather than silently patched with defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL that chat requests are POSTed to
    pub api_endpoint: String,
    /// Sent verbatim as the `Authorization` header value
    pub authorization_header: String,
    pub bot_name: String,
    pub user_name: String,
}

impl Default for Config {
    /// Template written out when no configuration file exists yet.
    fn default() -> Self {
        Self {
            api_endpoint: "http://localhost:5000/chat".to_string(),
            authorization_header: "your-auth-token".to_string(),
            bot_name: "Chatbot".to_string(),
            user_name: "You".to_string(),
        }
    }
}

/// Convert an absolute path to a user-friendly display string.
///
/// On Unix systems, replaces the home directory prefix with `~` for brevity.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
