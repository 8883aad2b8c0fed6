use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the deal a company-specific view is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySelector {
    #[default]
    Target,
    Acquirer,
}

impl CompanySelector {
    /// Maps a free-form request parameter onto a selector.
    ///
    /// Only `"target"` is distinguished; every other value selects the acquirer.
    pub fn from_param(value: &str) -> Self {
        match value {
            "target" => CompanySelector::Target,
            "acquirer" => CompanySelector::Acquirer,
            other => {
                tracing::warn!(company = other, "Unrecognized company selector, using the acquirer.");
                CompanySelector::Acquirer
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySelector::Target => "target",
            CompanySelector::Acquirer => "acquirer",
        }
    }
}

impl fmt::Display for CompanySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
