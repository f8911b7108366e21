use std::fmt;
use std::str::FromStr;

/// Which upstream sources a chat request consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceMode {
    Database,
    #[default]
    Internet,
    Both,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Database => "database",
            SourceMode::Internet => "internet",
            SourceMode::Both => "both",
        }
    }

    /// Lenient parse used at the HTTP boundary: anything unrecognized
    /// behaves like `internet`.
    pub fn from_request(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "database" => Ok(SourceMode::Database),
            "internet" => Ok(SourceMode::Internet),
            "both" => Ok(SourceMode::Both),
            other => Err(format!(
                "Invalid source: {}. Expected: database, internet, or both",
                other
            )),
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
