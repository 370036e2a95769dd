//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - colored status lines and key/value listings
    Pretty,
    /// Table format - one row per entry (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Parse the `preferences.format` value of the config file.
    pub fn from_preference(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" => Some(OutputFormat::Pretty),
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_preference() {
        assert_eq!(OutputFormat::from_preference("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_preference("pretty"), Some(OutputFormat::Pretty));
        assert_eq!(OutputFormat::from_preference("yaml"), None);
    }
}
