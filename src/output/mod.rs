//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        let output = self.format(format)?;
        println!("{}", output);
        Ok(())
    }
}

/// Rows render as a table for both human formats and as a JSON array otherwise.
impl<T> Formattable for Vec<T>
where
    T: Tabled + Serialize,
{
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty | OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "NAME")]
        name: String,
    }

    #[test]
    fn test_vec_formats_per_output_format() {
        let rows = vec![Row {
            name: "office".to_string(),
        }];

        let table = rows.format(OutputFormat::Table).unwrap();
        assert!(table.contains("NAME"));
        assert!(table.contains("office"));

        let json = rows.format(OutputFormat::Json).unwrap();
        assert!(json.contains("\"name\": \"office\""));
    }
}
