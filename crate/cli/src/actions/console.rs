use serde::Serialize;
use serde_json::Value;

use crate::error::result::CliResult;

/// Environment variable selecting the output format when `--json` is not given.
pub const CVALIDATE_FORMAT: &str = "CVALIDATE_FORMAT";
pub const CLI_DEFAULT_FORMAT: &str = "text";
pub const CLI_JSON_FORMAT: &str = "json";

/// What a command prints: a text rendering and its JSON counterpart.
#[derive(Debug, Default)]
pub struct Stdout {
    stdout: String,
    json: Option<Value>,
}

impl Stdout {
    #[must_use]
    pub fn new(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_owned(),
            json: None,
        }
    }

    pub fn set_json<T: Serialize>(&mut self, json: &T) -> CliResult<()> {
        self.json = Some(serde_json::to_value(json)?);
        Ok(())
    }

    /// Whether JSON is requested, by flag or by environment.
    #[must_use]
    pub fn json_format(json_flag: bool) -> bool {
        json_flag
            || std::env::var(CVALIDATE_FORMAT)
                .unwrap_or_else(|_| CLI_DEFAULT_FORMAT.to_owned())
                .to_lowercase()
                == CLI_JSON_FORMAT
    }

    /// The text to print in the requested format.
    pub fn render(&self, json_format: bool) -> CliResult<String> {
        if json_format {
            if let Some(json) = &self.json {
                return Ok(serde_json::to_string_pretty(json)?);
            }
        }
        Ok(self.stdout.clone())
    }

    pub fn write(&self, json_format: bool) -> CliResult<()> {
        let output = self.render(json_format)?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }
}
