use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::config::OutputFormat;
use crate::list::OrderedList;

/// A value yielded by an operation of a script
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Observation {
    /// The operation line which yielded the value
    pub op: String,
    pub value: String,
}

/// The result of running a single script
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Outcome {
    /// Name of the script
    pub name: String,
    /// Values yielded by the script's operations, in the order of the operations
    pub observations: Vec<Observation>,
    /// Final state of the list
    pub items: OrderedList<String>,
}

impl Outcome {
    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        for ob in &self.observations {
            writeln!(out, "> {}: {}", ob.op, ob.value)?;
        }
        writeln!(out, "{}: {}", self.name, self.items)
    }

    /// Renders the outcome in the given format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let mut out = String::new();
                self.write_text(&mut out)?;
                Ok(out)
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)? + "\n"),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }
}

/// The results of running several scripts, ordered by script name
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    /// Renders all outcomes in the given format.
    ///
    /// The text format separates outcomes by an empty line. JSON and YAML render the report as
    /// a single document.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let mut out = String::new();
                for (i, o) in self.outcomes.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    o.write_text(&mut out)?;
                }
                Ok(out)
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)? + "\n"),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }
}
