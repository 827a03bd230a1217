mod parser;

use anyhow::{Result, anyhow};
use nom_language::error::convert_error;
use serde::Deserialize;
use std::path::PathBuf;

use crate::SeqList;
use crate::error::SeqError;
use crate::list::OrderedList;
use crate::outcome::{Observation, Outcome};

/// A single list operation, as written on one line of a script
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "String")]
pub enum Op {
    Get(usize),
    Index(String),
    Set(usize, String),
    Append(String),
    Insert(usize, String),
    /// Appends the values in order. An `extend` without values leaves the list unchanged.
    Extend(Vec<String>),
    Remove(String),
    PopLast,
    PopAt(usize),
    Clear,
}

impl Op {
    /// Parses an operation line such as `insert 1 xiaomeim` into an `Op`.
    pub fn parse(s: &str) -> Result<Self> {
        let (_, op) = parser::parse_op(s).map_err(|e| match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => anyhow!(
                "Error parsing op '{s}':\n\n{}",
                convert_error(s, e)
            ),
            nom::Err::Incomplete(needed) => {
                anyhow!("Failed to parse op '{s}', need more data: {needed:?}")
            }
        })?;
        Ok(op)
    }

    /// Applies the operation to `list`.
    ///
    /// Returns the value the operation yields, if any: the element for `get`, the position for
    /// `index`, the replaced element for `set` and the removed element for `remove` and `pop`.
    pub fn apply(&self, list: &mut OrderedList<String>) -> Result<Option<String>, SeqError> {
        let observed = match self {
            Self::Get(i) => Some(list.get(*i)?.clone()),
            Self::Index(v) => Some(list.index_of(v)?.to_string()),
            Self::Set(i, v) => Some(list.set(*i, v.clone())?),
            Self::Append(v) => {
                list.append(v.clone());
                None
            }
            Self::Insert(i, v) => {
                list.insert(*i, v.clone());
                None
            }
            Self::Extend(vs) => {
                list.extend(vs.clone().into());
                None
            }
            Self::Remove(v) => Some(list.remove(v)?),
            Self::PopLast => Some(list.pop_last()?),
            Self::PopAt(i) => Some(list.pop_at(*i)?),
            Self::Clear => {
                list.clear();
                None
            }
        };
        Ok(observed)
    }
}

impl TryFrom<String> for Op {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

/// Quotes `v` if it can't be written as a bare value
fn fmt_value(v: &str) -> String {
    if v.is_empty() || v.contains(|c: char| c.is_whitespace() || c == '"' || c == '\\') {
        format!("\"{}\"", v.replace('\\', r"\\").replace('"', "\\\""))
    } else {
        v.to_string()
    }
}

impl std::fmt::Display for Op {
    /// Returns the operation line for the Op.
    ///
    /// `Op::parse(&format!("{op}"))` results in the original Op.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get(i) => write!(f, "get {i}"),
            Self::Index(v) => write!(f, "index {}", fmt_value(v)),
            Self::Set(i, v) => write!(f, "set {i} {}", fmt_value(v)),
            Self::Append(v) => write!(f, "append {}", fmt_value(v)),
            Self::Insert(i, v) => write!(f, "insert {i} {}", fmt_value(v)),
            Self::Extend(vs) => {
                write!(f, "extend")?;
                for v in vs {
                    write!(f, " {}", fmt_value(v))?;
                }
                Ok(())
            }
            Self::Remove(v) => write!(f, "remove {}", fmt_value(v)),
            Self::PopLast => write!(f, "pop"),
            Self::PopAt(i) => write!(f, "pop {i}"),
            Self::Clear => write!(f, "clear"),
        }
    }
}

/// A list of initial items and the operations to apply to them
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Items the list holds before the first operation
    #[serde(default)]
    pub items: OrderedList<String>,
    /// Operations in the order in which they're applied
    #[serde(default)]
    pub ops: Vec<Op>,
}

impl Script {
    /// Parse script `name` from its file in `r.config.scripts_path`.
    pub fn parse(r: &SeqList, name: &str) -> Result<Self> {
        let spath = r
            .scripts
            .get(name)
            .ok_or(anyhow!("Unknown script {name}"))?;
        let mut fullpath = PathBuf::from(&r.config.scripts_path);
        fullpath.push(spath);
        let contents = std::fs::read_to_string(&fullpath)
            .map_err(|e| anyhow!("Error reading {}: {e}", fullpath.display()))?;
        contents.parse()
    }

    /// Applies all operations in order and returns the resulting `Outcome`.
    ///
    /// The first operation which fails aborts the script. The error names the 1-based number of
    /// the failed operation.
    pub fn run(self, name: &str) -> Result<Outcome> {
        let mut items = self.items;
        let mut observations = vec![];
        for (n, op) in self.ops.iter().enumerate() {
            let observed = op
                .apply(&mut items)
                .map_err(|e| anyhow!("Error in op #{} '{op}': {e}", n + 1))?;
            tracing::debug!(script = name, op = %op, len = items.len(), "applied op");
            if let Some(value) = observed {
                observations.push(Observation {
                    op: op.to_string(),
                    value,
                });
            }
        }
        Ok(Outcome {
            name: name.to_string(),
            observations,
            items,
        })
    }
}

impl std::str::FromStr for Script {
    type Err = anyhow::Error;

    /// Parses a YAML document into a `Script`.
    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
}
