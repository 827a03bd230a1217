#![deny(clippy::suspicious)]
#![warn(clippy::pedantic)]
#![warn(let_underscore_drop)]
// Allows need to be after warn/deny
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod list;
pub mod outcome;
pub mod person;
pub mod script;

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use walkdir::WalkDir;

pub use config::{Config, OutputFormat};
pub use error::SeqError;
pub use list::OrderedList;
pub use outcome::{Observation, Outcome, Report};
pub use person::Person;
use script::Script;

const SUPPORTED_YAML_EXTS: [&str; 2] = ["yml", "yaml"];

/// Holds the runner config and the scripts discovered in `config.scripts_path`
#[derive(Clone, Debug)]
pub struct SeqList {
    pub config: Config,
    /// Discovered scripts and their paths relative to `scripts_path`
    scripts: HashMap<String, PathBuf>,
}

fn err_duplicate_script(root: &str, relpath: &Path, name: &str, prev: &Path) -> Result<()> {
    // Reconstruct full script paths for the error message
    let prev = Path::new(root).join(prev);
    let path = Path::new(root).join(relpath);
    // Ensure error message is stable without having to sort the directory walk
    // iterator.
    let (first, second) = if prev < path {
        (prev, path)
    } else {
        (path, prev)
    };
    Err(anyhow!(
        "Definition of script '{name}' in '{}' collides with definition in '{}'. \
            Scripts can only be defined once.",
        first.display(),
        second.display()
    ))
}

/// Walks `root` and registers every YAML file as a script.
///
/// The script name is the file's path relative to `root` without extension and with path
/// separators replaced by `.`.
fn walk_script_dir(root: &str, scripts: &mut HashMap<String, PathBuf>) -> Result<()> {
    // Follow symlinks so that symlinked script directories are picked up as well.
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        let is_yaml = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SUPPORTED_YAML_EXTS.contains(&ext));
        if !is_yaml || !entry.file_type().is_file() {
            continue;
        }
        let relpath = entry.path().strip_prefix(root)?;
        let name = relpath.with_extension("");
        let name = name
            .to_str()
            .ok_or(anyhow!("Failed to normalize script {}", entry.path().display()))?
            .replace(MAIN_SEPARATOR, ".");
        if let Some(prev) = scripts.get(&name) {
            return err_duplicate_script(root, relpath, &name, prev);
        }
        tracing::debug!(script = %name, path = %relpath.display(), "discovered script");
        scripts.insert(name, relpath.to_path_buf());
    }
    Ok(())
}

impl SeqList {
    pub fn new(scripts_path: &str, format: OutputFormat) -> Result<Self> {
        Self::new_from_config(Config::new(Some(scripts_path), Some(format)))
    }

    pub fn new_from_config(config: Config) -> Result<Self> {
        let mut r = Self {
            config,
            scripts: HashMap::new(),
        };
        r.discover_scripts()
            .map_err(|e| anyhow!("Error while discovering scripts: {e}"))?;
        Ok(r)
    }

    /// Discover all YAML files in `config.scripts_path`.
    ///
    /// This method will raise an error if multiple files resolve to the same script name, e.g.
    /// when both `<name>.yml` and `<name>.yaml` exist.
    fn discover_scripts(&mut self) -> Result<()> {
        walk_script_dir(&self.config.scripts_path, &mut self.scripts)
    }

    /// Returns the discovered script names with their paths relative to `scripts_path`, sorted by
    /// name.
    pub fn scripts(&self) -> Vec<(&str, &Path)> {
        let mut res = self
            .scripts
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_path()))
            .collect::<Vec<_>>();
        res.sort_unstable();
        res
    }

    /// Runs a single script and returns its `Outcome`.
    pub fn run_script(&self, name: &str) -> Result<Outcome> {
        let s = Script::parse(self, name)?;
        let outcome = s.run(name)?;
        tracing::info!(
            script = name,
            observations = outcome.observations.len(),
            len = outcome.items.len(),
            "ran script"
        );
        Ok(outcome)
    }

    /// Runs the scripts in `names`, or all discovered scripts if `names` is empty.
    ///
    /// Scripts are run one after another in name order. The first script which fails aborts the
    /// run.
    pub fn run_scripts(&self, names: &[String]) -> Result<Report> {
        let mut names: Vec<&str> = if names.is_empty() {
            self.scripts.keys().map(String::as_str).collect()
        } else {
            names.iter().map(String::as_str).collect()
        };
        names.sort_unstable();

        let mut report = Report::default();
        for name in names {
            let outcome = self
                .run_script(name)
                .map_err(|e| anyhow!("Error running script {name}: {e}"))?;
            report.outcomes.push(outcome);
        }
        Ok(report)
    }

    /// Runs all discovered scripts.
    pub fn run_all(&self) -> Result<Report> {
        self.run_scripts(&[])
    }
}
