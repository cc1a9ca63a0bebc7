//! `mdocs check` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdocs_config::Config;
use mdocs_site::{DocRegistry, DocUrls, NavNode, NavRoot, SiteError, build_navigation};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover mdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Navigation tree plus the documents whose file is absent.
struct Report {
    nav: NavRoot,
    /// `(compound id, path)` of every missing file, in configuration order.
    missing: Vec<(String, PathBuf)>,
}

impl Report {
    fn is_missing(&self, id: &str) -> bool {
        self.missing.iter().any(|(missing, _)| missing == id)
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or files are missing.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let report = inspect(config.documentation_resolved)?;

        output.heading(&report.nav.label);
        for node in &report.nav.children {
            match node {
                NavNode::Leaf(leaf) => {
                    output.nav_entry(1, &leaf.label, &leaf.uri(), report.is_missing(&leaf.id));
                }
                NavNode::Folder(folder) => {
                    output.info(&format!("  + {}", folder.label));
                    for leaf in &folder.children {
                        output.nav_entry(2, &leaf.label, &leaf.uri(), report.is_missing(&leaf.id));
                    }
                }
            }
        }

        if report.missing.is_empty() {
            output.success("All documentation files found");
            return Ok(());
        }

        for (id, path) in &report.missing {
            output.warning(&format!("{id}: {} does not exist", path.display()));
        }
        Err(CliError::Validation(format!(
            "{} documentation file(s) missing",
            report.missing.len()
        )))
    }
}

/// Build the registry and navigation and look for missing files.
fn inspect<I>(documentation: I) -> Result<Report, SiteError>
where
    I: IntoIterator<Item = (String, PathBuf)>,
{
    let registry = DocRegistry::build(documentation)?;
    let missing = registry
        .iter()
        .filter(|doc| !doc.path().is_file())
        .map(|doc| (doc.id().to_owned(), doc.path().to_path_buf()))
        .collect();

    Ok(Report {
        nav: build_navigation(&registry, &DocUrls::default()),
        missing,
    })
}
