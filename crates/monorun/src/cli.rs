use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use clap::{ArgAction, Parser, ValueEnum};
use miette::Diagnostic;
use monorun_graph::ProjectGraph;
use monorun_scope::{select_projects, ScopeError, SelectionCriteria};
use tracing::{debug, info};

#[derive(Parser, Clone, Debug, PartialEq)]
#[clap(about = "Lists the workspace projects a target would run against", long_about = None)]
#[command(name = "monorun")]
pub struct Args {
    /// Serialized project graph to select from
    #[clap(long, env = "MONORUN_GRAPH", value_name = "FILE")]
    pub graph: PathBuf,
    /// Only projects declaring this target are selected
    #[clap(long, short = 't', env = "MONORUN_TARGET")]
    pub target: String,
    /// Start from every project in the workspace
    #[clap(long, env = "MONORUN_ALL", conflicts_with = "projects")]
    pub all: bool,
    /// Project names or `*` patterns to select, comma separated
    #[clap(long, short = 'p', env = "MONORUN_PROJECTS", value_delimiter = ',')]
    pub projects: Vec<String>,
    /// Project names or `*` patterns to leave out, comma separated
    #[clap(long, env = "MONORUN_EXCLUDE", value_delimiter = ',')]
    pub exclude: Vec<String>,
    /// How to print the selected projects
    #[clap(long, value_enum, default_value_t = OutputFormat::Names)]
    pub output: OutputFormat,
    #[clap(flatten)]
    pub verbosity: Verbosity,
}

#[derive(Debug, Parser, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verbosity {
    #[clap(long = "verbosity", conflicts_with = "v", value_name = "COUNT")]
    /// Verbosity level
    pub verbosity: Option<u8>,
    #[clap(
        short = 'v',
        action = ArgAction::Count,
        hide = true,
        conflicts_with = "verbosity"
    )]
    pub v: u8,
}

impl From<Verbosity> for u8 {
    fn from(val: Verbosity) -> Self {
        let Verbosity { verbosity, v } = val;
        verbosity.unwrap_or(v)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One project name per line
    #[default]
    Names,
    /// The selected project records as a JSON array
    Json,
}

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("Failed to load project graph from {}", .path.display())]
    Graph {
        path: PathBuf,
        #[source]
        err: monorun_graph::Error,
    },
    #[error("Nothing to select from")]
    #[diagnostic(
        code(nothing_to_select),
        help("pass --all or list projects with --projects")
    )]
    NothingToSelect,
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scope(#[from] ScopeError),
    #[error("Failed to write selection: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize selection: {0}")]
    Json(#[from] serde_json::Error),
}

impl Args {
    /// Turns the command line into selection criteria. List entries are
    /// trimmed and empty entries (e.g. from a trailing comma) dropped.
    pub fn criteria(&self) -> Result<SelectionCriteria, Error> {
        let projects = normalize_list(&self.projects);
        if !self.all && projects.is_empty() {
            return Err(Error::NothingToSelect);
        }

        let criteria = SelectionCriteria::new(self.target.trim())
            .with_projects(projects)
            .with_exclude(normalize_list(&self.exclude));
        Ok(if self.all {
            criteria.with_all()
        } else {
            criteria
        })
    }
}

fn normalize_list(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

fn load_graph(path: &Path) -> Result<ProjectGraph, Error> {
    let to_error = |err| Error::Graph {
        path: path.to_owned(),
        err,
    };
    let file = File::open(path).map_err(|err| to_error(monorun_graph::Error::Io(err)))?;
    ProjectGraph::from_reader(BufReader::new(file)).map_err(to_error)
}

pub fn run(args: &Args, out: &mut impl Write) -> Result<(), Error> {
    let criteria = args.criteria()?;
    debug!("selecting with {:?}", criteria);

    let graph = load_graph(&args.graph)?;
    info!(
        "loaded {} projects from {}",
        graph.len(),
        args.graph.display()
    );

    let selected = select_projects(&criteria, &graph)?;

    match args.output {
        OutputFormat::Names => {
            for project in &selected {
                writeln!(out, "{}", project.name)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &selected)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(())
}
