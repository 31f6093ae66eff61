use std::fs;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::builder::ForestBuilder;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::{Forest, NodeId, NodeRef};

/// One input record: a JSON object with arbitrary fields.
pub type Record = Map<String, Value>;

/// Forest built from an input file, roots in input order.
pub struct RecordForest {
    pub forest: Forest<Record>,
    pub roots: Vec<NodeId>,
}

impl RecordForest {
    pub fn trees(&self) -> impl Iterator<Item = NodeRef<'_, Record>> + '_ {
        self.roots.iter().filter_map(|&root| self.forest.node(root))
    }

    /// Finds the first node with `key` as id and returns it with its root.
    pub fn lookup(&self, key: &str) -> CliResult<(NodeId, NodeId)> {
        self.trees()
            .find_map(|tree| {
                tree.find_by_id(key)
                    .map(|node| (tree.node_id(), node.node_id()))
            })
            .ok_or_else(|| CliError::Usage(format!("no node with key '{}'", key)))
    }
}

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    match &cli.command {
        Commands::Tree { file } => _tree(file, settings),
        Commands::Leaves { file } => _leaves(file, settings),
        Commands::Depth { file } => _depth(file, settings),
        Commands::Size { file } => _size(file, settings),
        Commands::Level { file, depth } => _level(file, *depth, settings),
        Commands::Find { file, key } => _find(file, key, settings),
        Commands::Lca {
            file,
            first,
            second,
        } => _lca(file, first, second, settings),
        Commands::Path { file, from, to } => _path(file, from, to, settings),
        Commands::Paths { file } => _paths(file, settings),
        Commands::Json { file } => _json(file, settings),
        Commands::Trim { file } => _trim(file, settings),
        Commands::Config { command } => match command {
            ConfigCommands::Show => _config_show(settings),
            ConfigCommands::Path => _config_path(cli),
        },
        Commands::Completion { shell } => _completion(*shell),
    }
}

/// Reads a JSON array of records.
#[instrument(level = "debug")]
pub fn load_records(path: &Path) -> CliResult<Vec<Record>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("read {}", path.display()), e))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::InvalidInput(format!("{}: {}", path.display(), e)))
}

/// Links records whose `parent_field` equals another record's `key_field`.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn build_forest(records: &[Record], settings: &Settings) -> CliResult<RecordForest> {
    let key_field = settings.key_field.as_str();
    let parent_field = settings.parent_field.as_str();
    let id_field = settings.key_field.clone();

    let (forest, roots) = ForestBuilder::new(records, |parent: &Record, child: &Record| {
        is_parent(parent, child, key_field, parent_field)
    })
    .with_ids(move |record: &Record| field_text(record, &id_field))
    .build()?;

    debug!(roots = roots.len(), nodes = forest.len(), "Built forest");
    Ok(RecordForest { forest, roots })
}

fn is_parent(parent: &Record, child: &Record, key_field: &str, parent_field: &str) -> bool {
    match (parent.get(key_field), child.get(parent_field)) {
        (Some(key), Some(reference)) => !key.is_null() && key == reference,
        _ => false,
    }
}

/// Field value as plain text: strings unquoted, missing fields empty.
pub fn field_text(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn label(node: NodeRef<'_, Record>, settings: &Settings) -> String {
    field_text(node.data(), settings.label_key())
}

fn load(file: &Path, settings: &Settings) -> CliResult<RecordForest> {
    let records = load_records(file)?;
    build_forest(&records, settings)
}

#[instrument(skip(settings))]
fn _tree(file: &Path, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    for tree in records.trees() {
        output::info(&tree.to_tree_with(&|node| label(node, settings)));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _leaves(file: &Path, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    for tree in records.trees() {
        output::header(&label(tree, settings));
        for leaf in tree.leaves() {
            output::detail(&label(leaf, settings));
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _depth(file: &Path, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    for tree in records.trees() {
        output::info(&format!("{}: {}", label(tree, settings), tree.depth()));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _size(file: &Path, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    for tree in records.trees() {
        output::info(&format!("{}: {}", label(tree, settings), tree.size()));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _level(file: &Path, depth: usize, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    for tree in records.trees() {
        for node in tree.level(depth) {
            output::info(&label(node, settings));
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _find(file: &Path, key: &str, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    let (root, target) = records.lookup(key)?;
    let details = records
        .forest
        .node(root)
        .and_then(|root| root.find_full_dfs(&target, |node, target| node.node_id() == *target))
        .ok_or_else(|| CliError::Usage(format!("no node with key '{}'", key)))?;

    output::action("node", &label(details.node, settings));
    let parent = details
        .parent
        .map(|parent| label(parent, settings))
        .unwrap_or_else(|| "-".to_string());
    output::detail(&format!("parent: {}", parent));
    output::detail(&format!("depth: {}", details.depth));
    output::detail(&format!(
        "siblings: {}",
        details
            .siblings
            .iter()
            .map(|sibling| label(*sibling, settings))
            .join(", ")
    ));
    Ok(())
}

#[instrument(skip(settings))]
fn _lca(file: &Path, first: &str, second: &str, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    let (root_a, a) = records.lookup(first)?;
    let (root_b, b) = records.lookup(second)?;

    let ancestor = if root_a == root_b {
        records
            .forest
            .node(root_a)
            .and_then(|root| root.lowest_common_ancestor(a, b))
    } else {
        None
    };
    match ancestor {
        Some(node) => output::info(&label(node, settings)),
        None => output::warning(&format!("'{}' and '{}' share no ancestor", first, second)),
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _path(file: &Path, from: &str, to: &str, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    let (root_a, a) = records.lookup(from)?;
    let (root_b, b) = records.lookup(to)?;

    let path = match records.forest.node(root_a) {
        Some(root) if root_a == root_b => root.path_node_to_node(a, b),
        _ => Vec::new(),
    };
    if path.is_empty() {
        output::warning(&format!("no path between '{}' and '{}'", from, to));
    } else {
        output::info(&path.iter().map(|node| label(*node, settings)).join(" -> "));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _paths(file: &Path, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    for tree in records.trees() {
        for path in tree.path_to_leaves() {
            output::info(&path.iter().map(|node| label(*node, settings)).join(" -> "));
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _json(file: &Path, settings: &Settings) -> CliResult<()> {
    let records = load(file, settings)?;
    for tree in records.trees() {
        let text = if settings.pretty_json {
            tree.serialize_json_pretty()?
        } else {
            tree.serialize_json()?
        };
        output::info(&text);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _trim(file: &Path, settings: &Settings) -> CliResult<()> {
    let mut records = load(file, settings)?;
    for root in records.roots.clone() {
        let trimmed = records.forest.trim_leaves(root)?;
        let names = trimmed
            .iter()
            .filter_map(|&leaf| records.forest.node(leaf))
            .map(|leaf| label(leaf, settings))
            .join(", ");
        output::action("trimmed", &names);
    }
    for tree in records.trees() {
        output::info(&tree.to_tree_with(&|node| label(node, settings)));
    }
    Ok(())
}

fn _config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn _config_path(cli: &Cli) -> CliResult<()> {
    match config::global_config_path() {
        Some(path) => {
            let state = if path.exists() { "exists" } else { "not found" };
            output::action("global", &format!("{} ({})", path.display(), state));
        }
        None => output::warning("no config directory on this platform"),
    }
    if let Some(path) = &cli.config {
        output::action("explicit", &path.display());
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
