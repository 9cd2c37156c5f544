//! valuectx command line host
//!
//! Opens a database and routes calls to the named numeric index endpoints.
//! Results are printed as JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use valuectx::{invoke, Database, EdgeId, Element, Endpoint, EntityId, IndexTarget, Source, ValueContext};

/// Numeric range indexes over graph nodes and relationships.
#[derive(Parser, Debug)]
#[command(name = "valuectx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the database file
    #[arg(short, long, env = "VALUECTX_DB", global = true)]
    database: Option<PathBuf>,

    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a node
    CreateNode {
        /// Label to attach (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },

    /// Create a relationship between two nodes
    CreateRelationship {
        /// Source node id
        #[arg(long)]
        from: u64,

        /// Target node id
        #[arg(long)]
        to: u64,

        /// Relationship type
        #[arg(short = 't', long = "type")]
        edge_type: String,
    },

    /// Call a named endpoint
    Call {
        /// Endpoint name, e.g. post_long or get_long_range_node
        endpoint: String,

        /// Call on this node
        #[arg(long, conflicts_with = "relationship")]
        node: Option<u64>,

        /// Call on this relationship
        #[arg(long)]
        relationship: Option<u64>,

        /// Parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },

    /// List the endpoint names
    Endpoints,

    /// List registered indexes
    Indexes {
        /// List relationship indexes instead of node indexes
        #[arg(long)]
        relationships: bool,
    },

    /// Show every value recorded under a key
    Values {
        /// Index name
        index: String,

        /// Key to inspect
        key: String,

        /// Read the relationship index instead of the node index
        #[arg(long)]
        relationships: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("valuectx=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Endpoints = cli.command {
        for endpoint in Endpoint::all() {
            println!("{endpoint}");
        }
        return Ok(());
    }

    let path = cli.database.context("no database given; pass --database or set VALUECTX_DB")?;
    let db = Database::open(&path).with_context(|| format!("failed to open {}", path.display()))?;

    run(&db, cli.command)
}

fn run(db: &Database, command: Commands) -> Result<()> {
    match command {
        Commands::CreateNode { labels } => {
            let mut tx = db.begin()?;
            let entity =
                tx.create_entity(|entity| labels.into_iter().fold(entity, |e, label| e.with_label(label)))?;
            tx.commit()?;
            info!(entity_id = %entity.id, "created node");
            print_json(&entity)
        }
        Commands::CreateRelationship { from, to, edge_type } => {
            let mut tx = db.begin()?;
            let edge = tx
                .create_edge(EntityId::new(from), EntityId::new(to), edge_type)
                .with_context(|| format!("cannot connect {from} to {to}"))?;
            tx.commit()?;
            info!(edge_id = %edge.id, "created relationship");
            print_json(&edge)
        }
        Commands::Call { endpoint, node, relationship, params } => {
            let source = match (node, relationship) {
                (Some(id), _) => Source::Node(EntityId::new(id)),
                (None, Some(id)) => Source::Relationship(EdgeId::new(id)),
                (None, None) => Source::Graph,
            };
            let params: serde_json::Value =
                serde_json::from_str(&params).context("--params must be a JSON object")?;
            let hits = invoke(db, source, &endpoint, params).with_context(|| format!("{endpoint} failed"))?;
            print_json(&hits)
        }
        Commands::Indexes { relationships } => {
            let target = if relationships { IndexTarget::Relationship } else { IndexTarget::Node };
            print_json(&ValueContext::new(db).indexes(target)?)
        }
        Commands::Values { index, key, relationships } => {
            let tx = db.begin_read()?;
            let values: Vec<_> = if relationships {
                tx.numeric_entries::<EdgeId>(&index, &key)?
                    .into_iter()
                    .map(|(id, value)| json!({ "element": Element::Relationship(id), "value": value }))
                    .collect()
            } else {
                tx.numeric_entries::<EntityId>(&index, &key)?
                    .into_iter()
                    .map(|(id, value)| json!({ "element": Element::Node(id), "value": value }))
                    .collect()
            };
            tx.commit()?;
            print_json(&values)
        }
        Commands::Endpoints => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
