//! `page-query`: run one connection query against a JSON document file.
//!
//! ```text
//! page-query --data items.json --collection items --first 5 --sort-by priority
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pagewise_core::{ConnectionArgs, Document, PageOptions, PageRequest, PredicateNode, Query};
use pagewise_server::{
    build_pagination_pipeline, CacheConfig, CacheInvalidator, CompositeMutationObserver,
    DirtyFlag, MemoryCache, MemoryStore, PagingConfig, ReadThroughCache,
};
use tower::ServiceExt;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "page-query", about = "Query one page of a JSON document collection")]
struct Args {
    /// JSON file holding an array of documents, each with a string `_id`.
    #[arg(long, env = "PAGE_QUERY_DATA")]
    data: PathBuf,

    /// Collection name the documents are loaded into.
    #[arg(long, default_value = "items")]
    collection: String,

    /// Base filter as a JSON predicate tree.
    #[arg(long)]
    filter: Option<String>,

    #[arg(long)]
    first: Option<u32>,

    #[arg(long)]
    after: Option<String>,

    #[arg(long)]
    last: Option<u32>,

    #[arg(long)]
    before: Option<String>,

    #[arg(long)]
    offset: Option<u32>,

    #[arg(long)]
    sort_by: Option<String>,

    /// `asc` or `desc`.
    #[arg(long)]
    sort_order: Option<String>,

    /// Skip the totalCount query.
    #[arg(long)]
    no_total_count: bool,

    /// Page size when neither `--first` nor `--last` is given.
    #[arg(long, env = "PAGE_QUERY_DEFAULT_LIMIT", default_value_t = pagewise_core::DEFAULT_LIMIT)]
    default_limit: u32,

    /// Upper bound on `--first`/`--last`.
    #[arg(long, env = "PAGE_QUERY_MAX_LIMIT")]
    max_limit: Option<u32>,

    /// Run without the read-through cache.
    #[arg(long)]
    no_cache: bool,

    /// Emit logs as JSON.
    #[arg(long, env = "JSON_LOGS")]
    log_json: bool,

    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);

    let raw = tokio::fs::read_to_string(&args.data)
        .await
        .with_context(|| format!("reading {}", args.data.display()))?;
    let documents: Vec<Document> =
        serde_json::from_str(&raw).context("documents must be a JSON array of objects")?;

    let memory = Arc::new(MemoryCache::new());
    let cache_config = CacheConfig::default();
    let cache = if args.no_cache {
        ReadThroughCache::disabled()
    } else {
        ReadThroughCache::new(memory.clone(), cache_config.clone())
    };
    let invalidator = CacheInvalidator::new(DirtyFlag::new(memory, &cache_config));
    let store = Arc::new(MemoryStore::with_observer(Arc::new(
        CompositeMutationObserver::new(vec![Arc::new(invalidator)]),
    )));
    let loaded = documents.len();
    store.insert_many(&args.collection, documents).await;
    info!(collection = %args.collection, loaded, "documents loaded");

    let query = match &args.filter {
        Some(filter) => Query::filtered(
            &args.collection,
            serde_json::from_str::<PredicateNode>(filter).context("parsing --filter")?,
        ),
        None => Query::all(&args.collection),
    };
    let request = PageRequest::new(
        query,
        ConnectionArgs {
            first: args.first,
            after: args.after,
            last: args.last,
            before: args.before,
            offset: args.offset,
            sort_by: args.sort_by,
            sort_order: args.sort_order,
        },
    )
    .with_options(PageOptions {
        include_total_count: !args.no_total_count,
        ..PageOptions::default()
    });

    let paging = PagingConfig {
        default_limit: args.default_limit,
        max_limit: args.max_limit,
    };
    let pipeline = build_pagination_pipeline(store, paging, cache);
    let connection = pipeline.oneshot(request).await?;

    println!("{}", serde_json::to_string_pretty(&connection)?);
    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
