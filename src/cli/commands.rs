//! CLI command implementations
//!
//! Every command loads and validates the config first. Commands that need
//! records open the configured source; `explain` never does.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::executor::{EngineError, Paginator, SalesQueryEngine};
use crate::http_server::{HttpServer, SalesState};
use crate::model::validate_catalog;
use crate::observability::{init_logging, Event};
use crate::planner::{ExplainPlan, QueryPlanner, QueryRequest};
use crate::storage::{MemoryStore, PostgresStore, RecordSource, SalesSqlBuilder, DEFAULT_TABLE};

use super::args::Command;
use super::config::{Config, SourceConfig};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Main entry point for the CLI
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Query { config } => query(&config),
        Command::Explain { config } => explain(&config),
        Command::Check { config } => check(&config),
    }
}

/// Start the HTTP server
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = load_config(config_path)?;
    info!(event = %Event::BootStart, environment = %config.environment, "starting");

    validate_catalog().map_err(CliError::boot_failed)?;

    let mut http_config = config.http.clone();
    if let Some(port) = port {
        http_config.port = port;
    }

    block_on(async move {
        let source = open_source(&config.source).await?;
        let engine = SalesQueryEngine::new(source);
        let state = Arc::new(SalesState::new(engine, config.environment));

        HttpServer::new(http_config, state)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Execute a single listing query
///
/// Reads request parameters as a JSON object from stdin and writes the
/// response envelope (or a validation error) to stdout.
pub fn query(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let request = QueryRequest::from_json(&read_request()?)?;

    block_on(async move {
        let engine = SalesQueryEngine::new(open_source(&config.source).await?);
        match engine.query(&request).await {
            Ok(result) => write_response(serde_json::to_value(result)?),
            Err(EngineError::Validation(err)) => write_error(err.code().code(), err.message()),
            Err(EngineError::Store(err)) => Err(err.into()),
        }
    })
}

/// Explain a listing query without executing it
pub fn explain(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let request = QueryRequest::from_json(&read_request()?)?;
    let plan = explain_request(&config.source, &request);
    write_response(serde_json::to_value(plan)?)
}

/// Validate config and source, report the record count
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    validate_catalog().map_err(CliError::boot_failed)?;

    block_on(async move {
        let source = open_source(&config.source).await?;
        let record_count = source.record_count().await?;
        write_response(json!({
            "dataSource": source.kind(),
            "recordCount": record_count,
            "environment": config.environment,
        }))
    })
}

/// Plans `request` and attaches the page statement the Postgres source
/// would run for it
pub fn explain_request(source: &SourceConfig, request: &QueryRequest) -> ExplainPlan {
    let table = match source {
        SourceConfig::Postgres(pg) => pg.table.as_str(),
        SourceConfig::Csv { .. } => DEFAULT_TABLE,
    };

    match QueryPlanner::plan(request) {
        Ok(plan) => {
            // Row count is unknown without a database; the window is bound,
            // not inlined, so any total yields the same text
            let page = Paginator::resolve(0, plan.page);
            let statement =
                SalesSqlBuilder::new(table).page_query(&plan.filter, &plan.sort, &page);
            ExplainPlan::from_plan(&plan).with_sql(statement.sql())
        }
        Err(err) => ExplainPlan::from_error(&err),
    }
}

/// Opens the configured record source
pub async fn open_source(source: &SourceConfig) -> CliResult<Arc<dyn RecordSource>> {
    let opened: Arc<dyn RecordSource> = match source {
        SourceConfig::Csv { path } => {
            let path = path.clone();
            let store = tokio::task::spawn_blocking(move || MemoryStore::from_csv(path))
                .await
                .map_err(|e| CliError::boot_failed(format!("CSV load task failed: {}", e)))??;
            Arc::new(store)
        }
        SourceConfig::Postgres(pg) => Arc::new(PostgresStore::connect(pg).await?),
    };
    Ok(opened)
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    init_logging(&config.logging);
    info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        source = %config.source.kind(),
        "configuration loaded"
    );
    Ok(config)
}

fn block_on<F>(future: F) -> CliResult<()>
where
    F: std::future::Future<Output = CliResult<()>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(future)
}
