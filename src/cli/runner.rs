//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::engine::{ExtractConfig, RequestExecutor};
use crate::error::{Error, Result};
use crate::http::{Classification, HttpClient, ResponseClassifier};
use crate::output::{JsonLinesSink, RecordSink};
use crate::pagination::RequestParams;
use crate::streams::{select_resources, Resource, RESOURCES};
use serde_json::{json, Value};
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Streams => self.streams(),
            Commands::Read {
                output,
                no_fail_fast,
                ..
            } => {
                let requested = self.cli.command.requested_streams();
                self.read(&requested, output.as_deref(), !*no_fail_fast)
                    .await
            }
        }
    }

    /// Load configuration; inline JSON wins over the config file
    pub fn load_config(&self) -> Result<TapConfig> {
        if let Some(json_str) = &self.cli.config_json {
            return TapConfig::from_json_str(json_str);
        }

        if let Some(path) = &self.cli.config {
            return TapConfig::from_file(path);
        }

        Err(Error::config(
            "No configuration provided (use -C <file> or --config-json)",
        ))
    }

    /// Request one small page of the first resource
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = HttpClient::from_tap_config(&config)?;
        let Some(resource) = RESOURCES.first() else {
            return Err(Error::config("No streams registered"));
        };

        let params = RequestParams::new(None, Some(1));
        let url = client.build_url(resource.path(), &params.to_query())?;
        info!("Checking connection to {}", config.api_base_url());

        let (status, message) = match client.get(&url).await {
            Ok(response) => match ResponseClassifier::strict().inspect(&response) {
                Classification::Success => ("SUCCEEDED", "Connection successful".to_string()),
                outcome => (
                    "FAILED",
                    format!("HTTP {} ({outcome})", response.status),
                ),
            },
            Err(e) => ("FAILED", format!("Connection failed: {e}")),
        };

        output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": status,
                "message": message
            }
        }));

        Ok(())
    }

    /// List the registered streams
    fn streams(&self) -> Result<()> {
        let streams: Vec<Value> = RESOURCES
            .iter()
            .map(|r| {
                json!({
                    "name": r.name(),
                    "path": r.path(),
                    "records_path": r.records_path(),
                    "primary_keys": r.primary_keys,
                })
            })
            .collect();

        output_message(&json!({
            "type": "STREAMS",
            "streams": streams
        }));

        Ok(())
    }

    /// Extract the selected streams
    async fn read(&self, requested: &[String], output: Option<&Path>, fail_fast: bool) -> Result<()> {
        let config = self.load_config()?;
        let resources = select_resources(requested)?;

        let client = HttpClient::from_tap_config(&config)?;
        let executor = RequestExecutor::new(client).with_config(
            ExtractConfig::new()
                .with_page_size(config.page_size)
                .with_fail_fast(fail_fast),
        );

        let cancel = executor.cancellation_token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; cancelling extraction");
                cancel.cancel();
            }
        });

        let mut sink: Box<dyn RecordSink> = match output {
            Some(path) => Box::new(JsonLinesSink::create(path).await?),
            None => Box::new(JsonLinesSink::stdout()),
        };

        info!(
            streams = resources.len(),
            "Reading from {}",
            config.api_base_url()
        );
        let result = executor
            .extract_all(resources.iter().copied(), sink.as_mut())
            .await;
        let flushed = sink.flush().await;
        let report = result?;
        flushed?;

        info!(
            streams = report.completed.len(),
            records = report.total_records(),
            "Read complete"
        );

        if report.is_success() {
            return Ok(());
        }

        let failed: Vec<&str> = report.failed.iter().map(|(name, _)| name.as_str()).collect();
        Err(Error::Other(format!(
            "{} of {} streams failed: {}",
            failed.len(),
            resources.len(),
            failed.join(", ")
        )))
    }
}

/// Print a protocol message on stdout
fn output_message(msg: &Value) {
    println!("{msg}");
}
