use clap::{Parser, ValueEnum};
use common::config::{Config, ViewerConfig};
use std::{error::Error, path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::{
    client::{HttpOrderSource, OrderSource},
    display::{BufferedResult, Elements, FlagIndicator, StderrNotifier, TextInput},
    render::OrderRenderer,
    viewer::{OrderViewer, SubmitOutcome},
};

const PAGE_TITLE: &str = "Order viewer";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "viewer/config/dev.yaml")]
    pub config: String,

    /// Order to look up. Identifiers are read from stdin, one per line, when omitted
    #[arg(short = 'u', long)]
    pub order_uid: Option<String>,

    /// Write the latest result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Wrap the result in a standalone HTML page
    #[arg(long)]
    pub page: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    /// Canonical order JSON; errors are still rendered as HTML cards
    Json,
}

pub fn initialize_executable(args: &Args) -> Result<Config, Box<dyn Error + Send + Sync>> {
    let mut config = Config::load(&args.config)?;
    initialize_tracing(&config.viewer.log_level);
    config.apply_env_overrides();
    tracing::info!(
        config = %args.config,
        base_url = %config.viewer.base_url,
        "Loaded config"
    );
    Ok(config)
}

/// Logs go to stderr; stdout carries the rendered output.
pub fn initialize_tracing(log_level: &str) {
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level))
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Tracing already initialized: {}", e);
    }
}

/// `RUST_LOG` directives plus the configured level, which falls back to `info`
/// when it is not a level name.
pub fn env_filter(log_level: &str) -> EnvFilter {
    let level = log_level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Unknown log level {:?}, using info", log_level);
        LevelFilter::INFO
    });
    EnvFilter::from_default_env().add_directive(level.into())
}

/// A viewer wired to in-memory display elements, driven from the command line.
pub struct ViewerSession {
    viewer: OrderViewer,
    input: Arc<TextInput>,
    result: Arc<BufferedResult>,
    format: OutputFormat,
    standalone_page: bool,
}

impl ViewerSession {
    pub fn new(
        config: &ViewerConfig,
        format: OutputFormat,
        standalone_page: bool,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let source = Arc::new(HttpOrderSource::new(&config.base_url, &config.order_path));
        Self::with_source(source, format, standalone_page)
    }

    /// `--page` or the config's `standalone_page` turns on the full document.
    pub fn from_args(args: &Args, config: &ViewerConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::new(config, args.format, args.page || config.standalone_page)
    }

    pub fn with_source(
        source: Arc<dyn OrderSource>,
        format: OutputFormat,
        standalone_page: bool,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let input = Arc::new(TextInput::default());
        let result = Arc::new(BufferedResult::default());
        let elements = Elements {
            input: input.clone(),
            indicator: Arc::new(FlagIndicator::default()),
            result: result.clone(),
            notifier: Arc::new(StderrNotifier),
        };
        let viewer = OrderViewer::new(source, OrderRenderer::new()?, elements);
        Ok(Self {
            viewer,
            input,
            result,
            format,
            standalone_page,
        })
    }

    /// Submits `order_uid` and returns what should be written out, if anything.
    pub async fn lookup(&self, order_uid: &str) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        self.input.set(order_uid);
        let output = match self.viewer.submit().await? {
            SubmitOutcome::EmptyInput | SubmitOutcome::Superseded { .. } => return Ok(None),
            SubmitOutcome::Rendered(order) if self.format == OutputFormat::Json => {
                return Ok(Some(serde_json::to_string_pretty(&order)?));
            }
            SubmitOutcome::Rendered(_) | SubmitOutcome::Failed(_) => self.result.html(),
        };

        if self.standalone_page {
            Ok(Some(self.viewer.renderer().render_page(PAGE_TITLE, &output)?))
        } else {
            Ok(Some(output))
        }
    }
}

pub async fn run_viewer(args: Args, config: Config) -> Result<(), Box<dyn Error + Send + Sync>> {
    let session = ViewerSession::from_args(&args, &config.viewer)?;

    match &args.order_uid {
        Some(order_uid) => {
            if let Some(output) = session.lookup(order_uid).await? {
                write_output(args.output.as_ref(), &output).await?;
            }
        }
        None => {
            tracing::info!("Reading order UIDs from stdin");
            run_lines(&session, BufReader::new(tokio::io::stdin()), args.output.as_ref()).await?;
        }
    }

    Ok(())
}

/// Submits every line of `reader`; each result overwrites the previous one at `output`.
pub async fn run_lines<R>(
    session: &ViewerSession,
    reader: R,
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(result) = session.lookup(&line).await? {
            write_output(output, &result).await?;
        }
    }
    Ok(())
}

async fn write_output(path: Option<&PathBuf>, output: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    match path {
        Some(path) => {
            tokio::fs::write(path, output).await?;
            tracing::info!(path = %path.display(), "Wrote result");
        }
        None => println!("{}", output),
    }
    Ok(())
}
