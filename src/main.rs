use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wagedash::{
    build::widget_options,
    dashboard::{self, html::render_html},
    load_tables, table, DashboardConfig, Selections, WageMetric,
};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Japanese wage statistics dashboard (RESAS CSV → Vega-Lite / deck.gl)"
)]
struct Cli {
    /// YAML config; defaults are used for anything it leaves out
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative data paths against this directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render the dashboard once (the default)
    Render {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Write here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the select-box choices as JSON
    Options,
    /// Print the heatmap source table
    Source,
    /// Write every derived table to Parquet
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(long, default_value = "./export")]
        dir: PathBuf,
    },
}

#[derive(Args, Default)]
struct SelectionArgs {
    /// Prefecture for the trend chart (default: first in data)
    #[arg(long)]
    prefecture: Option<String>,

    /// Year for the industry chart (default: first in data)
    #[arg(long)]
    year: Option<i32>,

    /// Wage column for the industry chart: a column label or
    /// per-capita / contracted / bonus
    #[arg(long, default_value = "per-capita")]
    metric: WageMetric,

    /// Include the heatmap source rows
    #[arg(long)]
    show_source: bool,
}

impl From<SelectionArgs> for Selections {
    fn from(a: SelectionArgs) -> Self {
        Selections {
            prefecture: a.prefecture,
            year: a.year,
            metric: a.metric,
            show_source: a.show_source,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Html,
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn main() -> Result<()> {
    // logs go to stderr so stdout stays machine-readable
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data = config.data.rooted_at(dir);
    }

    match cli.command.unwrap_or(Command::Render {
        selection: SelectionArgs::default(),
        format: Format::Json,
        output: None,
    }) {
        Command::Render {
            selection,
            format,
            output,
        } => {
            let dash = dashboard::run(&config, &selection.into())?;
            let text = match format {
                Format::Json => dash.to_json()?,
                Format::Html => render_html(&dash)?,
            };
            emit(&text, output.as_deref())?;
        }
        Command::Options => {
            let tables = load_tables(&config.data)?;
            emit(&serde_json::to_string_pretty(&widget_options(&tables))?, None)?;
        }
        Command::Source => {
            let tables = load_tables(&config.data)?;
            let rows = wagedash::build::join_geo(
                &tables.prefectural,
                &tables.geo,
                config.heatmap.year,
            );
            emit(&table::pretty(&table::geo_batch(&rows)?)?, None)?;
        }
        Command::Export { selection, dir } => {
            let tables = load_tables(&config.data)?;
            let selections = Selections::from(selection).resolve(&widget_options(&tables));
            let derived = dashboard::derive(&tables, &selections, &config);
            let written = table::export::export_all(&derived, &dir)?;
            info!(files = written.len(), "export done");
        }
    }
    Ok(())
}
