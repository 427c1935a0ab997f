//! `stockroll rollup` command - roll up one quote's raw-stock totals

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::api::{ApiClient, RetryPolicy};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::resolver::{QuoteReport, Resolver, ResolverOptions};
use crate::core::shape::StockQuantity;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct RollupArgs {
    /// Quote number to roll up
    pub quote_number: u32,

    /// Resolve vendor names and first price breaks per material
    #[arg(long)]
    pub with_vendors: bool,

    /// Treat malformed or unsupported materials as fatal
    #[arg(long)]
    pub strict: bool,

    /// API base URL
    #[arg(long, env = "STOCKROLL_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token (prefer --token-file for anything long-lived)
    #[arg(long, env = "STOCKROLL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File containing the bearer token
    #[arg(long, env = "STOCKROLL_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Retry attempts per upstream call
    #[arg(long)]
    pub retries: Option<u32>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: RollupArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    let token = config
        .token(args.token.as_deref(), args.token_file.as_deref())
        .map_err(|e| miette::miette!("{}", e))?;
    let base_url = config.base_url(args.base_url.as_deref());

    let client = ApiClient::new(
        &base_url,
        token,
        config.timeout(args.timeout),
        RetryPolicy::with_attempts(config.retries(args.retries)),
    )
    .map_err(|e| miette::miette!("{}", e))?;

    if global.verbose && !global.quiet {
        eprintln!(
            "{} quote {} via {}",
            style("Resolving").cyan().bold(),
            args.quote_number,
            base_url
        );
    }

    let resolver = Resolver::new(
        &client,
        ResolverOptions {
            strict: args.strict,
            with_vendors: args.with_vendors,
        },
    );
    let report = resolver
        .resolve(args.quote_number)
        .map_err(|e| miette::miette!("{}", e))?;

    let rendered = match global.format {
        OutputFormat::Table => render_table(&report),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            json.push('\n');
            json
        }
    };
    write_output(&rendered, args.output)?;

    if !report.warnings.is_empty() && !global.quiet {
        eprintln!(
            "{} {} material(s) excluded from totals",
            style("warning:").yellow().bold(),
            report.warnings.len()
        );
    }

    Ok(())
}

fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

fn render_table(report: &QuoteReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Raw-Stock Rollup: Quote {}\n\n", report.quote_number));
    output.push_str(&format!("Quote ID: {}\n", report.quote_id));

    for part in &report.parts {
        output.push_str(&format!("\n## {} ({})\n", part.description, part.part_id));
        for line in &part.materials {
            let reference = line.reference.as_deref().unwrap_or(&line.material_id);
            output.push_str(&format!(
                "  - {} {} {} {}",
                reference, line.form, line.dimension, line.dimensions
            ));
            if let Some(ref vendor) = line.vendor {
                output.push_str(&format!(" [{}", vendor.name));
                if let Some(price) = vendor.price_per_lb {
                    output.push_str(&format!(" @ ${:.2}/lb", price));
                }
                output.push(']');
            }
            output.push('\n');
        }
        if part.materials.is_empty() {
            output.push_str("  (no rolled-up materials)\n");
        }
    }

    output.push_str("\n## Total stock required\n\n");
    if report.totals.is_empty() {
        output.push_str("(no stock requirements)\n");
    } else {
        output.push_str(&totals_table(report));
        output.push('\n');
    }

    if !report.warnings.is_empty() {
        output.push_str(&format!("\n## Warnings ({})\n\n", report.warnings.len()));
        for warning in &report.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}

fn totals_table(report: &QuoteReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["FORM", "DIMENSION", "LENGTH (in)", "WIDTH (in)"]);

    for (key, quantity) in report.totals.iter() {
        match quantity {
            StockQuantity::BarLength(length) => {
                builder.push_record([
                    key.form.to_string(),
                    key.label.clone(),
                    format!("{:.2}", length),
                    "-".to_string(),
                ]);
            }
            StockQuantity::SheetExtent { length, width } => {
                builder.push_record([
                    key.form.to_string(),
                    key.label.clone(),
                    format!("{:.2}", length),
                    format!("{:.2}", width),
                ]);
            }
        }
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    format!("{}\n", table)
}
