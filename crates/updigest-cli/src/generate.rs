//! The `generate` command: fetch → filter → render → preview → PDF.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, TimeZone, Utc};
use clap::Args;
use updigest_core::{ReportRules, ReportWindow, MAX_LOOKBACK_DAYS};
use updigest_monday::{extract_updates, BoardItem, ExtractOptions, MondayClient};
use updigest_render::{ChromePdfRenderer, PdfRenderer, ReportRenderer};

use crate::preview;
use crate::rules::load_report_rules;

pub(crate) const PREVIEW_FILE_NAME: &str = "company_updates_preview.html";

#[derive(Debug, Default, Args)]
pub(crate) struct GenerateArgs {
    /// Directory for the preview and PDF [default: UPDIGEST_OUTPUT_DIR or .]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Length of the report window in days [default: UPDIGEST_LOOKBACK_DAYS or 31]
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_LOOKBACK_DAYS))]
    pub days: Option<i64>,

    /// Do not open the HTML preview in the default browser
    #[arg(long)]
    pub no_open: bool,

    /// Skip the PDF export
    #[arg(long)]
    pub no_pdf: bool,
}

/// Run the full report pipeline.
///
/// # Errors
///
/// Fails on invalid configuration, a missing browser (unless `--no-pdf`),
/// any monday.com error, filesystem errors, or a failed PDF print. Failing
/// to open the preview is only logged.
pub(crate) async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = updigest_core::load_app_config_from_env().context("loading configuration")?;
    let rules = load_report_rules(config.rules_path.as_deref())?;
    let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());
    let days = args.days.unwrap_or(config.lookback_days);

    let pdf_renderer = if args.no_pdf {
        None
    } else {
        let renderer = ChromePdfRenderer::locate(config.browser_path.as_deref())
            .context("locating Chrome or Edge for PDF export")?;
        tracing::debug!(browser = %renderer.browser().display(), "using browser");
        Some(renderer)
    };

    let window = ReportWindow::ending_at(Utc::now(), days)
        .with_context(|| format!("a {days}-day report window is out of range"))?;
    let client = MondayClient::with_base_url(
        &config.monday_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.monday_api_url,
    )?;
    let items = client
        .fetch_board_items(config.board_id, config.items_limit)
        .await
        .context("fetching board updates from monday.com")?;

    let opts = ExtractOptions {
        team_url: &config.monday_team_url,
        board_id: config.board_id,
        default_avatar: &config.default_avatar,
        window,
    };
    let html = render_report(&items, &opts, &rules, Local)?;

    let preview_path = write_preview(&html, &output_dir)?;
    if !args.no_open {
        preview::open_preview(&preview_path);
    }

    if let Some(renderer) = pdf_renderer {
        let pdf_path = export_pdf(&renderer, &html, &output_dir, &window).await?;
        println!("Monthly PDF generated: {}", pdf_path.display());
    }

    Ok(())
}

/// Extract the window's updates from `items` and render the HTML document.
pub(crate) fn render_report<Tz>(
    items: &[BoardItem],
    opts: &ExtractOptions<'_>,
    rules: &ReportRules,
    tz: Tz,
) -> anyhow::Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let updates = extract_updates(items, opts);
    tracing::info!(
        kept = updates.len(),
        start = %opts.window.start,
        end = %opts.window.end,
        "updates in report window"
    );

    let renderer = ReportRenderer::new(rules, tz).context("compiling report rules")?;
    Ok(renderer.render(&updates, &opts.window))
}

/// Write the preview HTML into `output_dir`, creating the directory if needed.
pub(crate) fn write_preview(html: &str, output_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let path = output_dir.join(PREVIEW_FILE_NAME);
    std::fs::write(&path, html)
        .with_context(|| format!("writing preview {}", path.display()))?;
    tracing::info!(path = %path.display(), "HTML preview written");
    Ok(path)
}

/// Print `html` to `<output_dir>/<heading>.pdf`.
pub(crate) async fn export_pdf<R: PdfRenderer>(
    renderer: &R,
    html: &str,
    output_dir: &Path,
    window: &ReportWindow,
) -> anyhow::Result<PathBuf> {
    let path = output_dir.join(window.pdf_file_name());
    renderer
        .render(html, &path)
        .await
        .with_context(|| format!("printing PDF to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
