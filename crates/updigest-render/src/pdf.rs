//! HTML → PDF export through a local headless Chromium-family browser.

use std::ffi::OsStr;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::RenderError;

/// Executable names searched on `PATH`, in preference order.
const BROWSER_NAMES: [&str; 6] = [
    "msedge",
    "chrome",
    "microsoft-edge",
    "google-chrome",
    "chromium",
    "chromium-browser",
];

/// Virtual time the browser may spend loading remote images before printing.
const VIRTUAL_TIME_BUDGET_MS: u32 = 20_000;

/// Converts a complete HTML document into a PDF file.
pub trait PdfRenderer {
    /// Write `html` as a PDF to `output`, replacing any existing file.
    fn render(
        &self,
        html: &str,
        output: &Path,
    ) -> impl Future<Output = Result<(), RenderError>> + Send;
}

/// Prints PDFs with Chrome or Edge in headless mode.
#[derive(Debug, Clone)]
pub struct ChromePdfRenderer {
    browser: PathBuf,
}

impl ChromePdfRenderer {
    pub fn new(browser: impl Into<PathBuf>) -> Self {
        Self {
            browser: browser.into(),
        }
    }

    /// Find a browser using the process `PATH` and the standard Windows and
    /// macOS install locations. An explicit `override_path` wins but must
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::BrowserOverrideMissing`] for a dangling
    /// override and [`RenderError::BrowserNotFound`] when nothing is found.
    pub fn locate(override_path: Option<&Path>) -> Result<Self, RenderError> {
        let path_var = std::env::var_os("PATH");
        Self::locate_in(override_path, path_var.as_deref(), &default_install_paths())
    }

    /// [`locate`](Self::locate) with an explicit search `PATH` and install
    /// location list.
    ///
    /// # Errors
    ///
    /// See [`locate`](Self::locate).
    pub fn locate_in(
        override_path: Option<&Path>,
        path_var: Option<&OsStr>,
        install_paths: &[PathBuf],
    ) -> Result<Self, RenderError> {
        if let Some(path) = override_path {
            if path.is_file() {
                return Ok(Self::new(path));
            }
            return Err(RenderError::BrowserOverrideMissing(path.to_path_buf()));
        }

        if let Some(path_var) = path_var {
            for name in BROWSER_NAMES {
                let file_name = format!("{name}{}", std::env::consts::EXE_SUFFIX);
                if let Some(found) = std::env::split_paths(path_var)
                    .map(|dir| dir.join(&file_name))
                    .find(|candidate| candidate.is_file())
                {
                    tracing::debug!(browser = %found.display(), "browser found on PATH");
                    return Ok(Self::new(found));
                }
            }
        }

        install_paths
            .iter()
            .find(|candidate| candidate.is_file())
            .map(|found| {
                tracing::debug!(browser = %found.display(), "browser found in install location");
                Self::new(found)
            })
            .ok_or(RenderError::BrowserNotFound)
    }

    #[must_use]
    pub fn browser(&self) -> &Path {
        &self.browser
    }

    fn print_args(output: &Path, input_url: &Url) -> Vec<String> {
        vec![
            "--headless=new".to_string(),
            "--disable-gpu".to_string(),
            "--print-to-pdf-no-header".to_string(),
            "--no-pdf-header-footer".to_string(),
            "--window-size=800,2000".to_string(),
            format!("--virtual-time-budget={VIRTUAL_TIME_BUDGET_MS}"),
            format!("--print-to-pdf={}", output.display()),
            input_url.to_string(),
        ]
    }
}

impl PdfRenderer for ChromePdfRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<(), RenderError> {
        let mut file = tempfile::Builder::new()
            .prefix("updigest-")
            .suffix(".html")
            .tempfile()?;
        file.write_all(html.as_bytes())?;
        file.flush()?;
        let temp_path = file.into_temp_path();

        let result = self.print(&temp_path, output).await;

        if let Err(err) = temp_path.close() {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %err, "failed to remove temporary report HTML");
            }
        }

        result
    }
}

impl ChromePdfRenderer {
    async fn print(&self, input: &Path, output: &Path) -> Result<(), RenderError> {
        let input_url = Url::from_file_path(input)
            .map_err(|()| RenderError::InvalidPath(input.to_path_buf()))?;
        let output = std::path::absolute(output)?;

        tracing::info!(
            browser = %self.browser.display(),
            output = %output.display(),
            "printing PDF"
        );

        let result = tokio::process::Command::new(&self.browser)
            .args(Self::print_args(&output, &input_url))
            .output()
            .await?;

        if !result.status.success() {
            return Err(RenderError::BrowserFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

fn default_install_paths() -> Vec<PathBuf> {
    install_paths_for(
        std::env::var_os("ProgramFiles")
            .map_or_else(|| PathBuf::from(r"C:\Program Files"), PathBuf::from),
        std::env::var_os("ProgramFiles(x86)")
            .map_or_else(|| PathBuf::from(r"C:\Program Files (x86)"), PathBuf::from),
    )
}

/// Edge before Chrome, `Program Files` before `Program Files (x86)`, then the
/// macOS application bundles.
fn install_paths_for(program_files: PathBuf, program_files_x86: PathBuf) -> Vec<PathBuf> {
    let program_dirs = [program_files, program_files_x86];
    let mut paths = Vec::new();

    for dir in &program_dirs {
        paths.push(dir.join(r"Microsoft\Edge\Application\msedge.exe"));
    }
    for dir in &program_dirs {
        paths.push(dir.join(r"Google\Chrome\Application\chrome.exe"));
    }

    paths.push(PathBuf::from(
        "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    ));
    paths.push(PathBuf::from(
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    ));
    paths.push(PathBuf::from(
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
    ));

    paths
}

#[cfg(test)]
#[path = "pdf_test.rs"]
mod tests;
