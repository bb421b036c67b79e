//! Best-effort opening of the HTML preview in the desktop's default browser.

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Program and arguments that hand `target` to the platform opener.
pub(crate) fn opener_command(target: &OsStr) -> (&'static str, Vec<OsString>) {
    if cfg!(target_os = "windows") {
        // `start` treats its first quoted argument as the window title.
        (
            "cmd",
            vec!["/C".into(), "start".into(), "".into(), target.to_os_string()],
        )
    } else if cfg!(target_os = "macos") {
        ("open", vec![target.to_os_string()])
    } else {
        ("xdg-open", vec![target.to_os_string()])
    }
}

/// Open `path` without waiting for the viewer. Failures are logged only.
pub(crate) fn open_preview(path: &Path) {
    let (program, args) = opener_command(path.as_os_str());
    match tokio::process::Command::new(program)
        .args(&args)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
    {
        Ok(_child) => tracing::debug!(path = %path.display(), "opened preview"),
        Err(err) => tracing::warn!(
            error = %err,
            path = %path.display(),
            "could not open preview in browser"
        ),
    }
}
