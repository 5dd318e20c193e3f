use std::io;
use std::process::{Command, Stdio};

use pledgewatch_core::TierChange;
use watch_logging::{watch_error, watch_info};

/// Alerts the operator that a tracked tier changed.
pub trait Notifier: Send + Sync {
    fn notify(&self, page_url: &str, change: &TierChange);
}

/// Opens the pledge page in a new browser tab with the platform opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn notify(&self, page_url: &str, change: &TierChange) {
        match open_in_browser(page_url) {
            Ok(()) => watch_info!("opened {} for tier {}", page_url, change.id),
            Err(err) => watch_error!("could not open browser for {}: {}", page_url, err),
        }
    }
}

fn open_in_browser(url: &str) -> io::Result<()> {
    let mut child = opener(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // Reap the opener in the background; the poll loop keeps running.
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

#[cfg(target_os = "windows")]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(target_os = "macos")]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
