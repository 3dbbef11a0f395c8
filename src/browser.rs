//! Opening payment gateway URLs outside the terminal

use anyhow::{bail, Context, Result};
use reqwest::Url;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

/// Something that can show a URL to the user in a new browsing context
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the platform's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        let url = parse_gateway_url(url)?;

        let mut cmd = platform_command(url.as_str());
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to launch browser for {}", url))?;
        tracing::info!(pid = child.id(), "Browser launched");
        reap(child);
        Ok(())
    }
}

/// Wait for a launched opener off the actor thread so it never lingers as a zombie
fn reap(mut child: Child) -> thread::JoinHandle<Option<ExitStatus>> {
    thread::spawn(move || match child.wait() {
        Ok(status) => {
            if !status.success() {
                tracing::warn!(%status, "Browser opener exited with failure");
            }
            Some(status)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to wait for browser opener");
            None
        }
    })
}

/// Parse a gateway link. Only absolute `http`/`https` URLs with a host are
/// handed to the system opener, in their normalized form.
pub fn parse_gateway_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).with_context(|| format!("invalid gateway URL {:?}", url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("refusing to open non-web URL {:?}", url);
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        bail!("gateway URL {:?} has no host", url);
    }
    Ok(parsed)
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("rundll32");
    cmd.arg("url.dll,FileProtocolHandler").arg(url);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_web_schemes_allowed() {
        assert!(parse_gateway_url("https://pay.example/x").is_ok());
        assert!(parse_gateway_url("HTTP://pay.example/x").is_ok());
        assert!(parse_gateway_url("file:///etc/passwd").is_err());
        assert!(parse_gateway_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_gateway_url_needs_host() {
        assert!(parse_gateway_url("https://").is_err());
        assert!(parse_gateway_url("https://exa mple.com/pay").is_err());
        assert!(parse_gateway_url("not a url").is_err());
    }

    #[test]
    fn test_gateway_url_is_normalized() {
        let url = parse_gateway_url("  HTTPS://Pay.Example/x?ref=1 ").unwrap();
        assert_eq!(url.as_str(), "https://pay.example/x?ref=1");
        assert_eq!(url.host_str(), Some("pay.example"));
    }

    #[cfg(unix)]
    #[test]
    fn test_launched_opener_is_reaped() {
        let child = Command::new("true").spawn().unwrap();
        let status = reap(child).join().unwrap();
        assert_eq!(status.map(|s| s.success()), Some(true));

        let child = Command::new("false").spawn().unwrap();
        let status = reap(child).join().unwrap();
        assert_eq!(status.map(|s| s.success()), Some(false));
    }
}
