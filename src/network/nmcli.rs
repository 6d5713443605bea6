//! NetworkManager backend driven through the `nmcli` command.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Mutex;

use super::WirelessInterface;
use crate::error::{BrowserError, Result};

pub struct NmcliInterface {
    binary: PathBuf,
    /// In-flight `device wifi connect`, reaped when it exits.
    pending: Mutex<Option<Child>>,
}

impl NmcliInterface {
    /// Find `nmcli` on `PATH`.
    pub fn locate() -> Result<Self> {
        let binary = which::which("nmcli")
            .map_err(|e| BrowserError::Network(format!("nmcli not found: {e}")))?;
        Ok(Self::with_binary(binary))
    }

    fn with_binary(binary: PathBuf) -> Self {
        Self {
            binary,
            pending: Mutex::new(None),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        tracing::trace!(binary = %self.binary.display(), ?args, "running nmcli");
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&self.binary, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BrowserError::Network(format!(
                "nmcli {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Take the in-flight connect attempt, if any.
    fn cancel_pending(&mut self) -> Option<Child> {
        match self.pending.get_mut() {
            Ok(pending) => pending.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    fn reap_pending(&self) {
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        if let Some(child) = pending.as_mut() {
            match child.try_wait() {
                Ok(Some(status)) => {
                    if !status.success() {
                        tracing::warn!(%status, "nmcli connect exited unsuccessfully");
                    }
                    *pending = None;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "failed to poll nmcli connect");
                    *pending = None;
                }
            }
        }
    }
}

impl WirelessInterface for NmcliInterface {
    fn activate(&self) -> Result<()> {
        self.run(&["radio", "wifi", "on"]).map(|_| ())
    }

    fn connect(&self, ssid: &str, secret: &str) -> Result<()> {
        // With --ask nmcli reads the secret from stdin, keeping it off argv.
        let mut child = Command::new(&self.binary)
            .args(["--ask", "device", "wifi", "connect", ssid])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(&self.binary, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = writeln!(stdin, "{secret}") {
                tracing::debug!(error = %e, "nmcli did not read the secret");
            }
        }

        let mut pending = self
            .pending
            .lock()
            .map_err(|_| BrowserError::Network("nmcli state lock poisoned".into()))?;
        if let Some(previous) = pending.take() {
            stop(previous);
        }
        *pending = Some(child);
        Ok(())
    }

    fn is_connected(&self) -> Result<bool> {
        self.reap_pending();
        let stdout = self.run(&["-t", "-f", "STATE", "general"])?;
        Ok(is_connected_state(&stdout))
    }

    fn describe(&self) -> String {
        match self.run(&["-g", "IP4.ADDRESS", "device", "show"]) {
            Ok(stdout) => first_address(&stdout).unwrap_or_else(|| "no IPv4 address".into()),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read interface address");
                "address unavailable".into()
            }
        }
    }
}

impl Drop for NmcliInterface {
    fn drop(&mut self) {
        if let Some(child) = self.cancel_pending() {
            stop(child);
        }
    }
}

/// Kill a connect attempt and reap it.
fn stop(mut child: Child) -> Option<ExitStatus> {
    if let Err(e) = child.kill() {
        tracing::debug!(error = %e, "nmcli connect already exited");
    }
    match child.wait() {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!(error = %e, "failed to reap nmcli connect");
            None
        }
    }
}

fn spawn_error(binary: &Path, e: std::io::Error) -> BrowserError {
    BrowserError::Network(format!("failed to execute {}: {e}", binary.display()))
}

/// `nmcli -t -f STATE general` prints `connected` once fully online.
fn is_connected_state(stdout: &str) -> bool {
    stdout.trim() == "connected"
}

/// First non-empty address from `nmcli -g IP4.ADDRESS device show`.
///
/// Multiple addresses on one device are separated by ` | `.
fn first_address(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .flat_map(|line| line.split(" | "))
        .map(str::trim)
        .find(|addr| !addr.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_state() {
        assert!(is_connected_state("connected\n"));
        assert!(!is_connected_state("connecting\n"));
        assert!(!is_connected_state("connected (site only)\n"));
        assert!(!is_connected_state("disconnected\n"));
    }

    #[test]
    fn first_address_skips_blank_devices() {
        let stdout = "\n\n192.168.1.20/24 | 10.0.0.5/8\n127.0.0.1/8\n";
        assert_eq!(first_address(stdout).as_deref(), Some("192.168.1.20/24"));
    }

    #[test]
    fn first_address_none_when_empty() {
        assert_eq!(first_address("\n\n"), None);
    }

    #[test]
    fn missing_binary_is_a_network_error() {
        let iface = NmcliInterface::with_binary(PathBuf::from("/nonexistent/nmcli"));
        let err = iface.activate().unwrap_err();
        assert!(matches!(err, BrowserError::Network(_)));
        assert_eq!(iface.describe(), "address unavailable");
    }

    #[test]
    fn stop_kills_and_reaps_a_running_child() {
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let status = stop(child).unwrap();
        assert!(!status.success());
    }

    #[test]
    fn drop_stops_pending_connect() {
        let mut iface = NmcliInterface::with_binary(PathBuf::from("/nonexistent/nmcli"));
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();
        *iface.pending.get_mut().unwrap() = Some(child);
        drop(iface);
        // Reaped children no longer have a /proc entry.
        assert!(!Path::new(&format!("/proc/{pid}")).exists());
    }
}
