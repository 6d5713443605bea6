//! Best-effort wireless association at startup.
//!
//! The browser tries once to join the configured network before the command
//! loop starts. Nothing here is fatal: every outcome is reported as an
//! [`Association`] and the loop runs regardless.
//!
//! Which interface backend exists is decided at compile time. With the
//! `nmcli` feature, [`create_interface`] drives NetworkManager; without it
//! there is no wireless capability and association is a no-op.

#[cfg(feature = "nmcli")]
mod nmcli;

use std::io::Write;
use std::time::Duration;

use crate::config::NetworkConfig;
use crate::error::Result;

/// A wireless interface that can be brought up and joined to a network.
pub trait WirelessInterface: Send + Sync {
    /// Power the radio on.
    fn activate(&self) -> Result<()>;

    /// Start joining `ssid`. Completion is observed with
    /// [`is_connected`](WirelessInterface::is_connected).
    fn connect(&self, ssid: &str, secret: &str) -> Result<()>;

    fn is_connected(&self) -> Result<bool>;

    /// Human-readable connection details, such as the assigned address.
    fn describe(&self) -> String;
}

/// Outcome of one association attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    /// No capability, or credentials are still the placeholders.
    Skipped,
    Connected(String),
    TimedOut,
    /// The interface refused activation or connection.
    Failed(String),
}

/// Polling parameters for [`associate`].
#[derive(Debug, Clone, Copy)]
pub struct AssociationOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl AssociationOptions {
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_seconds),
            ..Self::default()
        }
    }
}

impl Default for AssociationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// The interface backend compiled into this build, if any.
pub fn create_interface() -> Option<Box<dyn WirelessInterface>> {
    #[cfg(feature = "nmcli")]
    {
        match nmcli::NmcliInterface::locate() {
            Ok(iface) => Some(Box::new(iface) as Box<dyn WirelessInterface>),
            Err(e) => {
                tracing::warn!(error = %e, "nmcli unavailable, skipping association");
                None
            }
        }
    }
    #[cfg(not(feature = "nmcli"))]
    {
        None
    }
}

/// Join the configured network, printing progress to `out`.
///
/// Polls the interface every `poll_interval` until it reports a connection
/// or `timeout` elapses, printing one dot per poll. Output write failures
/// are returned; interface failures are not.
pub async fn associate<W: Write>(
    iface: Option<&dyn WirelessInterface>,
    credentials: &NetworkConfig,
    options: AssociationOptions,
    out: &mut W,
) -> Result<Association> {
    let Some(iface) = iface else {
        tracing::debug!("no wireless capability, association skipped");
        return Ok(Association::Skipped);
    };
    if !credentials.has_credentials() {
        tracing::info!("placeholder wifi credentials, association skipped");
        return Ok(Association::Skipped);
    }

    if let Err(e) = iface.activate() {
        tracing::warn!(error = %e, "failed to activate wireless interface");
        return Ok(Association::Failed(e.to_string()));
    }

    write!(out, "Connecting to WiFi")?;
    out.flush()?;

    match iface.is_connected() {
        Ok(true) => {
            let details = iface.describe();
            writeln!(out, "\nConnected: {details}")?;
            return Ok(Association::Connected(details));
        }
        Ok(false) => {}
        Err(e) => tracing::debug!(error = %e, "initial connection probe failed"),
    }

    if let Err(e) = iface.connect(&credentials.ssid, &credentials.password) {
        writeln!(out)?;
        tracing::warn!(ssid = %credentials.ssid, error = %e, "wifi connect failed");
        return Ok(Association::Failed(e.to_string()));
    }

    let started = tokio::time::Instant::now();
    while started.elapsed() < options.timeout {
        tokio::time::sleep(options.poll_interval).await;
        write!(out, ".")?;
        out.flush()?;

        match iface.is_connected() {
            Ok(true) => {
                let details = iface.describe();
                writeln!(out, "\nConnected: {details}")?;
                tracing::info!(ssid = %credentials.ssid, "wifi connected");
                return Ok(Association::Connected(details));
            }
            Ok(false) => {}
            Err(e) => tracing::debug!(error = %e, "connection probe failed"),
        }
    }

    writeln!(out, "\nWiFi connection timed out, continuing offline")?;
    tracing::warn!(
        ssid = %credentials.ssid,
        timeout_ms = options.timeout.as_millis() as u64,
        "wifi association timed out"
    );
    Ok(Association::TimedOut)
}
