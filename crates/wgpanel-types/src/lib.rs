//! wgpanel-types: Shared API type definitions for the wgpanel dashboard.
//!
//! This crate contains the data models, request bodies, and the response
//! envelope exchanged with the wgpanel REST backend, shared between the
//! dashboard controller and its tests.

#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default WireGuard listen port for a fresh server form.
pub const DEFAULT_LISTEN_PORT: u16 = 51820;

/// Default VPN network CIDR for a fresh server form.
pub const DEFAULT_NETWORK: &str = "10.0.0.0/24";

/// Default DNS resolver handed to clients.
pub const DEFAULT_DNS: &str = "8.8.8.8";

/// Default allowed-IPs range routed through the tunnel.
pub const DEFAULT_ALLOWED_IPS: &str = "0.0.0.0/0";

/// Envelope every backend endpoint wraps its JSON payload in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend handled the request.
    pub success: bool,
    /// Payload, present on success for data-bearing endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable error text, present when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Failure reported by the envelope itself, after transport succeeded.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The backend set `success: false`; carries its error text.
    #[error("{0}")]
    Backend(String),

    /// The backend claimed success but sent no payload.
    #[error("backend reported success without data")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap a data-bearing envelope into its payload.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Backend(self.error_text()));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }

    /// Unwrap an acknowledgement-only envelope (enable/disable/delete).
    pub fn into_ack(self) -> Result<(), EnvelopeError> {
        if self.success {
            Ok(())
        } else {
            Err(EnvelopeError::Backend(self.error_text()))
        }
    }

    fn error_text(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "unknown backend error".to_string())
    }
}

/// The single WireGuard server configuration managed by the dashboard.
///
/// `GET /api/server` returns an id-less record when no server has been
/// configured yet; an empty `id` therefore means "not configured".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Backend identifier (the interface name). Empty when unconfigured.
    #[serde(default)]
    pub id: String,
    /// Human-readable interface name.
    #[serde(default)]
    pub name: String,
    /// UDP listen port.
    #[serde(default)]
    pub listen_port: u16,
    /// VPN network CIDR, e.g. `10.0.0.0/24`.
    #[serde(default)]
    pub network: String,
    /// DNS resolver handed to clients, e.g. `8.8.8.8`.
    #[serde(default)]
    pub dns: String,
    /// Allowed-IPs range routed through the tunnel, e.g. `0.0.0.0/0`.
    #[serde(default)]
    pub allowed_ips: String,
    /// Public endpoint (`host:port`) clients connect to, if any.
    #[serde(default)]
    pub endpoint: String,
    /// Whether the interface is up.
    #[serde(default)]
    pub is_active: bool,
    /// When this server was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Server {
    /// Whether this record refers to a configured server.
    pub fn is_configured(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Server form fields; doubles as the create/update request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerForm {
    /// Interface name.
    pub name: String,
    /// UDP listen port.
    pub listen_port: u16,
    /// VPN network CIDR.
    pub network: String,
    /// DNS resolver.
    pub dns: String,
    /// Public endpoint, may be empty.
    pub endpoint: String,
    /// Allowed-IPs range.
    pub allowed_ips: String,
}

impl Default for ServerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            listen_port: DEFAULT_LISTEN_PORT,
            network: DEFAULT_NETWORK.to_string(),
            dns: DEFAULT_DNS.to_string(),
            endpoint: String::new(),
            allowed_ips: DEFAULT_ALLOWED_IPS.to_string(),
        }
    }
}

impl From<&Server> for ServerForm {
    /// Populate the form from a record, falling back to the defaults for
    /// fields the backend left zero/empty.
    fn from(server: &Server) -> Self {
        Self {
            name: server.name.clone(),
            listen_port: if server.listen_port == 0 {
                DEFAULT_LISTEN_PORT
            } else {
                server.listen_port
            },
            network: non_empty_or(&server.network, DEFAULT_NETWORK),
            dns: non_empty_or(&server.dns, DEFAULT_DNS),
            endpoint: server.endpoint.clone(),
            allowed_ips: non_empty_or(&server.allowed_ips, DEFAULT_ALLOWED_IPS),
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// One peer/device permitted to connect to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier minted by the backend.
    pub id: Uuid,
    /// Server this client belongs to.
    pub server_id: String,
    /// Human-readable name (e.g. "alice-laptop").
    pub name: String,
    /// Contact email, may be empty.
    #[serde(default)]
    pub email: String,
    /// Addresses assigned to this client inside the VPN network.
    #[serde(default)]
    pub allowed_ips: String,
    /// Whether the peer has an active handshake.
    #[serde(default)]
    pub is_active: bool,
    /// Administratively disabled.
    #[serde(default)]
    pub is_disabled: bool,
    /// Whether the client has downloaded its config at least once.
    #[serde(default)]
    pub downloaded: bool,
    /// When the config was last downloaded.
    #[serde(default)]
    pub download_at: Option<DateTime<Utc>>,
    /// When this client was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Derived display status; never stored by the backend.
    pub fn status(&self) -> ClientStatus {
        ClientStatus::derive(self.is_disabled, self.downloaded)
    }
}

/// Request body for `POST /api/clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    /// Server the new client attaches to.
    pub server_id: String,
    /// Client name.
    pub name: String,
    /// Contact email, may be empty.
    pub email: String,
}

/// Read-only aggregate counts over clients, recomputed server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Total number of clients.
    pub total_clients: u64,
    /// Clients currently active and not disabled.
    pub active_clients: u64,
    /// Administratively disabled clients.
    pub disabled_clients: u64,
    /// Clients that downloaded their config.
    pub downloaded_count: u64,
}

/// Display status of a client, derived from its flags.
///
/// Disabled wins over downloaded; the derivation is pure and total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    /// Enabled, config not yet downloaded.
    Active,
    /// Enabled and config downloaded.
    Downloaded,
    /// Administratively disabled.
    Disabled,
}

impl ClientStatus {
    /// Derive the status from the two stored flags.
    pub fn derive(is_disabled: bool, downloaded: bool) -> Self {
        if is_disabled {
            Self::Disabled
        } else if downloaded {
            Self::Downloaded
        } else {
            Self::Active
        }
    }

    /// Human-readable status label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Downloaded => "Active (downloaded)",
            Self::Disabled => "Disabled",
        }
    }

    /// CSS badge class a markup renderer attaches to the status cell.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::Downloaded => "status-downloaded",
            Self::Disabled => "status-disabled",
        }
    }
}
