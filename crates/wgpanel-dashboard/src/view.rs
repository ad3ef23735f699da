// Copyright (C) 2025 The wgpanel authors
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU Affero General Public License as published by the Free
// Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use std::time::Duration;

use uuid::Uuid;
use wgpanel_types::{Client, ClientStatus, Server, ServerForm, Stats};

/// How long a notification stays visible before the host expires it.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Where the controller is being hosted. Operations that only make sense
/// on the dashboard page are gated on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewContext {
    Dashboard,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// One entry in the notification queue. Display and expiry timing belong
/// to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            ttl: NOTIFICATION_TTL,
        }
    }
}

/// Payload of the info panel shown once a server is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub id: String,
    pub listen_port: u16,
    pub network: String,
    pub endpoint: String,
}

impl From<&Server> for ServerInfo {
    fn from(server: &Server) -> Self {
        Self {
            id: server.id.clone(),
            listen_port: server.listen_port,
            network: server.network.clone(),
            endpoint: server.endpoint.clone(),
        }
    }
}

/// Fields of the client-creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
}

/// One client row of the table, ready for a markup renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRow {
    pub id: Uuid,
    pub name: String,
    /// `None` when the record has no email; hosts render a dash.
    pub email: Option<String>,
    pub allowed_ips: String,
    pub status: ClientStatus,
    pub downloaded: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Client(ClientRow),
    /// "no clients found" placeholder.
    Empty,
}

/// Map client records to row descriptors. An empty list yields a single
/// placeholder row, never zero rows.
pub fn client_rows(clients: &[Client]) -> Vec<TableRow> {
    if clients.is_empty() {
        return vec![TableRow::Empty];
    }
    clients
        .iter()
        .map(|client| {
            TableRow::Client(ClientRow {
                id: client.id,
                name: client.name.clone(),
                email: (!client.email.is_empty()).then(|| client.email.clone()),
                allowed_ips: client.allowed_ips.clone(),
                status: client.status(),
                downloaded: client.downloaded,
                disabled: client.is_disabled,
            })
        })
        .collect()
}

/// Host-side surface the controller drives. Implementations decide which
/// widgets actually exist; the controller never probes for presence.
pub trait DashboardView {
    fn context(&self) -> ViewContext;

    fn fill_server_form(&mut self, form: &ServerForm);
    fn clear_client_form(&mut self);

    fn show_server_info(&mut self, info: &ServerInfo);
    fn hide_server_info(&mut self);

    fn render_client_table(&mut self, rows: &[TableRow]);
    fn show_stats(&mut self, stats: &Stats);

    fn push_notification(&mut self, note: Notification);

    /// Ask the user to confirm a destructive action.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Open a URL in a new view context (config download).
    fn open_external(&mut self, url: &str);
}
