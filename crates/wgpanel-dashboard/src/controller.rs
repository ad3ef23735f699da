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

use reqwest::Client;
use tracing::{debug, error, warn};
use uuid::Uuid;
use wgpanel_types::{NewClient, Server, ServerForm};

use crate::api::{self, ApiError};
use crate::view::{
    ClientForm, DashboardView, Notification, ServerInfo, Severity, ViewContext, client_rows,
};

/// The dashboard controller.
///
/// Owns the one piece of process-wide state, the optional current server,
/// which gates create-vs-update routing for server submissions and whether
/// client creation is permitted. All mutations of it happen inside `&mut
/// self` handlers, so no two operations can race on it.
///
/// Every handler is safe to re-invoke: failures leave the view in its
/// previous valid state and are surfaced as notifications.
pub struct Dashboard<V> {
    http: Client,
    api_host: String,
    current_server: Option<Server>,
    view: V,
}

impl<V: DashboardView> Dashboard<V> {
    pub fn new(http: Client, api_host: impl Into<String>, view: V) -> Self {
        Self {
            http,
            api_host: api_host.into(),
            current_server: None,
            view,
        }
    }

    pub fn current_server(&self) -> Option<&Server> {
        self.current_server.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Runs once per page load. Loads the server config into the form and
    /// info panel when one exists, then loads clients and stats
    /// unconditionally. A failed server fetch is logged and swallowed; the
    /// form simply stays at the host's defaults.
    #[tracing::instrument(skip_all)]
    pub async fn initialize(&mut self) {
        match api::fetch_server(&self.http, &self.api_host).await {
            Ok(Some(server)) => {
                self.view.fill_server_form(&ServerForm::from(&server));
                self.view.show_server_info(&ServerInfo::from(&server));
                self.current_server = Some(server);
            }
            Ok(None) => debug!("no server configured, leaving form at defaults"),
            Err(e) => warn!(error = %e, "failed to load server config"),
        }
        self.reload_clients().await;
        self.reload_stats().await;
    }

    /// Forget the current server and reset the form to defaults so the next
    /// submission creates a new one. No-op with a warning outside the
    /// dashboard context.
    pub fn reset_for_create(&mut self) {
        if self.view.context() != ViewContext::Dashboard {
            self.view.push_notification(Notification::new(
                Severity::Warning,
                "Only available on the dashboard",
            ));
            return;
        }

        self.current_server = None;
        self.view.fill_server_form(&ServerForm::default());
        self.view.hide_server_info();
        self.view.push_notification(Notification::new(
            Severity::Info,
            "Form cleared, ready to create a new server",
        ));
    }

    /// Create the server, or update it when one is already configured. On
    /// success the returned record becomes the current server.
    #[tracing::instrument(skip_all, fields(name = %form.name))]
    pub async fn submit_server(&mut self, form: ServerForm) {
        let (result, verb) = match &self.current_server {
            Some(server) => (
                api::update_server(&self.http, &self.api_host, &server.id, &form).await,
                "updated",
            ),
            None => (
                api::create_server(&self.http, &self.api_host, &form).await,
                "created",
            ),
        };

        match result {
            Ok(server) => {
                debug!(server_id = %server.id, "server {verb}");
                self.view.show_server_info(&ServerInfo::from(&server));
                self.view
                    .push_notification(Notification::new(Severity::Success, format!("Server {verb}")));
                self.current_server = Some(server);
            }
            Err(e) => self.report("Failed to save server", &e),
        }
    }

    /// Create a client under the current server. Fails fast with a warning
    /// when no server is configured; no request is issued in that case.
    #[tracing::instrument(skip_all, fields(name = %form.name))]
    pub async fn submit_client(&mut self, form: ClientForm) {
        let Some(server) = &self.current_server else {
            self.view.push_notification(Notification::new(
                Severity::Warning,
                "Configure the server first",
            ));
            return;
        };

        let body = NewClient {
            server_id: server.id.clone(),
            name: form.name,
            email: form.email,
        };

        match api::create_client(&self.http, &self.api_host, &body).await {
            Ok(client) => {
                debug!(client_id = %client.id, "client created");
                self.view
                    .push_notification(Notification::new(Severity::Success, "Client added"));
                self.view.clear_client_form();
                self.reload_clients().await;
                self.reload_stats().await;
            }
            Err(e) => self.report("Failed to add client", &e),
        }
    }

    /// Fetch the client list, scoped to the current server when one is set,
    /// and render it. On failure the placeholder row is rendered so the
    /// table never shows stale data, and the failure is surfaced as a
    /// notification rather than silently conflated with "no clients".
    #[tracing::instrument(skip_all)]
    pub async fn reload_clients(&mut self) {
        let scope = self.current_server.as_ref().map(|s| s.id.as_str());
        match api::list_clients(&self.http, &self.api_host, scope).await {
            Ok(clients) => {
                debug!(count = clients.len(), "rendering client table");
                self.view.render_client_table(&client_rows(&clients));
            }
            Err(e) => {
                self.report("Failed to load clients", &e);
                self.view.render_client_table(&client_rows(&[]));
            }
        }
    }

    /// Enable the client when it is currently disabled, disable it
    /// otherwise, then re-fetch clients and stats.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_client(&mut self, id: Uuid, currently_disabled: bool) {
        match api::set_client_enabled(&self.http, &self.api_host, id, currently_disabled).await {
            Ok(()) => {
                let message = if currently_disabled {
                    "Client enabled"
                } else {
                    "Client disabled"
                };
                self.view
                    .push_notification(Notification::new(Severity::Success, message));
                self.reload_clients().await;
                self.reload_stats().await;
            }
            Err(e) => self.report("Failed to change client status", &e),
        }
    }

    /// Delete a client after interactive confirmation. Without confirmation
    /// no request is issued and nothing is re-fetched.
    #[tracing::instrument(skip(self))]
    pub async fn delete_client(&mut self, id: Uuid) {
        if !self.view.confirm("Delete this client?") {
            debug!(client_id = %id, "deletion not confirmed");
            return;
        }

        match api::delete_client(&self.http, &self.api_host, id).await {
            Ok(()) => {
                self.view
                    .push_notification(Notification::new(Severity::Success, "Client deleted"));
                self.reload_clients().await;
                self.reload_stats().await;
            }
            Err(e) => self.report("Failed to delete client", &e),
        }
    }

    /// Hand the config-export URL to the host. Fire-and-forget.
    pub fn download_config(&mut self, id: Uuid) {
        let url = api::config_url(&self.api_host, id);
        debug!(url = %url, "opening client config");
        self.view.open_external(&url);
    }

    /// Fetch aggregate counts and display them directly. Failure is logged
    /// and swallowed; the previous numbers stay on screen.
    #[tracing::instrument(skip_all)]
    pub async fn reload_stats(&mut self) {
        match api::fetch_stats(&self.http, &self.api_host).await {
            Ok(stats) => self.view.show_stats(&stats),
            Err(e) => warn!(error = %e, "failed to load stats"),
        }
    }

    /// Re-fetch stats and clients on user request. No-op with a warning
    /// outside the dashboard context.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&mut self) {
        if self.view.context() != ViewContext::Dashboard {
            self.view.push_notification(Notification::new(
                Severity::Warning,
                "Refresh is only available on the dashboard",
            ));
            return;
        }

        self.reload_stats().await;
        self.reload_clients().await;
        self.view
            .push_notification(Notification::new(Severity::Info, "Data refreshed"));
    }

    /// Surface a failure: backend-reported errors carry the backend's text,
    /// transport failures get a generic message and a diagnostic log entry.
    fn report(&mut self, fallback: &str, err: &ApiError) {
        match err.backend_text() {
            Some(text) => {
                self.view.push_notification(Notification::new(
                    Severity::Danger,
                    format!("Error: {text}"),
                ));
            }
            None => {
                error!(error = %err, "request failed");
                self.view
                    .push_notification(Notification::new(Severity::Danger, fallback));
            }
        }
    }
}
