use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;
use wgpanel_types::{
    ApiEnvelope, Client as VpnClient, EnvelopeError, NewClient, Server, ServerForm, Stats,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl ApiError {
    /// Error text the backend attached to a `success: false` envelope.
    pub fn backend_text(&self) -> Option<&str> {
        match self {
            Self::Envelope(EnvelopeError::Backend(msg)) => Some(msg),
            _ => None,
        }
    }
}

fn endpoint(host: &str, path: &str) -> String {
    format!("{}{path}", host.trim_end_matches('/'))
}

/// Per-client config-export URL, opened by the host rather than fetched.
pub fn config_url(host: &str, id: Uuid) -> String {
    endpoint(host, &format!("/api/clients/{id}/config"))
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let envelope: ApiEnvelope<T> = resp.json().await?;
    Ok(envelope.into_data()?)
}

async fn decode_ack(resp: reqwest::Response) -> Result<(), ApiError> {
    let envelope: ApiEnvelope<serde_json::Value> = resp.json().await?;
    Ok(envelope.into_ack()?)
}

/// Fetch the server config; `None` when no server has been configured yet
/// (the backend answers with an id-less record in that case).
#[tracing::instrument(skip(client))]
pub async fn fetch_server(client: &Client, host: &str) -> Result<Option<Server>, ApiError> {
    let url = endpoint(host, "/api/server");
    let resp = client.get(&url).send().await?;
    let server: Server = decode(resp).await?;
    if server.is_configured() {
        debug!(server_id = %server.id, listen_port = server.listen_port, "server configured");
        Ok(Some(server))
    } else {
        debug!("no server configured yet");
        Ok(None)
    }
}

#[tracing::instrument(skip(client, form), fields(name = %form.name))]
pub async fn create_server(
    client: &Client,
    host: &str,
    form: &ServerForm,
) -> Result<Server, ApiError> {
    let url = endpoint(host, "/api/server");
    let resp = client.post(&url).json(form).send().await?;
    decode(resp).await
}

#[tracing::instrument(skip(client, form))]
pub async fn update_server(
    client: &Client,
    host: &str,
    id: &str,
    form: &ServerForm,
) -> Result<Server, ApiError> {
    let url = endpoint(host, &format!("/api/server/{id}"));
    let resp = client.put(&url).json(form).send().await?;
    decode(resp).await
}

/// List clients, scoped to one server when `server_id` is given.
#[tracing::instrument(skip(client))]
pub async fn list_clients(
    client: &Client,
    host: &str,
    server_id: Option<&str>,
) -> Result<Vec<VpnClient>, ApiError> {
    let url = match server_id {
        Some(id) => endpoint(host, &format!("/api/clients?server_id={id}")),
        None => endpoint(host, "/api/clients"),
    };
    let resp = client.get(&url).send().await?;
    let clients: Vec<VpnClient> = decode(resp).await?;
    debug!(count = clients.len(), "fetched clients");
    Ok(clients)
}

#[tracing::instrument(skip(client, new_client), fields(name = %new_client.name))]
pub async fn create_client(
    client: &Client,
    host: &str,
    new_client: &NewClient,
) -> Result<VpnClient, ApiError> {
    let url = endpoint(host, "/api/clients");
    let resp = client.post(&url).json(new_client).send().await?;
    decode(resp).await
}

/// Enable or disable a client. Acknowledgement-only endpoint.
#[tracing::instrument(skip(client))]
pub async fn set_client_enabled(
    client: &Client,
    host: &str,
    id: Uuid,
    enabled: bool,
) -> Result<(), ApiError> {
    let action = if enabled { "enable" } else { "disable" };
    let url = endpoint(host, &format!("/api/clients/{id}/{action}"));
    let resp = client.put(&url).send().await?;
    decode_ack(resp).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_client(client: &Client, host: &str, id: Uuid) -> Result<(), ApiError> {
    let url = endpoint(host, &format!("/api/clients/{id}"));
    let resp = client.delete(&url).send().await?;
    decode_ack(resp).await
}

#[tracing::instrument(skip(client))]
pub async fn fetch_stats(client: &Client, host: &str) -> Result<Stats, ApiError> {
    let url = endpoint(host, "/api/stats");
    let resp = client.get(&url).send().await?;
    decode(resp).await
}
