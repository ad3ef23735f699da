use std::io::{self, BufRead, Write};

use wgpanel_types::{ServerForm, Stats};

use crate::view::{DashboardView, Notification, ServerInfo, Severity, TableRow, ViewContext};

/// Terminal host: renders the dashboard to stdout and asks for
/// confirmations on stdin.
pub struct TermView;

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

impl DashboardView for TermView {
    fn context(&self) -> ViewContext {
        ViewContext::Dashboard
    }

    fn fill_server_form(&mut self, form: &ServerForm) {
        println!(
            "server form: name={} port={} network={} dns={} endpoint={} allowed_ips={}",
            dash_if_empty(&form.name),
            form.listen_port,
            form.network,
            form.dns,
            dash_if_empty(&form.endpoint),
            form.allowed_ips,
        );
    }

    fn clear_client_form(&mut self) {}

    fn show_server_info(&mut self, info: &ServerInfo) {
        println!(
            "server {}: port {}, network {}, endpoint {}",
            info.id,
            info.listen_port,
            dash_if_empty(&info.network),
            dash_if_empty(&info.endpoint),
        );
    }

    fn hide_server_info(&mut self) {}

    fn render_client_table(&mut self, rows: &[TableRow]) {
        println!(
            "{:<24} {:<28} {:<20} {:<20} {}",
            "NAME", "EMAIL", "ALLOWED IPS", "STATUS", "DOWNLOADED"
        );
        for row in rows {
            match row {
                TableRow::Empty => println!("no clients found"),
                TableRow::Client(client) => println!(
                    "{:<24} {:<28} {:<20} {:<20} {}",
                    client.name,
                    client.email.as_deref().unwrap_or("-"),
                    client.allowed_ips,
                    client.status.label(),
                    if client.downloaded { "yes" } else { "no" },
                ),
            }
        }
    }

    fn show_stats(&mut self, stats: &Stats) {
        println!(
            "clients: {} total, {} active, {} disabled, {} downloaded",
            stats.total_clients,
            stats.active_clients,
            stats.disabled_clients,
            stats.downloaded_count,
        );
    }

    fn push_notification(&mut self, note: Notification) {
        let tag = match note.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Warning => "warn",
            Severity::Danger => "error",
        };
        eprintln!("[{tag}] {}", note.message);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }

    fn open_external(&mut self, url: &str) {
        println!("client config: {url}");
    }
}
