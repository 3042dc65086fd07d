//! CLI command modules.

pub mod chart;
pub mod expressions;
pub mod stats;
pub mod task;
pub mod view;

use std::process::ExitCode;

use calc_client::{CalcClient, HttpTransport};

/// The client every command runs against.
pub type Client = CalcClient<HttpTransport, view::TerminalView>;

/// How a command ended. A failure has already been shown to the user or
/// logged by the flow, so it carries no message of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn from_success(ok: bool) -> Self {
        if ok { Outcome::Success } else { Outcome::Failure }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

/// A client pointed at a closed local port.
#[cfg(test)]
pub fn unreachable_client() -> Client {
    let mut config = calc_core::CalcConfig::default();
    config.server.base_url = "http://127.0.0.1:9".to_string();
    config.server.request_timeout_secs = 2;
    let transport = HttpTransport::new(&config.server).expect("transport");
    CalcClient::new(transport, view::TerminalView, config)
}
