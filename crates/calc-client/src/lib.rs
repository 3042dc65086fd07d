//! calc-client — polling client for the distributed calculator orchestrator.
//!
//! `CalcClient` runs the five independent flows (submit, lookup, list,
//! worker simulation, statistics) over a `Transport` and hands every outcome
//! to a `View`. Flows share no state except the optional in-flight guards.

pub mod chart;
pub mod error;
pub mod flows;
pub mod http;
pub mod numeric;
pub mod poller;
pub mod transport;
pub mod view;


pub use chart::{BarChart, ChartBackend, ChartSurface, SharedSurface};
pub use error::ClientError;
pub use flows::CalcClient;
pub use poller::{InFlightGuard, PeriodicTask};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
pub use view::{ListPanel, LookupPanel, Notice, View};
