use crate::config::ClientConfig;
use crate::core::render::{render_arrivals, render_results, render_table_results, OutputFormat};
use crate::domain::model::{
    ArrivalRecord, ArrivalSummary, FlightCountEntry, LookupRequest, LookupResponse,
};
use crate::utils::error::{ErrorSeverity, Result, SearchError};
use regex::Regex;
use reqwest::Client;
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

pub const INVALID_CODE_MESSAGE: &str = "Please enter a valid 3-letter airport code (e.g., LAX).";
pub const LOADING_MESSAGE: &str = "Loading results, please wait...";
pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred.";
pub const NO_ARRIVALS_MESSAGE: &str = "No arrivals found for this airport code.";
pub const SUCCESS_MESSAGE: &str = "Arrivals summary loaded successfully.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again later.";

fn airport_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{3}$").expect("airport code pattern is valid"))
}

/// Three ASCII letters, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportCode(String);

impl AirportCode {
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim().to_uppercase();
        if airport_code_pattern().is_match(&code) {
            Ok(Self(code))
        } else {
            Err(SearchError::ValidationError {
                message: INVALID_CODE_MESSAGE.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// `None` unless the message reports a failure. A rejected airport code is an input
    /// problem; everything else that fails is a network or server problem.
    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self.kind {
            MessageKind::Error if self.text == INVALID_CODE_MESSAGE => Some(ErrorSeverity::High),
            MessageKind::Error => Some(ErrorSeverity::Medium),
            MessageKind::Info | MessageKind::Success => None,
        }
    }
}

/// Single-page arrivals lookup: validate the code, POST it, show a summary table.
///
/// Failures never escape `submit`; they end up in the status message.
pub struct LookupPage {
    client: Client,
    search_url: String,
    timeout: Option<Duration>,
    message: StatusMessage,
    history: Vec<StatusMessage>,
    rows: Vec<ArrivalSummary>,
    arrivals: Vec<ArrivalRecord>,
    results_hidden: bool,
}

impl LookupPage {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            search_url: config.url_for(&config.lookup_endpoint),
            timeout: config.timeout,
            message: StatusMessage::new("", MessageKind::Info),
            history: Vec::new(),
            rows: Vec::new(),
            arrivals: Vec::new(),
            results_hidden: true,
        }
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    pub fn message(&self) -> &StatusMessage {
        &self.message
    }

    /// Every message shown since the page was created, oldest first.
    pub fn history(&self) -> &[StatusMessage] {
        &self.history
    }

    pub fn rows(&self) -> &[ArrivalSummary] {
        &self.rows
    }

    pub fn arrivals(&self) -> &[ArrivalRecord] {
        &self.arrivals
    }

    pub fn results_hidden(&self) -> bool {
        self.results_hidden
    }

    pub async fn submit(&mut self, input: &str) -> &StatusMessage {
        self.rows.clear();
        self.arrivals.clear();
        self.results_hidden = true;
        self.message = StatusMessage::new("", MessageKind::Info);

        let code = match AirportCode::parse(input) {
            Ok(code) => code,
            Err(_) => {
                tracing::warn!("Rejected airport code input: {:?}", input);
                self.set_message(INVALID_CODE_MESSAGE, MessageKind::Error);
                return &self.message;
            }
        };

        self.set_message(LOADING_MESSAGE, MessageKind::Info);

        let (ok, response) = match self.fetch(&code).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Lookup for {} failed: {}", code, e);
                self.set_message(NETWORK_ERROR_MESSAGE, MessageKind::Error);
                return &self.message;
            }
        };

        if !ok {
            let text = response
                .error
                .filter(|error| !error.is_empty())
                .unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string());
            self.set_message(text, MessageKind::Error);
            return &self.message;
        }

        let Some(summary) = response.summary else {
            tracing::error!("Lookup for {} returned no summary", code);
            self.set_message(NETWORK_ERROR_MESSAGE, MessageKind::Error);
            return &self.message;
        };

        if summary.is_empty() {
            self.set_message(NO_ARRIVALS_MESSAGE, MessageKind::Info);
            return &self.message;
        }

        tracing::info!("✈️ {}: {} countries, {} arrivals", code, summary.len(), response.arrivals.len());
        self.rows = summary;
        self.arrivals = response.arrivals;
        self.results_hidden = false;
        self.set_message(SUCCESS_MESSAGE, MessageKind::Success);
        &self.message
    }

    async fn fetch(&self, code: &AirportCode) -> Result<(bool, LookupResponse)> {
        let mut request = self.client.post(&self.search_url).json(&LookupRequest {
            airport_code: code.to_string(),
        });
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("📡 POST {} ({})", self.search_url, code);
        let response = request.send().await?;
        let ok = response.status().is_success();
        let body = response.json::<LookupResponse>().await?;

        Ok((ok, body))
    }

    fn set_message(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.message = StatusMessage::new(text, kind);
        self.history.push(self.message.clone());
    }

    /// The page as text.
    ///
    /// `Table` gives the status line, then the summary when visible, then the per-flight
    /// listing if asked for. The other formats carry only the summary data, empty while the
    /// results are hidden, so the output stays machine-readable; callers report
    /// [`message`](Self::message) separately.
    pub fn render(&self, format: OutputFormat, show_arrivals: bool) -> Result<String> {
        let entries: Vec<FlightCountEntry> =
            self.rows.iter().cloned().map(FlightCountEntry::from).collect();

        if format != OutputFormat::Table {
            if self.results_hidden {
                return Ok(String::new());
            }
            return render_results(&entries, format);
        }

        let mut sections = vec![self.message.text.clone()];
        if !self.results_hidden {
            sections.push(render_table_results(&entries));

            if show_arrivals && !self.arrivals.is_empty() {
                sections.push(render_arrivals(&self.arrivals));
            }
        }

        Ok(sections.join("\n"))
    }
}
