//! HTTP server exposing the records as JSON
//!
//! `wartoll serve` → starts server; a chart page fetches records and
//! selections from it.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /api/records` | every record, flat |
//! | `GET /api/summary` | dataset summary |
//! | `GET /api/selection?focus=&count=&mode=&city_unit=` | selection document |

use crate::narrative::equivalence::{self, City};
use crate::narrative::{select, Category, NarrativeMode};
use crate::record::Dataset;
use crate::report::{SelectionReport, Summary};
use serde::{Deserialize, Serialize};
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{info, warn};

/// Bounds the presentation layer applies to the country count.
pub const MIN_COUNT: usize = 5;
/// Bounds for the city size used in equivalence labels.
pub const MIN_CITY_UNIT: u64 = 100_000;
pub const MAX_CITY_UNIT: u64 = 2_000_000;

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(error: String) -> Self {
        Self { ok: false, data: None, error: Some(error) }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SelectionParams {
    #[serde(default)]
    pub focus: Category,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub mode: NarrativeMode,
    #[serde(default = "default_city_unit")]
    pub city_unit: u64,
}

fn default_count() -> usize { 20 }
fn default_city_unit() -> u64 { 500_000 }

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            focus: Category::default(),
            count: default_count(),
            mode: NarrativeMode::default(),
            city_unit: default_city_unit(),
        }
    }
}

impl SelectionParams {
    /// Clamp user input into the ranges the chart supports.
    pub fn clamped(mut self, available: usize) -> Self {
        self.count = clamp_count(self.count, available);
        self.city_unit = self.city_unit.clamp(MIN_CITY_UNIT, MAX_CITY_UNIT);
        self
    }
}

/// Clamp a requested country count to `[MIN_COUNT, available]`.
pub fn clamp_count(count: usize, available: usize) -> usize {
    count.max(MIN_COUNT).min(available)
}

#[derive(Serialize)]
struct SelectionResponse<'a> {
    #[serde(flatten)]
    report: SelectionReport<'a>,
    city_unit: u64,
    base_city: &'static City,
}

/// Start server and answer requests until the process is stopped
pub fn start(port: u16, dataset: &Dataset) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(url = %format!("http://localhost:{}", port), records = dataset.len(), "serving");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, dataset) {
            warn!(error = %e, "request failed");
        }
    }

    Ok(())
}

fn handle_request(request: Request, dataset: &Dataset) -> std::io::Result<()> {
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
    let method = request.method().clone();

    info!(method = %method, url = %url, "request");

    match (&method, path) {
        (&Method::Get, "/api/records") => {
            respond_json(request, 200, &ApiResponse::success(&dataset.records))
        }

        (&Method::Get, "/api/summary") => {
            respond_json(request, 200, &ApiResponse::success(Summary::from_dataset(dataset)))
        }

        (&Method::Get, "/api/selection") => match parse_params(query) {
            Ok(params) => {
                let params = params.clamped(dataset.len());
                let selection = select(&dataset.records, params.focus, params.count, params.mode);
                let body = SelectionResponse {
                    report: SelectionReport::new(&selection),
                    city_unit: params.city_unit,
                    base_city: equivalence::base_city(params.city_unit),
                };
                respond_json(request, 200, &ApiResponse::success(body))
            }
            Err(e) => {
                warn!(error = %e, "bad selection query");
                respond_json(request, 400, &ApiResponse::failure(e))
            }
        },

        // 404
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn respond_json<T: Serialize>(request: Request, status: u16, body: &T) -> std::io::Result<()> {
    let json = serde_json::to_string(body)?;
    let mut response = Response::from_string(json).with_status_code(status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response.add_header(header);
    }
    request.respond(response)
}

/// Parse a selection query string. An empty query gives the defaults.
pub fn parse_params(query: &str) -> Result<SelectionParams, String> {
    serde_urlencoded::from_str::<SelectionParams>(query).map_err(|e| e.to_string())
}
