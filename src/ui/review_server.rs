use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::sync::oneshot;
use warp::hyper::body::Bytes;
use warp::http::StatusCode;
use warp::Filter;
use crate::config::constants::{
    DEFAULT_SERVER_PORT_RANGE_END, DEFAULT_SERVER_PORT_RANGE_START,
    SERVER_SHUTDOWN_GRACE_PERIOD_MS, sleep_duration_millis,
};
use crate::errors::{SnippetReviewError, SnippetReviewResult};
use crate::services::code_reviewer::CodeReviewer;
use crate::services::error_classifier::ErrorClassifier;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::api_response::ApiResponse;
use crate::ui::review_session::{SessionError, SharedReviewSession, SubmitError};

const MAX_BODY_BYTES: u64 = 512 * 1024;

/// Local web page for submitting a snippet and viewing the report.
pub struct ReviewServer {
    reviewer: CodeReviewer,
    session: SharedReviewSession,
    port: Option<u16>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ReviewServer {
    pub fn new(reviewer: CodeReviewer) -> Self {
        Self {
            reviewer,
            session: SharedReviewSession::new(),
            port: None,
            shutdown_tx: None,
        }
    }

    pub fn session(&self) -> &SharedReviewSession {
        &self.session
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// `preferred_port == 0` picks the first free port in the default range.
    pub async fn start(&mut self, preferred_port: u16) -> SnippetReviewResult<u16> {
        let port = if preferred_port == 0 {
            Self::find_available_port().await?
        } else {
            preferred_port
        };

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = routes(self.reviewer.clone(), self.session.clone());

        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let (bound, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(addr, async {
                shutdown_rx.await.ok();
            })
            .map_err(|e| SnippetReviewError::server_error("bind", &e.to_string()))?;

        tokio::spawn(server);

        self.port = Some(bound.port());
        self.shutdown_tx = Some(shutdown_tx);

        log::info!("🌐 Review page started on http://{}", bound);
        Ok(bound.port())
    }

    pub async fn shutdown(&mut self) -> SnippetReviewResult<()> {
        log::info!("🛑 Shutting down review server...");

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx.send(()).map_err(|_|
                SnippetReviewError::server_error("shutdown", "Failed to send shutdown signal")
            )?;
        }

        tokio::time::sleep(sleep_duration_millis(SERVER_SHUTDOWN_GRACE_PERIOD_MS)).await;
        log::info!("✅ Review server shutdown complete");

        Ok(())
    }

    async fn find_available_port() -> SnippetReviewResult<u16> {
        for port in DEFAULT_SERVER_PORT_RANGE_START..DEFAULT_SERVER_PORT_RANGE_END {
            if let Ok(listener) = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await {
                drop(listener);
                return Ok(port);
            }
        }
        Err(SnippetReviewError::server_error(
            "find port",
            &format!("no free port between {} and {}", DEFAULT_SERVER_PORT_RANGE_START, DEFAULT_SERVER_PORT_RANGE_END),
        ))
    }
}

/// Every route of the review page.
pub fn routes(
    reviewer: CodeReviewer,
    session: SharedReviewSession,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let reviewer_filter = warp::any().map(move || reviewer.clone());
    let session_filter = warp::any().map(move || session.clone());

    let index = warp::path::end()
        .and(warp::get())
        .and_then(serve_index);

    let analyze = warp::path!("api" / "analyze")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(reviewer_filter)
        .and(session_filter.clone())
        .and_then(analyze_handler);

    let state = warp::path!("api" / "state")
        .and(warp::get())
        .and(session_filter)
        .and_then(state_handler);

    index
        .or(analyze)
        .or(state)
        .with(warp::cors()
            .allow_origin("http://127.0.0.1")
            .allow_origin("http://localhost")
            .allow_headers(vec!["content-type"])
            .allow_methods(vec!["GET", "POST"]))
}

async fn serve_index() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::html(include_str!("static/index.html")))
}

async fn analyze_handler(
    body: Bytes,
    reviewer: CodeReviewer,
    session: SharedReviewSession,
) -> Result<impl warp::Reply, Infallible> {
    let request: AnalysisRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let reply = ApiResponse::<()>::failure(&format!("Invalid request: {}", e), None, None);
            return Ok(warp::reply::with_status(warp::reply::json(&reply), StatusCode::BAD_REQUEST));
        }
    };

    match session.submit(&reviewer, &request).await {
        Ok(result) => Ok(warp::reply::with_status(
            warp::reply::json(&ApiResponse::ok(result)),
            StatusCode::OK,
        )),
        Err(SubmitError::Session(SessionError::AlreadyInFlight)) => {
            let reply = ApiResponse::<()>::failure("An analysis is already in flight", None, None);
            Ok(warp::reply::with_status(warp::reply::json(&reply), StatusCode::CONFLICT))
        }
        Err(SubmitError::Session(e)) => {
            log::error!("❌ Review session error: {}", e);
            let reply = ApiResponse::<()>::failure(&e.to_string(), None, None);
            Ok(warp::reply::with_status(warp::reply::json(&reply), StatusCode::INTERNAL_SERVER_ERROR))
        }
        Err(SubmitError::Analysis(error)) => {
            let kind = ErrorClassifier::classify(&error);
            log::warn!("⚠️ Analysis failed [{}]: {}", kind.name(), error);

            let reply = ApiResponse::<()>::failure(
                ErrorClassifier::user_notice(kind),
                Some(kind),
                error.field().map(str::to_string),
            );
            let status = StatusCode::from_u16(ErrorClassifier::http_status(kind))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Ok(warp::reply::with_status(warp::reply::json(&reply), status))
        }
    }
}

async fn state_handler(session: SharedReviewSession) -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&session.snapshot()))
}
