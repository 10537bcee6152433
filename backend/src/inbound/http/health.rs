//! Readiness and liveness endpoints for orchestrators and load balancers.
//!
//! The process walks through a single ordered lifecycle:
//!
//! ```text
//! Starting --mark_serving--> Serving --mark_draining--> Draining
//! ```
//!
//! Readiness only passes while `Serving`; liveness passes until `Draining`.
//! Both endpoints answer with an empty body and `Cache-Control: no-store`.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::debug;

/// Lifecycle phase reported by the health endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The listener is not bound yet.
    Starting,
    /// Requests are being accepted.
    Serving,
    /// A shutdown signal arrived and in-flight requests are finishing.
    Draining,
}

impl Phase {
    const fn to_raw(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Serving => 1,
            Self::Draining => 2,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }

    /// Whether a load balancer should route new requests here.
    pub const fn accepts_traffic(self) -> bool {
        matches!(self, Self::Serving)
    }

    /// Whether the process should be left running.
    pub const fn is_alive(self) -> bool {
        !matches!(self, Self::Draining)
    }
}

/// Shared lifecycle phase read by both health endpoints.
///
/// Transitions only move forward, so a late `mark_serving` cannot revive a
/// draining server.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Starting.to_raw()),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        Phase::from_raw(self.phase.load(Ordering::Acquire))
    }

    /// Enter `Serving` once the listener is bound.
    pub fn mark_serving(&self) {
        let moved = self.phase.compare_exchange(
            Phase::Starting.to_raw(),
            Phase::Serving.to_raw(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        if let Err(current) = moved {
            debug!(phase = ?Phase::from_raw(current), "serving transition skipped");
        }
    }

    /// Enter `Draining`; both endpoints fail from now on.
    pub fn mark_draining(&self) {
        self.phase.store(Phase::Draining.to_raw(), Ordering::Release);
    }
}

fn phase_response(healthy: bool) -> HttpResponse {
    let mut response = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness: 200 while serving, 503 while starting or draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is accepting traffic"),
        (status = 503, description = "Server is starting or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    phase_response(state.phase().accepts_traffic())
}

/// Liveness: 200 until draining starts.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    phase_response(state.phase().is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    fn state_in(phase: Phase) -> HealthState {
        let state = HealthState::new();
        match phase {
            Phase::Starting => {}
            Phase::Serving => state.mark_serving(),
            Phase::Draining => {
                state.mark_serving();
                state.mark_draining();
            }
        }
        state
    }

    async fn status_of(state: HealthState, uri: &str) -> (StatusCode, Option<String>) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(ready)
                .service(live),
        )
        .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (res.status(), cache)
    }

    #[rstest]
    #[case(Phase::Starting, "/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Phase::Starting, "/health/live", StatusCode::OK)]
    #[case(Phase::Serving, "/health/ready", StatusCode::OK)]
    #[case(Phase::Serving, "/health/live", StatusCode::OK)]
    #[case(Phase::Draining, "/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Phase::Draining, "/health/live", StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn endpoints_follow_the_phase(
        #[case] phase: Phase,
        #[case] uri: &str,
        #[case] expected: StatusCode,
    ) {
        let (status, cache) = status_of(state_in(phase), uri).await;

        assert_eq!(status, expected);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }

    #[rstest]
    fn draining_cannot_be_undone() {
        let state = state_in(Phase::Draining);

        state.mark_serving();

        assert_eq!(state.phase(), Phase::Draining);
    }

    #[rstest]
    fn draining_is_reachable_before_serving() {
        let state = HealthState::new();

        state.mark_draining();

        assert_eq!(state.phase(), Phase::Draining);
        assert!(!state.phase().accepts_traffic());
    }
}
