//! Correlation identifier for one HTTP request.
//!
//! The [`crate::Trace`] middleware runs every request inside
//! [`TraceId::scope`]. Domain errors read [`TraceId::current`] when they are
//! built, so an error body names the request that raised it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static ACTIVE: TraceId;
}

/// Identifier shared by the `trace-id` header, the request span, and error
/// bodies.
///
/// # Examples
/// ```
/// use backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "4a0c6f3e-0a57-4d2c-9a53-54bd3bfe9d55".parse().expect("uuid");
/// assert_eq!(id.scope(async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being handled, if any.
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Drive `fut` with this identifier active. Spawned tasks do not inherit it.
    pub fn scope<F: Future>(self, fut: F) -> impl Future<Output = F::Output> {
        ACTIVE.scope(self, fut)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn scope_exposes_the_identifier_to_the_future() {
        let id = TraceId::generate();
        assert_eq!(id.scope(async { TraceId::current() }).await, Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn inner_scope_shadows_outer_scope() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let seen = outer
            .scope(async move {
                let nested = inner.scope(async { TraceId::current() }).await;
                (nested, TraceId::current())
            })
            .await;

        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[rstest]
    fn generated_identifiers_differ() {
        assert_ne!(TraceId::generate(), TraceId::generate());
    }

    #[rstest]
    #[case("4a0c6f3e-0a57-4d2c-9a53-54bd3bfe9d55")]
    #[case("00000000-0000-0000-0000-000000000000")]
    fn display_matches_the_parsed_text(#[case] raw: &str) {
        let id: TraceId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn non_uuid_text_is_rejected() {
        assert!("request-1".parse::<TraceId>().is_err());
    }
}
