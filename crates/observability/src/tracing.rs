//! Span helpers shared by the runtime and the dispatcher

/// Span for one user turn through the orchestrator.
///
/// ```rust
/// use nest_observability::turn_span;
///
/// let span = turn_span!("session-1", "proj_1");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! turn_span {
    ($session_id:expr, $project_uid:expr) => {
        tracing::info_span!(
            "orchestrator.turn",
            session.id = $session_id,
            project.uid = $project_uid,
            actions = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            llm.duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Span for a single action dispatch.
///
/// ```rust
/// use nest_observability::action_span;
///
/// let span = action_span!("create_list", "call_1");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! action_span {
    ($action:expr, $call_id:expr) => {
        tracing::info_span!(
            "action.dispatch",
            action = $action,
            call_id = $call_id,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Mark the current span as failed and log the error.
///
/// The span must declare `error` and `error.message` fields, as the macros
/// in this module do.
pub fn record_error<E: std::fmt::Display + ?Sized>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record a duration in milliseconds on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
