//! Span definitions per ledger operation.

/// Span for one recognition event.
#[macro_export]
macro_rules! recognition_span {
    ($plate:expr, $time:expr) => {
        ::tracing::info_span!("parkwatch.recognition", plate = %$plate, time = %$time)
    };
}

/// Span for a query against the ledger.
#[macro_export]
macro_rules! query_span {
    ($query:expr) => {
        ::tracing::debug_span!("parkwatch.query", query = $query)
    };
}

/// Span for a store flush.
#[macro_export]
macro_rules! flush_span {
    ($location:expr) => {
        ::tracing::debug_span!("parkwatch.flush", location = %$location)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RECOGNITION: &str = "parkwatch.recognition";
    pub const QUERY: &str = "parkwatch.query";
    pub const FLUSH: &str = "parkwatch.flush";
}
