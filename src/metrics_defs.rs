//! Common types for metrics definitions.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

pub const UPSTREAM_REQUESTS: MetricDef = MetricDef {
    name: "airtable.requests",
    metric_type: MetricType::Counter,
    description: "Requests sent to the Airtable API. Tagged with method.",
};

pub const UPSTREAM_FAILURES: MetricDef = MetricDef {
    name: "airtable.failures",
    metric_type: MetricType::Counter,
    description: "Airtable requests that ended in a non-2xx status or transport error",
};

pub const UPSTREAM_DURATION: MetricDef = MetricDef {
    name: "airtable.request.duration",
    metric_type: MetricType::Histogram,
    description: "Airtable request duration in seconds",
};

pub const ALL_METRICS: &[MetricDef] = &[UPSTREAM_REQUESTS, UPSTREAM_FAILURES, UPSTREAM_DURATION];
