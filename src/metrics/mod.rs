use prometheus::{IntCounterVec, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Counts customer operations and their failures, labeled by operation and
// failure reason. Scraped via GET /metrics on the main server.
//
// ============================================================================

/// Central metrics registry for the service
pub struct Metrics {
    registry: Registry,

    pub customer_operations: IntCounterVec,
    pub customer_operation_failures: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let customer_operations = IntCounterVec::new(
            Opts::new(
                "customer_operations_total",
                "Total customer operations handled",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(customer_operations.clone()))?;

        let customer_operation_failures = IntCounterVec::new(
            Opts::new(
                "customer_operation_failures_total",
                "Customer operations that ended in a domain or storage error",
            ),
            &["operation", "reason"],
        )?;
        registry.register(Box::new(customer_operation_failures.clone()))?;

        Ok(Self {
            registry,
            customer_operations,
            customer_operation_failures,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
