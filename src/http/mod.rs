use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use prometheus::{Encoder, TextEncoder};

use crate::domain::customer::{
    CustomerError, CustomerRegistration, CustomerService, CustomerUpdateRequest,
};
use crate::metrics::Metrics;

// ============================================================================
// HTTP Surface
// ============================================================================
//
// Thin translation layer: requests → service calls, domain errors → status
// codes. All domain decisions stay in the service.
//
//   GET    /api/v1/customers        → get_all
//   GET    /api/v1/customers/{id}   → get
//   POST   /api/v1/customers        → register
//   PUT    /api/v1/customers/{id}   → update
//   DELETE /api/v1/customers/{id}   → delete
//   GET    /health, GET /metrics
//
// ============================================================================

impl ResponseError for CustomerError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::DuplicateEmail(_) => StatusCode::CONFLICT,
            CustomerError::NoChanges => StatusCode::BAD_REQUEST,
            CustomerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

fn failure_reason(error: &CustomerError) -> &'static str {
    match error {
        CustomerError::NotFound(_) => "not_found",
        CustomerError::DuplicateEmail(_) => "duplicate_email",
        CustomerError::NoChanges => "no_changes",
        CustomerError::Storage(_) => "storage",
    }
}

fn track<T>(
    metrics: &Metrics,
    operation: &str,
    result: Result<T, CustomerError>,
) -> Result<T, CustomerError> {
    metrics
        .customer_operations
        .with_label_values(&[operation])
        .inc();
    if let Err(ref error) = result {
        metrics
            .customer_operation_failures
            .with_label_values(&[operation, failure_reason(error)])
            .inc();
    }
    result
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/customers")
            .route("", web::get().to(get_customers))
            .route("", web::post().to(register_customer))
            .route("/{customer_id}", web::get().to(get_customer))
            .route("/{customer_id}", web::put().to(update_customer))
            .route("/{customer_id}", web::delete().to(delete_customer)),
    )
    .route("/health", web::get().to(health_handler))
    .route("/metrics", web::get().to(metrics_handler));
}

async fn get_customers(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, CustomerError> {
    let customers = track(&metrics, "get_all", service.get_all().await)?;
    Ok(HttpResponse::Ok().json(customers))
}

async fn get_customer(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
    path: web::Path<i64>,
) -> Result<HttpResponse, CustomerError> {
    let customer = track(&metrics, "get", service.get(path.into_inner()).await)?;
    Ok(HttpResponse::Ok().json(customer))
}

async fn register_customer(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
    request: web::Json<CustomerRegistration>,
) -> Result<HttpResponse, CustomerError> {
    let customer = track(
        &metrics,
        "register",
        service.register(request.into_inner()).await,
    )?;
    Ok(HttpResponse::Ok().json(customer))
}

async fn update_customer(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
    path: web::Path<i64>,
    request: web::Json<CustomerUpdateRequest>,
) -> Result<HttpResponse, CustomerError> {
    let customer = track(
        &metrics,
        "update",
        service.update(path.into_inner(), request.into_inner()).await,
    )?;
    Ok(HttpResponse::Ok().json(customer))
}

async fn delete_customer(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
    path: web::Path<i64>,
) -> Result<HttpResponse, CustomerError> {
    track(&metrics, "delete", service.delete(path.into_inner()).await)?;
    Ok(HttpResponse::Ok().finish())
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "customer-service"
    }))
}

async fn metrics_handler(metrics: web::Data<Metrics>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry().gather();

    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

// ============================================================================
// Unit Tests
// ============================================================================
