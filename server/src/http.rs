use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderName, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use products_hr::{EmployeeStore, HrError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::{
    forms::{EmployeeForm, FormError, IndexQuery, SearchQuery},
    views::{self, FormMode, Notice},
};

#[derive(Clone)]
pub struct AppState {
    pub store: EmployeeStore,
    pub title: Arc<str>,
}

impl AppState {
    pub fn new(store: EmployeeStore, title: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            title: title.into(),
        }
    }
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, "employee server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(index_handler))
        .route("/search", get(search_handler))
        .route("/add", get(add_form_handler).post(add_handler))
        .route("/edit/{id}", get(edit_form_handler).post(edit_handler))
        .route("/delete/{id}", get(delete_form_handler).post(delete_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

fn status_for(err: &HrError) -> StatusCode {
    debug!(code = err.code(), error = %err, "employee request failed");
    match err {
        HrError::NotFound(_) => StatusCode::NOT_FOUND,
        HrError::DuplicateKey(_) => StatusCode::CONFLICT,
        HrError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn page(status: StatusCode, html: Html<String>) -> Response {
    (status, html).into_response()
}

/// Index page carrying only an error, used when the requested record could
/// not be loaded.
fn index_error(state: &AppState, err: &HrError) -> Response {
    let notice = Notice::Error(err.to_string());
    page(
        status_for(err),
        views::index(&state.title, &[], "", Some(&notice)),
    )
}

async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Response {
    let notice = match (query.deleted, query.missing) {
        (Some(id), _) => Some(Notice::Success(format!("Employee with ID {id} was deleted."))),
        (None, Some(id)) => Some(Notice::Error(format!(
            "No employee with ID {id}; nothing was deleted."
        ))),
        (None, None) => None,
    };
    match state.store.list_all().await {
        Ok(employees) => page(
            StatusCode::OK,
            views::index(&state.title, &employees, "", notice.as_ref()),
        ),
        Err(err) => index_error(&state, &err),
    }
}

async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match state.store.search(&query.name).await {
        Ok(employees) => page(
            StatusCode::OK,
            views::index(&state.title, &employees, &query.name, None),
        ),
        Err(err) => {
            let notice = Notice::Error(err.to_string());
            page(
                status_for(&err),
                views::index(&state.title, &[], &query.name, Some(&notice)),
            )
        }
    }
}

async fn add_form_handler(State(state): State<AppState>) -> Html<String> {
    views::employee_form(&state.title, FormMode::Add, &EmployeeForm::default(), None)
}

async fn add_handler(State(state): State<AppState>, Form(form): Form<EmployeeForm>) -> Response {
    let employee = match form.to_employee() {
        Ok(employee) => employee,
        Err(err) => return invalid_form(&state, FormMode::Add, &form, &err),
    };
    match state.store.insert(&employee).await {
        Ok(()) => {
            let notice = Notice::Success(format!("Successfully added employee {}", employee.name));
            page(
                StatusCode::OK,
                views::employee_form(
                    &state.title,
                    FormMode::Add,
                    &EmployeeForm::default(),
                    Some(&notice),
                ),
            )
        }
        Err(err) => {
            let notice = Notice::Error(format!("Error adding employee: {err}"));
            page(
                status_for(&err),
                views::employee_form(&state.title, FormMode::Add, &form, Some(&notice)),
            )
        }
    }
}

async fn edit_form_handler(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_by_id(id).await {
        Ok(employee) => page(
            StatusCode::OK,
            views::employee_form(
                &state.title,
                FormMode::Edit(id),
                &EmployeeForm::from_employee(&employee),
                None,
            ),
        ),
        Err(err) => index_error(&state, &err),
    }
}

async fn edit_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EmployeeForm>,
) -> Response {
    let mode = FormMode::Edit(id);
    let employee = match form.to_employee_with_id(id) {
        Ok(employee) => employee,
        Err(err) => return invalid_form(&state, mode, &form, &err),
    };
    let (status, notice) = match state.store.update(id, &employee).await {
        Ok(()) => (
            StatusCode::OK,
            Notice::Success(format!("Successfully updated employee {}", employee.name)),
        ),
        Err(err) => (
            status_for(&err),
            Notice::Error(format!("Error updating employee: {err}")),
        ),
    };
    page(
        status,
        views::employee_form(&state.title, mode, &form, Some(&notice)),
    )
}

async fn delete_form_handler(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_by_id(id).await {
        Ok(employee) => page(
            StatusCode::OK,
            views::delete_confirm(&state.title, &employee),
        ),
        Err(err) => index_error(&state, &err),
    }
}

async fn delete_handler(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.delete(id).await {
        Ok(true) => Redirect::to(&format!("/?deleted={id}")).into_response(),
        Ok(false) => {
            info!(id, "delete requested for unknown employee");
            Redirect::to(&format!("/?missing={id}")).into_response()
        }
        Err(err) => index_error(&state, &err),
    }
}

fn invalid_form(state: &AppState, mode: FormMode, form: &EmployeeForm, err: &FormError) -> Response {
    warn!(error = %err, "rejected employee form");
    let notice = Notice::Error(err.to_string());
    page(
        StatusCode::UNPROCESSABLE_ENTITY,
        views::employee_form(&state.title, mode, form, Some(&notice)),
    )
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = platform_db::ping(state.store.pool()).await.is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
