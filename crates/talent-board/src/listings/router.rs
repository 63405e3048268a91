use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::criteria::{ApplicationCriteria, InvitationCriteria, JobCriteria, TimeWindow};
use super::domain::{
    ApplicationStatus, InvitationId, InvitationStatus, JobId, JobType, UnknownVariant,
};
use super::intake::ApplicationForm;
use super::service::{parse_as_of, ListingService, ListingServiceError};
use crate::error::AppError;

/// Router builder exposing the listing and apply endpoints.
pub fn listing_router(service: Arc<ListingService>) -> Router {
    Router::new()
        .route("/api/v1/jobs", get(search_jobs_handler))
        .route("/api/v1/jobs/:job_id", get(job_handler))
        .route("/api/v1/jobs/:job_id/applications", post(apply_handler))
        .route("/api/v1/applications", get(applications_handler))
        .route(
            "/api/v1/applications/summary",
            get(application_summary_handler),
        )
        .route("/api/v1/invitations", get(invitations_handler))
        .route(
            "/api/v1/invitations/:invitation_id/accept",
            post(accept_invitation_handler),
        )
        .route(
            "/api/v1/invitations/:invitation_id/decline",
            post(decline_invitation_handler),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JobSearchParams {
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Comma separated skill names.
    #[serde(default)]
    pub(crate) skills: Option<String>,
    /// Comma separated job type labels.
    #[serde(default)]
    pub(crate) types: Option<String>,
    #[serde(default)]
    pub(crate) window: Option<String>,
    #[serde(default)]
    pub(crate) page: Option<usize>,
    #[serde(default)]
    pub(crate) as_of: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplicationParams {
    #[serde(default)]
    pub(crate) query: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) page: Option<usize>,
    #[serde(default)]
    pub(crate) as_of: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InvitationParams {
    #[serde(default)]
    pub(crate) query: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<String>,
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// `None` and `all` both mean "no status constraint".
fn parse_status<S>(raw: Option<&str>) -> Result<Option<S>, ListingServiceError>
where
    S: std::str::FromStr,
    S::Err: std::fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value
            .parse::<S>()
            .map(Some)
            .map_err(|err| ListingServiceError::InvalidQuery(err.to_string())),
    }
}

fn resolve_now(as_of: Option<&str>) -> Result<DateTime<Utc>, ListingServiceError> {
    as_of
        .map_or_else(|| Ok(Utc::now()), parse_as_of)
        .map_err(ListingServiceError::InvalidQuery)
}

impl JobSearchParams {
    pub(crate) fn criteria(&self) -> Result<JobCriteria, ListingServiceError> {
        let invalid = |err: UnknownVariant| ListingServiceError::InvalidQuery(err.to_string());
        let job_types = split_list(self.types.as_deref())
            .map(|label| label.parse::<JobType>().map_err(invalid))
            .collect::<Result<Vec<_>, _>>()?;
        let time_window = match self.window.as_deref() {
            Some(raw) => raw.parse::<TimeWindow>().map_err(invalid)?,
            None => TimeWindow::All,
        };

        Ok(JobCriteria::default()
            .with_query(self.query.clone().unwrap_or_default())
            .with_skills(split_list(self.skills.as_deref()))
            .with_job_types(job_types)
            .with_time_window(time_window))
    }
}

pub(crate) async fn search_jobs_handler(
    State(service): State<Arc<ListingService>>,
    Query(params): Query<JobSearchParams>,
) -> Result<Response, AppError> {
    let criteria = params.criteria()?;
    let now = resolve_now(params.as_of.as_deref())?;

    let page = service.search_jobs(&criteria, params.page.unwrap_or(1), now);
    Ok((StatusCode::OK, Json(page)).into_response())
}

pub(crate) async fn job_handler(
    State(service): State<Arc<ListingService>>,
    Path(job_id): Path<String>,
) -> Result<Response, AppError> {
    let job = service.job(&JobId(job_id))?;
    Ok((StatusCode::OK, Json(job)).into_response())
}

pub(crate) async fn apply_handler(
    State(service): State<Arc<ListingService>>,
    Path(job_id): Path<String>,
    Json(form): Json<ApplicationForm>,
) -> Result<Response, AppError> {
    let receipt = service.apply(&JobId(job_id), &form)?;
    Ok((StatusCode::ACCEPTED, Json(receipt)).into_response())
}

pub(crate) async fn applications_handler(
    State(service): State<Arc<ListingService>>,
    Query(params): Query<ApplicationParams>,
) -> Result<Response, AppError> {
    let status = parse_status::<ApplicationStatus>(params.status.as_deref())?;
    let now = resolve_now(params.as_of.as_deref())?;
    let criteria = ApplicationCriteria::default()
        .with_query(params.query.unwrap_or_default())
        .with_status(status);

    let page = service.applications(&criteria, params.page.unwrap_or(1), now);
    Ok((StatusCode::OK, Json(page)).into_response())
}

pub(crate) async fn application_summary_handler(
    State(service): State<Arc<ListingService>>,
) -> Response {
    (StatusCode::OK, Json(service.application_summary())).into_response()
}

pub(crate) async fn invitations_handler(
    State(service): State<Arc<ListingService>>,
    Query(params): Query<InvitationParams>,
) -> Result<Response, AppError> {
    let status = parse_status::<InvitationStatus>(params.status.as_deref())?;
    let criteria = InvitationCriteria::default()
        .with_query(params.query.unwrap_or_default())
        .with_status(status);

    Ok((StatusCode::OK, Json(service.invitations(&criteria))).into_response())
}

pub(crate) async fn accept_invitation_handler(
    State(service): State<Arc<ListingService>>,
    Path(invitation_id): Path<String>,
) -> Result<Response, AppError> {
    let response =
        service.respond_to_invitation(&InvitationId(invitation_id), InvitationStatus::Accepted)?;
    Ok((StatusCode::OK, Json(response)).into_response())
}

pub(crate) async fn decline_invitation_handler(
    State(service): State<Arc<ListingService>>,
    Path(invitation_id): Path<String>,
) -> Result<Response, AppError> {
    let response =
        service.respond_to_invitation(&InvitationId(invitation_id), InvitationStatus::Declined)?;
    Ok((StatusCode::OK, Json(response)).into_response())
}
