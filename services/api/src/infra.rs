use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_board::config::{parse_skill_list, AppConfig};
use talent_board::error::AppError;
use talent_board::listings::{
    parse_as_of, ApplicationStatus, InvitationStatus, JobType, ListingService, TimeWindow,
};
use talent_board::telemetry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configured listing service for one-shot CLI commands.
pub(crate) fn load_service(viewer_skills: Option<&str>) -> Result<ListingService, AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(raw) = viewer_skills {
        config.listings.viewer_skills = parse_skill_list(raw);
    }

    Ok(ListingService::from_config(&config.listings)?)
}

pub(crate) fn resolve_now(as_of: Option<DateTime<Utc>>) -> DateTime<Utc> {
    as_of.unwrap_or_else(Utc::now)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_as_of(raw)
}

pub(crate) fn parse_job_type(raw: &str) -> Result<JobType, String> {
    raw.parse::<JobType>().map_err(|err| err.to_string())
}

pub(crate) fn parse_time_window(raw: &str) -> Result<TimeWindow, String> {
    raw.parse::<TimeWindow>().map_err(|err| err.to_string())
}

pub(crate) fn parse_application_status(raw: &str) -> Result<ApplicationStatus, String> {
    raw.parse::<ApplicationStatus>()
        .map_err(|err| err.to_string())
}

pub(crate) fn parse_invitation_status(raw: &str) -> Result<InvitationStatus, String> {
    raw.parse::<InvitationStatus>()
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_parsers_report_unknown_labels() {
        assert_eq!(parse_job_type("2-3 years"), Ok(JobType::TwoToThreeYears));
        assert_eq!(parse_time_window("LAST7DAYS"), Ok(TimeWindow::Last7Days));
        assert_eq!(
            parse_application_status("offer"),
            Ok(ApplicationStatus::Offer)
        );
        assert!(parse_invitation_status("maybe")
            .expect_err("unknown status")
            .contains("maybe"));
        assert!(parse_timestamp("yesterday").is_err());
    }
}
