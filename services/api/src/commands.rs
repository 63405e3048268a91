use crate::infra::{
    load_service, parse_application_status, parse_invitation_status, parse_job_type,
    parse_time_window, parse_timestamp, resolve_now,
};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use talent_board::error::AppError;
use talent_board::listings::{
    ApplicationCard, ApplicationCriteria, ApplicationForm, ApplicationStatus, InvitationCriteria,
    InvitationId, InvitationResponse, InvitationStatus, JobCard, JobCriteria, JobId, JobType,
    ListingServiceError, Page, TimeWindow, UploadDescriptor, UploadPolicy,
};
use tracing::debug;

#[derive(Args, Debug)]
pub(crate) struct JobSearchArgs {
    /// Free-text query matched against title, company, description and skills
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Only show postings listing this skill (repeatable)
    #[arg(long = "skill")]
    pub(crate) skills: Vec<String>,
    /// Only show postings of this experience band, e.g. "Fresher" or "2-3 years" (repeatable)
    #[arg(long = "type", value_parser = parse_job_type)]
    pub(crate) job_types: Vec<JobType>,
    /// Posting age window: all, last24h, last7days or last30days
    #[arg(long, value_parser = parse_time_window, default_value = "all")]
    pub(crate) window: TimeWindow,
    /// 1-based page to show
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Evaluate as of this date (YYYY-MM-DD) or RFC 3339 timestamp instead of now
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Comma separated profile skills used for ranking (overrides APP_VIEWER_SKILLS)
    #[arg(long)]
    pub(crate) viewer_skills: Option<String>,
    /// Print the page as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicationListArgs {
    /// Match against job title or company
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Only show applications with this status
    #[arg(long, value_parser = parse_application_status)]
    pub(crate) status: Option<ApplicationStatus>,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct InvitationListArgs {
    /// Match against mentor name, mentor company or project title
    #[arg(long)]
    pub(crate) query: Option<String>,
    #[arg(long, value_parser = parse_invitation_status)]
    pub(crate) status: Option<InvitationStatus>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum InvitationReply {
    Accept,
    Decline,
}

impl InvitationReply {
    fn status(self) -> InvitationStatus {
        match self {
            InvitationReply::Accept => InvitationStatus::Accepted,
            InvitationReply::Decline => InvitationStatus::Declined,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct InvitationRespondArgs {
    /// Invitation to answer, e.g. inv-1
    pub(crate) id: String,
    /// Only pending invitations can be answered
    #[arg(long, value_enum)]
    pub(crate) reply: InvitationReply,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum UploadKind {
    /// Resume attached to a job application (PDF or Word, 5MB)
    #[default]
    Application,
    /// Resume stored on the profile (PDF, 5MB)
    Profile,
    /// Profile picture (any image)
    Picture,
}

impl UploadKind {
    fn policy(self) -> UploadPolicy {
        match self {
            UploadKind::Application => UploadPolicy::application_resume(),
            UploadKind::Profile => UploadPolicy::profile_resume(),
            UploadKind::Picture => UploadPolicy::profile_picture(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ResumeCheckArgs {
    /// File to check
    pub(crate) path: PathBuf,
    /// Which upload field the file is meant for
    #[arg(long, value_enum, default_value_t = UploadKind::Application)]
    pub(crate) kind: UploadKind,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluate as of this date (YYYY-MM-DD) instead of now
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Job to apply to in the simulated submission (defaults to the top ranked posting)
    #[arg(long)]
    pub(crate) job_id: Option<String>,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_job_search(args: JobSearchArgs) -> Result<(), AppError> {
    let JobSearchArgs {
        query,
        skills,
        job_types,
        window,
        page,
        as_of,
        viewer_skills,
        json,
    } = args;

    let service = load_service(viewer_skills.as_deref())?;
    let criteria = JobCriteria::default()
        .with_query(query.unwrap_or_default())
        .with_skills(skills)
        .with_job_types(job_types)
        .with_time_window(window);
    let now = resolve_now(as_of);

    debug!(?criteria, page, "running job search");
    let result = service.search_jobs(&criteria, page, now);

    if json {
        return print_json(&result);
    }

    render_job_page(&result, window);
    Ok(())
}

fn render_job_page(page: &Page<JobCard>, window: TimeWindow) {
    println!(
        "{} job(s) found ({}) | page {} of {}",
        page.total_items,
        window.label(),
        page.page,
        page.total_pages.max(1)
    );
    for card in &page.items {
        let job = &card.job;
        let remote = if job.is_remote { " | remote" } else { "" };
        let deadline = if card.deadline_near {
            " | deadline soon"
        } else {
            ""
        };
        println!(
            "- [{}] {} @ {} ({}, {}){}{}",
            job.id,
            job.title,
            job.company,
            job.location,
            job.job_type.label(),
            remote,
            deadline
        );
        println!(
            "    posted {} | {} matching skill(s) | {}",
            card.posted_label,
            card.matching_skills,
            job.skills.join(", ")
        );
    }
    if page.has_next() {
        println!("(use --page {} for more)", page.page + 1);
    }
}

pub(crate) fn run_application_list(args: ApplicationListArgs) -> Result<(), AppError> {
    let ApplicationListArgs {
        query,
        status,
        page,
        as_of,
        json,
    } = args;

    let service = load_service(None)?;
    let criteria = ApplicationCriteria::default()
        .with_query(query.unwrap_or_default())
        .with_status(status);
    let result = service.applications(&criteria, page, resolve_now(as_of));

    if json {
        return print_json(&result);
    }

    let summary = service.application_summary();
    let badges: Vec<String> = ApplicationStatus::ordered()
        .into_iter()
        .map(|status| format!("{} {}", status.label(), summary.count(status)))
        .collect();
    println!("All {} | {}", summary.total, badges.join(" | "));
    render_application_page(&result);
    Ok(())
}

fn render_application_page(page: &Page<ApplicationCard>) {
    println!(
        "Showing {} of {} application(s) | page {} of {}",
        page.items.len(),
        page.total_items,
        page.page,
        page.total_pages.max(1)
    );
    for card in &page.items {
        let application = &card.application;
        let recent = if card.recent { " | new" } else { "" };
        println!(
            "- [{}] {} @ {} | {} | applied {}{}",
            application.id,
            application.job_title,
            application.company,
            application.status.label(),
            application.applied_date,
            recent
        );
    }
}

pub(crate) fn run_invitation_list(args: InvitationListArgs) -> Result<(), AppError> {
    let service = load_service(None)?;
    let criteria = InvitationCriteria::default()
        .with_query(args.query.unwrap_or_default())
        .with_status(args.status);
    let listing = service.invitations(&criteria);

    let badges: Vec<String> = InvitationStatus::ordered()
        .into_iter()
        .map(|status| format!("{} {}", status.label(), listing.counts.count(status)))
        .collect();
    println!("All {} | {}", listing.counts.total, badges.join(" | "));

    for invitation in &listing.invitations {
        println!(
            "- {} ({} @ {}) invited you to \"{}\" [{}] on {}",
            invitation.mentor.name,
            invitation.mentor.role,
            invitation.mentor.company,
            invitation.project.title,
            invitation.status.label(),
            invitation.invited_at.format("%b %-d, %Y")
        );
        if let Some(message) = &invitation.message {
            println!("    \"{message}\"");
        }
    }
    Ok(())
}

pub(crate) fn run_invitation_respond(args: InvitationRespondArgs) -> Result<(), AppError> {
    let service = load_service(None)?;
    let response =
        service.respond_to_invitation(&InvitationId(args.id), args.reply.status())?;
    render_invitation_response(&response);
    Ok(())
}

fn render_invitation_response(response: &InvitationResponse) {
    println!(
        "{}: {}",
        response.advisory.title, response.advisory.description
    );
    println!(
        "    \"{}\" is now {}",
        response.invitation.project.title,
        response.invitation.status.label()
    );
}

pub(crate) fn run_resume_check(args: ResumeCheckArgs) -> Result<(), AppError> {
    let metadata = std::fs::metadata(&args.path)?;
    let content_type = mime_guess::from_path(&args.path).first_or_octet_stream();
    let upload = UploadDescriptor {
        file_name: args
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        content_type: content_type.essence_str().to_string(),
        size_bytes: metadata.len(),
    };

    match args.kind.policy().validate(&upload) {
        Ok(()) => {
            println!(
                "{} ({}, {:.1} MB) is accepted",
                upload.file_name,
                upload.content_type,
                upload.size_bytes as f64 / (1024.0 * 1024.0)
            );
            Ok(())
        }
        Err(err) => {
            let advisory = err.advisory();
            eprintln!("{}: {}", advisory.title, advisory.description);
            Err(ListingServiceError::from(err).into())
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = load_service(None)?;
    let now = resolve_now(args.as_of);

    println!("Talent board demo");
    println!("Profile skills: {}", service.viewer_skills().join(", "));

    let top = service.search_jobs(&JobCriteria::default(), 1, now);
    println!("\nTop ranked postings");
    render_job_page(&top, TimeWindow::All);

    let summary = service.application_summary();
    println!("\nApplications: {} total", summary.total);
    for status in ApplicationStatus::ordered() {
        println!("  - {}: {}", status.label(), summary.count(status));
    }

    let invitations = service.invitations(&InvitationCriteria::default());
    println!(
        "\nInvitations: {} pending of {}",
        invitations.counts.count(InvitationStatus::Pending),
        invitations.counts.total
    );
    let pending = invitations
        .invitations
        .iter()
        .find(|invitation| invitation.status == InvitationStatus::Pending);
    if let Some(invitation) = pending {
        let response =
            service.respond_to_invitation(&invitation.id, InvitationStatus::Accepted)?;
        render_invitation_response(&response);
    }

    let job_id = match args.job_id {
        Some(id) => JobId(id),
        None => match top.items.first() {
            Some(card) => card.job.id.clone(),
            None => {
                println!("\nNo postings available for a simulated application.");
                return Ok(());
            }
        },
    };
    let job = service.job(&job_id)?;

    let mut form = ApplicationForm {
        full_name: "Demo Student".to_string(),
        email: "demo.student@example.edu".to_string(),
        phone: "+1 555 0100".to_string(),
        resume: Some(UploadDescriptor {
            file_name: "resume.pdf".to_string(),
            content_type: mime_guess::mime::APPLICATION_PDF.to_string(),
            size_bytes: 180 * 1024,
        }),
        ..ApplicationForm::default()
    };
    for question in &job.custom_questions {
        form.custom_answers
            .insert(question.clone(), "Happy to discuss in an interview.".to_string());
    }

    let receipt = service.apply(&job_id, &form)?;
    println!("\nSimulated application: {}", receipt.message);
    Ok(())
}
