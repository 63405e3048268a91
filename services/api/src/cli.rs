use crate::commands::{
    run_application_list, run_demo, run_invitation_list, run_invitation_respond, run_job_search,
    run_resume_check, ApplicationListArgs, DemoArgs, InvitationListArgs, InvitationRespondArgs,
    JobSearchArgs, ResumeCheckArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_board::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Board",
    about = "Search jobs, track applications and answer mentor invitations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Search job postings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// List submitted applications
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// List mentor invitations
    Invitations {
        #[command(subcommand)]
        command: InvitationsCommand,
    },
    /// Check a resume or profile picture against the upload rules
    Resume {
        #[command(subcommand)]
        command: ResumeCommand,
    },
    /// Walk through a search, an application summary and a simulated apply
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// Filter, rank and page through postings
    Search(JobSearchArgs),
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// Filter and page through applications
    List(ApplicationListArgs),
}

#[derive(Subcommand, Debug)]
enum InvitationsCommand {
    /// Filter invitations by text and status
    List(InvitationListArgs),
    /// Accept or decline a pending invitation
    Respond(InvitationRespondArgs),
}

#[derive(Subcommand, Debug)]
enum ResumeCommand {
    /// Validate a local file's type and size
    Check(ResumeCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Jobs {
            command: JobsCommand::Search(args),
        } => run_job_search(args),
        Command::Applications {
            command: ApplicationsCommand::List(args),
        } => run_application_list(args),
        Command::Invitations {
            command: InvitationsCommand::List(args),
        } => run_invitation_list(args),
        Command::Invitations {
            command: InvitationsCommand::Respond(args),
        } => run_invitation_respond(args),
        Command::Resume {
            command: ResumeCommand::Check(args),
        } => run_resume_check(args),
        Command::Demo(args) => run_demo(args),
    }
}
