//! Command surface and execution. One invocation = one screen visit: the
//! review commands build a board, refresh it, run at most one action, and
//! close the board on the way out.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::api::auth::RegisterRequest;
use crate::api::participants::ParticipantGateway;
use crate::api::profiles::ProfileUpdate;
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::participant::ReviewAction;
use crate::models::posting::{PostingDraft, PostingKind, PostingRef};
use crate::models::user::Role;
use crate::recommend::{RecommendError, RecommendationPanel};
use crate::render;
use crate::review::dispatcher::{ActionOutcome, ConfirmationGate, ConfirmationRequest};
use crate::review::ReviewBoard;
use crate::session::Session;
use crate::storage::LocalStore;

#[derive(Parser, Debug)]
#[command(name = "console", version, about = "Terminal console for the marketplace API")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register, login, verification and password reset
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// List and manage job/course/training postings
    Postings {
        #[arg(value_enum)]
        kind: PostingKind,
        #[command(subcommand)]
        command: PostingCommands,
    },
    /// Review applicants/participants of one posting
    Review {
        #[arg(value_enum)]
        kind: PostingKind,
        posting_id: Uuid,
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// AI-ranked shortlist for one posting
    Recommend {
        #[arg(value_enum)]
        kind: PostingKind,
        posting_id: Uuid,
        #[command(subcommand)]
        command: RecommendCommands,
    },
    /// Own profile and company profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommands {
    Register {
        name: String,
        email: String,
        password: String,
        #[arg(value_enum, default_value = "user")]
        role: Role,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    /// Confirm an email address with the token from the verification mail
    Verify { token: String },
    /// Request a password reset mail
    ResetRequest { email: String },
    /// Set a new password with the token from the reset mail
    Reset { token: String, password: String },
}

#[derive(Subcommand, Debug)]
enum PostingCommands {
    List,
    Show { id: Uuid },
    Create {
        title: String,
        description: String,
        #[arg(long)]
        location: Option<String>,
        /// Family-specific attributes as a JSON object
        #[arg(long)]
        details: Option<String>,
    },
    Update {
        id: Uuid,
        title: String,
        description: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        details: Option<String>,
    },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
enum ReviewCommands {
    /// Fetch the three listings and print the buckets
    Show,
    Accept { participant_id: Uuid },
    Reject { participant_id: Uuid },
    /// Move a reviewed participant back to pending
    Pending { participant_id: Uuid },
}

#[derive(Subcommand, Debug)]
enum RecommendCommands {
    /// Ask the scoring service for a fresh shortlist (persists it)
    Fetch,
    /// Show the shortlist saved on this device
    Saved,
    /// Delete the saved shortlist
    Clear,
}

#[derive(Subcommand, Debug)]
enum ProfileCommands {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        picture: Option<String>,
    },
    Company { id: Uuid },
}

/// y/N prompt on the controlling terminal. Anything but an explicit yes
/// declines.
struct TerminalGate;

impl ConfirmationGate for TerminalGate {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        print!(
            "Really {} {}? [y/N] ",
            request.action.verb(),
            request.participant_label
        );
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let store = LocalStore::open(&config.state_dir)?;
    let client = ApiClient::new(&config.api_url, config.http_timeout);

    let session = Session::restore(&store)?;
    if let Some(session) = &session {
        client.set_token(&session.token);
    }

    match cli.command {
        Commands::Auth { command } => run_auth(command, &client, &store).await,
        Commands::Postings { kind, command } => run_postings(kind, command, &client).await,
        Commands::Review {
            kind,
            posting_id,
            command,
        } => run_review(PostingRef::new(kind, posting_id), command, &client).await,
        Commands::Recommend {
            kind,
            posting_id,
            command,
        } => {
            run_recommend(
                PostingRef::new(kind, posting_id),
                command,
                &client,
                &store,
                &config,
            )
            .await
        }
        Commands::Profile { command } => run_profile(command, &client, session.as_ref()).await,
    }
}

async fn run_auth(command: AuthCommands, client: &ApiClient, store: &LocalStore) -> Result<()> {
    match command {
        AuthCommands::Register {
            name,
            email,
            password,
            role,
        } => {
            let ack = client
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                    role,
                })
                .await?;
            println!(
                "{}",
                ack.message
                    .as_deref()
                    .unwrap_or("Registered. Check your mail for the verification link.")
            );
        }
        AuthCommands::Login { email, password } => {
            let session = client.login(&email, &password).await?;
            session.persist(store)?;
            println!("Logged in as {} ({}).", session.user_id, session.role);
        }
        AuthCommands::Logout => {
            Session::clear(store)?;
            client.clear_token();
            println!("Logged out.");
        }
        AuthCommands::Verify { token } => {
            let ack = client.verify_email(&token).await?;
            println!("{}", ack.message.as_deref().unwrap_or("Email verified."));
        }
        AuthCommands::ResetRequest { email } => {
            let ack = client.request_password_reset(&email).await?;
            println!(
                "{}",
                ack.message.as_deref().unwrap_or("Reset mail requested.")
            );
        }
        AuthCommands::Reset { token, password } => {
            let ack = client.reset_password(&token, &password).await?;
            println!("{}", ack.message.as_deref().unwrap_or("Password updated."));
        }
    }
    Ok(())
}

async fn run_postings(
    kind: PostingKind,
    command: PostingCommands,
    client: &ApiClient,
) -> Result<()> {
    match command {
        PostingCommands::List => {
            let postings = client.list_postings(kind).await?;
            render::print_postings(&postings);
        }
        PostingCommands::Show { id } => {
            let posting = client.get_posting(&PostingRef::new(kind, id)).await?;
            render::print_posting(&posting);
        }
        PostingCommands::Create {
            title,
            description,
            location,
            details,
        } => {
            let draft = draft(title, description, location, details)?;
            let posting = client.create_posting(kind, &draft).await?;
            println!("Created {} {}.", kind, posting.id);
        }
        PostingCommands::Update {
            id,
            title,
            description,
            location,
            details,
        } => {
            let draft = draft(title, description, location, details)?;
            let posting = client
                .update_posting(&PostingRef::new(kind, id), &draft)
                .await?;
            println!("Updated {} {}.", kind, posting.id);
        }
        PostingCommands::Delete { id } => {
            client.delete_posting(&PostingRef::new(kind, id)).await?;
            println!("Deleted {kind} {id}.");
        }
    }
    Ok(())
}

fn draft(
    title: String,
    description: String,
    location: Option<String>,
    details: Option<String>,
) -> Result<PostingDraft> {
    let details = match details {
        Some(raw) => serde_json::from_str(&raw)?,
        None => serde_json::Value::Null,
    };
    Ok(PostingDraft {
        title,
        description,
        location,
        details,
    })
}

async fn run_review(
    posting: PostingRef,
    command: ReviewCommands,
    client: &ApiClient,
) -> Result<()> {
    let gateway: Arc<dyn ParticipantGateway> = Arc::new(client.clone());
    let board = ReviewBoard::new(posting, gateway, Arc::new(TerminalGate));
    board.refresh().await;

    let action = match command {
        ReviewCommands::Show => None,
        ReviewCommands::Accept { participant_id } => Some((participant_id, ReviewAction::Accept)),
        ReviewCommands::Reject { participant_id } => Some((participant_id, ReviewAction::Reject)),
        ReviewCommands::Pending { participant_id } => {
            Some((participant_id, ReviewAction::SetPending))
        }
    };

    match action {
        None => render::print_buckets(board.posting(), &board.buckets()),
        Some((participant_id, action)) => {
            match board.dispatch(participant_id, action).await {
                ActionOutcome::Applied => {
                    render::print_buckets(board.posting(), &board.buckets());
                }
                ActionOutcome::Cancelled => println!("Cancelled; nothing was sent."),
                // Failures are logged by the dispatcher; the board shows
                // no error state of its own.
                ActionOutcome::Failed => {}
            }
        }
    }

    board.close();
    Ok(())
}

async fn run_recommend(
    posting: PostingRef,
    command: RecommendCommands,
    client: &ApiClient,
    store: &LocalStore,
    config: &Config,
) -> Result<()> {
    let mut panel = RecommendationPanel::new(store.clone(), config.scoped_recommendation_cache);
    match command {
        RecommendCommands::Fetch => {
            panel.fetch(client, &posting).await?;
            render::print_recommendations(panel.entries());
        }
        RecommendCommands::Saved => match panel.load_saved(&posting) {
            Ok(entries) => render::print_recommendations(entries),
            Err(RecommendError::NothingSaved) => {
                println!("No saved recommendations on this device.");
            }
            Err(e) => return Err(e.into()),
        },
        RecommendCommands::Clear => {
            panel.clear_saved(&posting)?;
            println!("Saved recommendations cleared.");
        }
    }
    Ok(())
}

async fn run_profile(
    command: ProfileCommands,
    client: &ApiClient,
    session: Option<&Session>,
) -> Result<()> {
    match command {
        ProfileCommands::Show => {
            let Some(session) = session else {
                bail!("not logged in");
            };
            let profile = client.get_profile(session.user_id).await?;
            render::print_profile(&profile);
        }
        ProfileCommands::Update { name, bio, picture } => {
            let Some(session) = session else {
                bail!("not logged in");
            };
            let profile = client
                .update_profile(
                    session.user_id,
                    &ProfileUpdate {
                        name,
                        bio,
                        profile_picture: picture,
                    },
                )
                .await?;
            render::print_profile(&profile);
        }
        ProfileCommands::Company { id } => {
            let company = client.get_company(id).await?;
            render::print_company(&company);
        }
    }
    Ok(())
}
