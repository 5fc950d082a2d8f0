//! Project dashboard
//!
//! A command-line front end over a project backend: log in, then list,
//! create, rename and delete projects. Every call branches on the typed
//! result instead of catching errors.
//!
//! ```text
//! DASHBOARD_URL=http://localhost:3000 project-dashboard login me@example.com secret
//! DASHBOARD_TOKEN=... project-dashboard list
//! DASHBOARD_TOKEN=... project-dashboard rename 3 "New name"
//! ```

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use vetted::prelude::*;
use vetted::{Failure, HttpClient};

// ============================================================================
// Data Types
// ============================================================================

/// Login form.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Session issued on login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub token: String,
}

/// A project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

/// Error body sent by the backend on any non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Problem {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameProject {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectId {
    pub id: u64,
}

/// Acknowledgement of a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deleted {
    pub id: u64,
}

// ============================================================================
// Endpoints
// ============================================================================

vetted::endpoints! {
    /// Every endpoint of the backend, bound to one client.
    pub struct DashboardApi {
        login: Endpoint<LoginForm, Shape<Session>, Shape<Problem>> =
            Endpoint::post("/auth/login", Shape::new(), Shape::new()),
        list: Endpoint<Params, Shape<Vec<Project>>, Shape<Problem>> =
            Endpoint::get("/projects", Shape::new(), Shape::new()),
        create: Endpoint<NewProject, Shape<Project>, Shape<Problem>> =
            Endpoint::post("/projects", Shape::new(), Shape::new()),
        rename: Endpoint<RenameProject, Shape<Project>, Shape<Problem>> =
            Endpoint::patch("/projects/{id}", Shape::new(), Shape::new()).strict_path(),
        delete: Endpoint<ProjectId, Shape<Deleted>, Shape<Problem>> =
            Endpoint::delete("/projects/{id}", Shape::new(), Shape::new()).strict_path(),
    }
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login { email: String, password: String },
    List,
    Create { name: String },
    Rename { id: u64, name: String },
    Delete { id: u64 },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, String> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["login", email, password] => Ok(Self::Login {
                email: (*email).to_string(),
                password: (*password).to_string(),
            }),
            ["list"] => Ok(Self::List),
            ["create", name] => Ok(Self::Create {
                name: (*name).to_string(),
            }),
            ["rename", id, name] => Ok(Self::Rename {
                id: parse_id(id)?,
                name: (*name).to_string(),
            }),
            ["delete", id] => Ok(Self::Delete { id: parse_id(id)? }),
            _ => Err(USAGE.to_string()),
        }
    }
}

const USAGE: &str = "usage: project-dashboard <login EMAIL PASSWORD | list | create NAME | rename ID NAME | delete ID>";

fn parse_id(raw: &str) -> Result<u64, String> {
    raw.parse()
        .map_err(|_| format!("project id must be a number, got {raw:?}"))
}

/// Human-readable line for a failed call.
fn describe<B>(err: &Failure<B, Problem>) -> String {
    match err {
        ApiError::ErrorResponse { status, body, .. } => format!("{status}: {}", body.message),
        ApiError::RequestData { message, .. } => format!("invalid input: {message}"),
        ApiError::Fetch { cause } => format!("backend unreachable: {cause}"),
        ApiError::Parse { .. } | ApiError::Schema { .. } => {
            format!("unexpected answer from the backend: {err}")
        }
    }
}

/// Run one command, returning the lines to print.
async fn run<C: HttpClient>(
    api: &DashboardApi<C>,
    context: &RequestContext,
    command: Command,
) -> Result<Vec<String>, String> {
    match command {
        Command::Login { email, password } => {
            let session = api
                .login
                .call(LoginForm { email, password }, CallOptions::new())
                .await
                .map_err(|err| describe(&err))?;
            let token = session.body.into_data().token;
            context.add_header("Authorization", format!("Bearer {token}"));
            Ok(vec![format!("export DASHBOARD_TOKEN={token}")])
        }
        Command::List => {
            let projects = api
                .list
                .call(Params::new(), CallOptions::new())
                .await
                .map_err(|err| describe(&err))?;
            Ok(projects
                .body
                .iter()
                .map(|project| format!("{:>4}  {}", project.id, project.name))
                .collect())
        }
        Command::Create { name } => {
            let created = api
                .create
                .call(NewProject { name }, CallOptions::new())
                .await
                .map_err(|err| describe(&err))?;
            Ok(vec![format!("created #{} {}", created.body.id, created.body.name)])
        }
        Command::Rename { id, name } => {
            let renamed = api
                .rename
                .call(RenameProject { id, name }, CallOptions::new())
                .await
                .map_err(|err| describe(&err))?;
            Ok(vec![format!("renamed #{} to {}", renamed.body.id, renamed.body.name)])
        }
        Command::Delete { id } => {
            let deleted = api
                .delete
                .call(ProjectId { id }, CallOptions::new())
                .await
                .map_err(|err| describe(&err))?;
            Ok(vec![format!("deleted #{}", deleted.body.id)])
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{usage}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(?command, "parsed command");

    let base_url =
        std::env::var("DASHBOARD_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let context = RequestContext::new();
    if let Ok(token) = std::env::var("DASHBOARD_TOKEN") {
        context.add_header("Authorization", format!("Bearer {token}"));
    }

    let http = HyperClient::builder().with_logging().build();
    let client = match ApiClient::builder(base_url)
        .http_client(http)
        .context(context.clone())
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };
    let api = DashboardApi::new(&client);

    match run(&api, &context, command).await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Tests using wiremock
// ============================================================================
