//! CLI entry point for the report-card (bulletin) tool.
//!
//! Provides subcommands for listing and searching students, generating a
//! bulletin from the school REST backend, and rendering one from local JSON
//! snapshots.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ecole_bulletin::bulletin::{BulletinOutcome, NoStudentSelected, generate_bulletin};
use ecole_bulletin::config::ApiConfig;
use ecole_bulletin::infra::rest::{FileSchoolSource, RestSchoolClient};
use ecole_bulletin::services::school_api::{SchoolApi, load_snapshot};
use ecole_bulletin::{niveau, output, render, search};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bulletin")]
#[command(about = "Generate school report cards from the school REST backend", long_about = None)]
struct Cli {
    /// Base URL of the REST backend (overrides BULLETIN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List students, optionally filtered by a search on matricule, name or class
    Students {
        /// Text to look for in matricule, nom, prenom or class name
        #[arg(short = 's', long = "search", value_name = "TEXT")]
        query: Option<String>,
    },
    /// Fetch students and grades from the backend and build one bulletin
    Generate {
        #[command(flatten)]
        target: Target,
    },
    /// Build one bulletin from local JSON snapshots of the two collections
    Render {
        /// JSON file holding the students collection
        #[arg(long)]
        students: PathBuf,

        /// JSON file holding the grades collection
        #[arg(long)]
        grades: PathBuf,

        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args)]
struct Target {
    /// Matricule of the student whose bulletin to build
    #[arg(short, long)]
    matricule: Option<String>,

    /// Write the printable HTML bulletin to this file
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Write the bulletin as JSON to this file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Append a summary row to this CSV register
    #[arg(long, value_name = "CSV")]
    register: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bulletin.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bulletin.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::from_env()?.with_base_url(cli.api_url);

    match cli.command {
        Commands::Students { query } => {
            let client = RestSchoolClient::new(config)?;
            let students = client.list_students().await?;
            let found = search::search_students(&students, query.as_deref().unwrap_or(""));

            info!(total = students.len(), matched = found.len(), "Student list fetched");
            for student in found {
                println!(
                    "{}  [{}]",
                    search::option_label(student),
                    niveau::category(student.niveau.as_deref())
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate { target } => {
            let client = RestSchoolClient::new(config)?;
            run_bulletin(&client, &target).await
        }
        Commands::Render {
            students,
            grades,
            target,
        } => {
            let source = FileSchoolSource::new(students, grades);
            run_bulletin(&source, &target).await
        }
    }
}

/// Loads both collections, builds the bulletin of the targeted student and
/// writes the requested outputs.
///
/// A missing selection is reported as a warning (exit code 2), a student
/// without grades as an informational notice (success), and any other
/// failure as a generic error whose details only go to the logs.
#[tracing::instrument(skip_all, fields(matricule = target.matricule.as_deref()))]
async fn run_bulletin<A: SchoolApi>(api: &A, target: &Target) -> Result<ExitCode> {
    let snapshot = load_snapshot(api).await?;

    let selected = target
        .matricule
        .as_deref()
        .and_then(|m| search::find_by_matricule(&snapshot.students, m));
    if selected.is_none() {
        if let Some(m) = &target.matricule {
            warn!(matricule = %m, "No student with this matricule");
        }
    }

    let report = match generate_bulletin(selected, &snapshot.grades.grades) {
        Ok(BulletinOutcome::Report(report)) => report,
        Ok(BulletinOutcome::NoData) => {
            println!("Aucune note trouvée pour cet élève");
            print!("{}", render::render_screen(None));
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) if e.downcast_ref::<NoStudentSelected>().is_some() => {
            eprintln!("{e}");
            return Ok(ExitCode::from(2));
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Bulletin generation failed");
            eprintln!("Erreur lors de la génération du bulletin");
            return Ok(ExitCode::FAILURE);
        }
    };

    print!("{}", render::render_screen(Some(&report)));

    if let Some(path) = &target.html {
        render::write_printable(&report, path)?;
    }
    if let Some(path) = &target.json {
        output::write_json(&report, path)?;
    }
    if let Some(path) = &target.register {
        output::append_register(path, &report)?;
    }

    info!(
        moyenne = %report.moyenne_generale,
        appreciation = %report.appreciation,
        "Bulletin généré avec succès"
    );
    Ok(ExitCode::SUCCESS)
}
