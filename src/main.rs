use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use guided_capture::adapters::ai::completion_service_from_config;
use guided_capture::adapters::storage::FileStateStore;
use guided_capture::application::{
    ListSessionsHandler, ResumeSessionCommand, ResumeSessionHandler, SaveSessionCommand,
    SaveSessionHandler,
};
use guided_capture::config::{AppConfig, LoggingConfig};
use guided_capture::domain::capture::GuidedCapture;
use guided_capture::domain::foundation::SessionId;
use guided_capture::ports::StateStore;

#[derive(Parser)]
#[command(name = "guided-capture")]
#[command(about = "Run an LLM-guided interview and synthesize the answers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new interview
    New {
        /// What the interview is about
        #[arg(long)]
        topic: String,

        /// Description of the artifact to produce
        #[arg(long)]
        format: String,

        /// Maximum number of questions to ask
        #[arg(long)]
        questions: Option<u32>,

        /// Model name passed to the provider
        #[arg(long)]
        model: Option<String>,

        /// JSON object mapping question text to answer, instead of prompting
        #[arg(long)]
        answers: Option<PathBuf>,
    },
    /// Continue a saved interview and synthesize again
    Resume {
        session_id: SessionId,

        /// 1-based question number to re-answer
        #[arg(long, requires = "answer")]
        question_index: Option<usize>,

        #[arg(long, requires = "question_index")]
        answer: Option<String>,

        /// Model name passed to the provider
        #[arg(long)]
        model: Option<String>,
    },
    /// Print a saved snapshot as JSON
    Show { session_id: SessionId },
    /// List saved sessions
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    config
        .capture
        .validate()
        .context("invalid capture configuration")?;
    let store: Arc<dyn StateStore> = Arc::new(FileStateStore::new(
        &config.capture.state_dir,
        config.capture.state_format,
    ));

    match cli.command {
        Commands::New {
            topic,
            format,
            questions,
            model,
            answers,
        } => {
            config.ai.validate().context("invalid provider configuration")?;
            let service = completion_service_from_config(&config.ai)?;

            let mut options = config.capture.options(model);
            if let Some(n) = questions {
                options.num_questions = n;
            }

            let mut session = GuidedCapture::with_options(topic, format, service, options)?;
            let session_id = SessionId::new();
            let saver = SaveSessionHandler::new(store.clone());

            session
                .generate_questions()
                .await
                .context("question generation failed")?;
            save(&saver, session_id, &session).await?;

            match answers {
                Some(path) => {
                    let text = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("reading {}", path.display()))?;
                    let entries: BTreeMap<String, String> = serde_json::from_str(&text)
                        .with_context(|| {
                            format!("{} is not a JSON object of strings", path.display())
                        })?;
                    session.submit_answers_bulk(entries)?;
                }
                None => prompt_for_missing(&mut session, session_id, &saver).await?,
            }

            finish(&mut session, session_id, &saver).await
        }
        Commands::Resume {
            session_id,
            question_index,
            answer,
            model,
        } => {
            config.ai.validate().context("invalid provider configuration")?;
            let service = completion_service_from_config(&config.ai)?;
            let saver = SaveSessionHandler::new(store.clone());

            let mut session = ResumeSessionHandler::new(store, service)
                .with_options(config.capture.options(model))
                .handle(ResumeSessionCommand { session_id })
                .await
                .with_context(|| format!("failed to resume session {}", session_id))?;

            session
                .get_questions()
                .await
                .context("question generation failed")?;

            if let (Some(index), Some(answer)) = (question_index, answer) {
                let question = index
                    .checked_sub(1)
                    .and_then(|i| session.questions().get(i))
                    .cloned()
                    .ok_or_else(|| {
                        anyhow!(
                            "question index {} out of range 1..={}",
                            index,
                            session.questions().len()
                        )
                    })?;
                session.submit_answer(&question, answer)?;
                save(&saver, session_id, &session).await?;
            }

            prompt_for_missing(&mut session, session_id, &saver).await?;
            finish(&mut session, session_id, &saver).await
        }
        Commands::Show { session_id } => {
            let state = store
                .load(session_id)
                .await
                .with_context(|| format!("failed to load session {}", session_id))?;
            println!("{}", state.to_json_pretty()?);
            Ok(())
        }
        Commands::List => {
            for summary in ListSessionsHandler::new(store).handle().await? {
                let status = summary
                    .status
                    .map_or_else(|| "invalid".to_string(), |s| s.to_string());
                println!(
                    "{}  {:<16} {}/{}  {}",
                    summary.session_id, status, summary.answered, summary.total, summary.topic
                );
            }
            Ok(())
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn save(
    saver: &SaveSessionHandler,
    session_id: SessionId,
    session: &GuidedCapture,
) -> Result<()> {
    saver
        .handle(SaveSessionCommand {
            session_id,
            session,
        })
        .await
        .with_context(|| format!("failed to save session {}", session_id))?;
    Ok(())
}

/// Asks for each unanswered question on stdin, saving after every answer.
///
/// End of input stops early; whatever is still missing is synthesized with
/// the placeholder text.
async fn prompt_for_missing(
    session: &mut GuidedCapture,
    session_id: SessionId,
    saver: &SaveSessionHandler,
) -> Result<()> {
    let missing: Vec<String> = session
        .get_missing_questions()
        .into_iter()
        .map(str::to_string)
        .collect();
    let total = session.questions().len();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for question in missing {
        let number = session
            .questions()
            .iter()
            .position(|q| *q == question)
            .map_or(0, |i| i + 1);
        println!("\n[{}/{}] {}", number, total, question);
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        session.submit_answer(&question, line.trim())?;
        save(saver, session_id, session).await?;
    }

    Ok(())
}

async fn finish(
    session: &mut GuidedCapture,
    session_id: SessionId,
    saver: &SaveSessionHandler,
) -> Result<()> {
    let output = session
        .process_answers()
        .await
        .context("synthesis failed")?;
    save(saver, session_id, session).await?;

    println!("\n{}", output);
    eprintln!("\nsession: {}", session_id);
    Ok(())
}
