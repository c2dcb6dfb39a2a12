use clap::{Args, Parser, Subcommand};
use dolphin_core::config::{AppConfig, LexiconPaths, OutputConfig};
use dolphin_core::diagnostics::TracingSink;
use dolphin_core::error::AppError;
use dolphin_core::report;
use dolphin_core::scoring::{
    Assessment, AssessmentSession, GroupMap, LexiconKind, PriorResultError, PriorSelfProjection,
    ResponseDocument, TraitGroup,
};
use dolphin_core::store::{JsonFileResultRepository, ResultRepository, SaveOutcome};
use dolphin_core::telemetry;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "dolphin",
    about = "Score personality assessment responses against weighted word lexicons",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a response document, write its report and store the result
    Score(ScoreArgs),
    /// Re-score only the concept section, reusing an earlier self projection
    Repeat(RepeatArgs),
    /// Load the lexicon tables and print entry counts and ceilings
    Lexicons(LexiconArgs),
}

#[derive(Args, Debug, Default)]
struct LexiconArgs {
    /// Override the self lexicon table
    #[arg(long)]
    self_weights: Option<PathBuf>,
    /// Override the concept lexicon table
    #[arg(long)]
    concept_weights: Option<PathBuf>,
    /// Override the adjusted lexicon table
    #[arg(long)]
    adjust_weights: Option<PathBuf>,
}

impl LexiconArgs {
    fn apply(self, paths: &mut LexiconPaths) {
        if let Some(path) = self.self_weights {
            paths.self_words = path;
        }
        if let Some(path) = self.concept_weights {
            paths.concept_words = path;
        }
        if let Some(path) = self.adjust_weights {
            paths.adjusted_words = path;
        }
    }
}

#[derive(Args, Debug, Default)]
struct OutputArgs {
    /// Directory for the rendered report
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// JSON result store
    #[arg(long)]
    results: Option<PathBuf>,
    /// Skip saving the result record
    #[arg(long)]
    no_store: bool,
}

impl OutputArgs {
    fn apply(&mut self, output: &mut OutputConfig) {
        if let Some(dir) = self.output_dir.take() {
            output.report_dir = dir;
        }
        if let Some(path) = self.results.take() {
            output.results_path = path;
        }
    }
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Response document: `-NAME`, self words, `$`, concept words
    response: PathBuf,
    #[command(flatten)]
    lexicons: LexiconArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct RepeatArgs {
    /// Response document; only words after `$` are scored
    response: PathBuf,
    /// Earlier rendered report holding the self projection to reuse
    #[arg(long, conflicts_with = "from_store", required_unless_present = "from_store")]
    prior_report: Option<PathBuf>,
    /// Reuse the self projection stored for the response's subject
    #[arg(long)]
    from_store: bool,
    #[command(flatten)]
    lexicons: LexiconArgs,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "dolphin starting");

    match cli.command {
        Command::Score(args) => run_score(args, &mut config),
        Command::Repeat(args) => run_repeat(args, &mut config),
        Command::Lexicons(args) => run_lexicons(args, &mut config),
    }
}

fn run_score(mut args: ScoreArgs, config: &mut AppConfig) -> Result<(), AppError> {
    args.lexicons.apply(&mut config.lexicons);
    args.output.apply(&mut config.output);

    let mut sink = TracingSink;
    let session = AssessmentSession::load(&config.lexicons, &mut sink)?;
    let document = ResponseDocument::load_or_empty(&args.response, &mut sink);
    let assessment = session.score(&document, &mut sink);

    publish(&assessment, &config.output, args.output.no_store)
}

fn run_repeat(mut args: RepeatArgs, config: &mut AppConfig) -> Result<(), AppError> {
    args.lexicons.apply(&mut config.lexicons);
    args.output.apply(&mut config.output);

    let mut sink = TracingSink;
    let session = AssessmentSession::load(&config.lexicons, &mut sink)?;
    let document = ResponseDocument::load_or_empty(&args.response, &mut sink);

    let prior = match args.prior_report {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            PriorSelfProjection::from_report(&text, &mut sink)?
        }
        None => load_stored_prior(&document, &config.output)?,
    };

    let assessment = session.repeat(&document, &prior, &mut sink);
    publish(&assessment, &config.output, args.output.no_store)
}

fn load_stored_prior(
    document: &ResponseDocument,
    output: &OutputConfig,
) -> Result<PriorSelfProjection, AppError> {
    let subject = document.subject().unwrap_or_default();
    let repository = JsonFileResultRepository::new(&output.results_path);
    let stored = repository
        .fetch(subject)?
        .ok_or_else(|| PriorResultError::NotStored {
            subject: subject.to_string(),
        })?;
    Ok(PriorSelfProjection::from_record(&stored.record))
}

fn run_lexicons(args: LexiconArgs, config: &mut AppConfig) -> Result<(), AppError> {
    args.apply(&mut config.lexicons);

    let session = AssessmentSession::load(&config.lexicons, &mut TracingSink)?;

    let lexicons = session.lexicons();
    println!("Lexicon ceilings");
    for kind in LexiconKind::ordered() {
        let lexicon = lexicons.get(kind);
        println!("- {} ({} words)", kind, lexicon.len());
        print_ceilings(lexicon.ceiling());
    }
    println!("- task (self minus adjusted)");
    print_ceilings(&lexicons.ceilings().task);
    Ok(())
}

fn print_ceilings(ceilings: &GroupMap<i64>) {
    for group in TraitGroup::ordered() {
        println!("    {}: {}", group, ceilings[group]);
    }
}

/// Writes the report, prints the record as JSON and stores it.
fn publish(
    assessment: &Assessment,
    output: &OutputConfig,
    no_store: bool,
) -> Result<(), AppError> {
    let report_path = report::write_to_dir(&output.report_dir, assessment)?;
    info!(path = %report_path.display(), "report written");

    println!("{}", serde_json::to_string_pretty(&assessment.record)?);

    if no_store {
        return Ok(());
    }
    if assessment.record.subject.is_empty() {
        warn!("response names no subject; result not stored");
        return Ok(());
    }

    let mut repository = JsonFileResultRepository::new(&output.results_path);
    match repository.save(assessment.record.clone())? {
        SaveOutcome::Inserted => info!(subject = %assessment.record.subject, "result stored"),
        SaveOutcome::RepeatUpdated { tests_taken_count } => info!(
            subject = %assessment.record.subject,
            tests_taken_count,
            "repeat test stored"
        ),
    }
    Ok(())
}
