use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use transfuse::{
    parse_diarization_file, parse_transcription_file, OutputFormat, Pipeline, PipelineConfig,
    RunInfo,
};

#[derive(Parser)]
#[command(name = "transfuse")]
#[command(author, version, about = "Speaker-attributed transcript fusion and enrichment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuse diarization and transcription output and write reports
    Process {
        #[command(flatten)]
        inputs: Inputs,

        /// Directory for report files
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Recording identifier used in metadata and file names (default: transcription file stem)
        #[arg(long)]
        recording_id: Option<String>,

        /// Output format; repeat for several (structured, tabular, transcript, plain)
        #[arg(short, long = "format", value_enum)]
        formats: Vec<OutputFormat>,
    },

    /// Print statistics and keywords without writing files
    Analyze {
        #[command(flatten)]
        inputs: Inputs,
    },
}

#[derive(clap::Args)]
struct Inputs {
    /// Diarization turns (JSON)
    #[arg(short, long)]
    diarization: PathBuf,

    /// Transcription chunks (JSON)
    #[arg(short, long)]
    transcription: PathBuf,

    /// Pipeline configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language preset (en, ru, zh)
    #[arg(long)]
    language: Option<String>,

    /// Number of keywords to report
    #[arg(long)]
    top_n: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Inputs {
    fn load_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(top_n) = self.top_n {
            config.keyword_top_n = top_n;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            inputs,
            output_dir,
            recording_id,
            formats,
        } => {
            setup_logging(inputs.verbose);
            process_recording(inputs, output_dir, recording_id, formats).await
        }
        Commands::Analyze { inputs } => {
            setup_logging(inputs.verbose);
            analyze_recording(inputs).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn default_recording_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recording".to_string())
}

async fn process_recording(
    inputs: Inputs,
    output_dir: PathBuf,
    recording_id: Option<String>,
    formats: Vec<OutputFormat>,
) -> Result<()> {
    let mut config = inputs.load_config()?;
    if !formats.is_empty() {
        config.output_formats = formats;
    }
    let pipeline = Pipeline::new(&config).context("Failed to set up pipeline")?;

    info!("Loading diarization from {:?}", inputs.diarization);
    let turns = parse_diarization_file(&inputs.diarization)?;
    info!("Loading transcription from {:?}", inputs.transcription);
    let chunks = parse_transcription_file(&inputs.transcription)?;

    let run = RunInfo::new(recording_id.unwrap_or_else(|| default_recording_id(&inputs.transcription)));
    let report = pipeline.run(&turns, &chunks, &run).await?;
    let result = pipeline.emit(&report, &output_dir, &run)?;

    for artifact in &result.artifacts {
        info!("Output written to {:?}", artifact.path);
    }

    let stats = &report.statistics;
    info!(
        "Complete: {} segments, {} words, {} speakers, {} unknown-speaker segments",
        stats.total_segments,
        stats.total_words,
        stats.speakers.len(),
        stats.unknown_speaker_segments
    );

    Ok(())
}

async fn analyze_recording(inputs: Inputs) -> Result<()> {
    let config = inputs.load_config()?;
    let pipeline = Pipeline::new(&config).context("Failed to set up pipeline")?;

    let turns = parse_diarization_file(&inputs.diarization)?;
    let chunks = parse_transcription_file(&inputs.transcription)?;
    let run = RunInfo::new(default_recording_id(&inputs.transcription));
    let report = pipeline.run(&turns, &chunks, &run).await?;

    let stats = &report.statistics;
    println!("Recording Analysis");
    println!("==================");
    println!("Segments: {}", stats.total_segments);
    println!("Words: {}", stats.total_words);
    println!("Sentences: {}", stats.total_sentences);
    println!("Duration: {:.1}s", stats.total_duration);
    println!("Speakers: {:?}", stats.speakers);
    println!("Unknown speaker segments: {}", stats.unknown_speaker_segments);
    println!("Unknown bounds segments: {}", stats.unknown_bounds_segments);
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    for speaker in &report.speaker_statistics {
        println!(
            "{}: {:.1}s, {} segments, {} words",
            speaker.speaker_id, speaker.total_talk_time, speaker.segment_count, speaker.word_count
        );
    }
    println!();

    println!("Keywords ({:?})", report.metadata.keyword_method);
    println!("--------");
    for keyword in &report.keywords {
        println!("{:>3}. {} ({:.3})", keyword.rank, keyword.term, keyword.score);
    }

    if !report.mentions.is_empty() {
        println!();
        println!("Tagged segments: {}", report.mentions.len());
    }

    Ok(())
}
