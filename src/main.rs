use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use isl_gloss::ir::{join_gloss, GlossToken};
use isl_gloss::pipeline::{init_default_config, GlossConfig, CONFIG_FILE_NAME};
use isl_gloss::progress::ConsoleProgress;
use isl_gloss::GlossService;

#[derive(Parser, Debug)]
#[command(name = "isl-gloss")]
#[command(about = "English text (or video speech) to Indian Sign Language gloss", long_about = None)]
struct Args {
    /// Generate a default isl-gloss.toml, then exit
    #[arg(long)]
    init_config: bool,

    /// Directory to write the config file (default: current directory)
    #[arg(long, value_name = "DIR")]
    init_config_dir: Option<PathBuf>,

    /// Overwrite an existing config file when used with --init-config
    #[arg(long)]
    force: bool,

    /// Sentence to gloss (words may be given as separate arguments)
    #[arg(value_name = "TEXT")]
    text: Vec<String>,

    /// Use the trained seq2seq model instead of the rule-based pipeline
    #[arg(long, conflicts_with_all = ["tokens", "explain"])]
    neural: bool,

    /// Map the given words straight through the lexicon (no analysis, no reordering)
    #[arg(long)]
    tokens: bool,

    /// Print every rule-based stage as JSON
    #[arg(long)]
    explain: bool,

    /// Transcribe a video's speech track and gloss it
    #[arg(long, value_name = "VIDEO", conflicts_with_all = ["text", "file", "neural", "tokens"])]
    video: Option<PathBuf>,

    /// Gloss every non-empty line of a text file
    #[arg(long, value_name = "TXT", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Print gloss as a JSON array instead of space-separated tokens
    #[arg(long)]
    json: bool,

    /// Config file path (default: search for isl-gloss.toml upwards)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with input_vocab.json, output_vocab.json and seq2seq_model.json
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Do not append results to the corpus log
    #[arg(long)]
    no_corpus: bool,

    /// Suppress progress lines on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.init_config {
        let dir = args
            .init_config_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let cfg_path = init_default_config(&dir, args.force).context("init default config")?;
        eprintln!("Wrote config: {}", cfg_path.display());
        return Ok(());
    }

    let cfg = GlossConfig::from_paths_and_args(args.config.clone(), args.no_corpus, args.model_dir.clone())
        .context("build config")?;
    let progress = ConsoleProgress::new(!args.quiet);
    if cfg.config_path.exists() {
        progress.info(format!("config: {}", cfg.config_path.display()));
    }
    let service = GlossService::from_config(&cfg, ConsoleProgress::new(!args.quiet))
        .context("init gloss service")?;

    if let Some(video) = args.video.as_ref() {
        let out = service
            .video_to_gloss(video)
            .with_context(|| format!("video: {}", video.display()))?;
        progress.info(format!("transcript: {}", out.transcript));
        print_gloss(&out.gloss, args.json)?;
        return Ok(());
    }

    if let Some(file) = args.file.as_ref() {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("read input: {}", file.display()))?;
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            gloss_one(&service, &args, line)?;
            progress.step("glossed", i + 1, lines.len());
        }
        return Ok(());
    }

    if args.text.is_empty() {
        let mut cmd = Args::command();
        cmd.print_help().context("print help")?;
        eprintln!(
            "\n\nUSAGE:\n  isl-gloss \"I will not go to school today\"\n  isl-gloss --neural \"hello\"\n  isl-gloss --video clip.mp4\n\nTIPS:\n  - Default config search: {CONFIG_FILE_NAME} (upwards), or set ISL_GLOSS_CONFIG.\n"
        );
        return Ok(());
    }

    let text = args.text.join(" ");
    gloss_one(&service, &args, &text)
}

fn gloss_one(service: &GlossService, args: &Args, text: &str) -> anyhow::Result<()> {
    if args.tokens {
        let words: Vec<&str> = text.split_whitespace().collect();
        return print_gloss(&service.map_tokens(&words), args.json);
    }
    if args.neural {
        let gloss = service.generate_neural(text).context("neural gloss")?;
        return print_gloss(&gloss, args.json);
    }
    if args.explain {
        let trace = service.explain(text).context("rule-based gloss")?;
        println!(
            "{}",
            serde_json::to_string_pretty(&trace).context("serialize trace")?
        );
        return Ok(());
    }
    let gloss = service.generate_rule_based(text).context("rule-based gloss")?;
    print_gloss(&gloss, args.json)
}

fn print_gloss(gloss: &[GlossToken], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(gloss).context("serialize gloss")?);
    } else {
        println!("{}", join_gloss(gloss));
    }
    Ok(())
}
