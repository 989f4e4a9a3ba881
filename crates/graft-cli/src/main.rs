//! graft CLI: project JSON documents with declarative rule files.

use clap::{Parser, Subcommand};
use graft_core::config::ProjectorConfig;
use graft_dsl::{parse_rule_document, Registry, RuleDocument};
use graft_project::{overlap_prefix, Projector};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "graft")]
#[command(about = "Reshape nested JSON with path-based projection rules", long_about = None)]
struct Cli {
    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a JSON document through a rule file
    Project {
        /// Path to the rule file (YAML or JSON)
        #[arg(short, long)]
        rules: PathBuf,

        /// Input JSON file; `-` or omitted reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Emit only rule-touched fields (overrides the rule file)
        #[arg(long, conflicts_with = "fat")]
        thin: bool,

        /// Start from a full copy of the input (overrides the rule file)
        #[arg(long)]
        fat: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a rule file (syntax, paths and callable names)
    Validate {
        /// Path to the rule file
        #[arg(short, long)]
        rules: PathBuf,
    },

    /// Show how each rule will be applied
    Explain {
        /// Path to the rule file
        #[arg(short, long)]
        rules: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(io::stderr)
            .init();
    }

    match cli.command {
        Commands::Project {
            rules,
            input,
            thin,
            fat,
            pretty,
        } => {
            let mode = mode_override(thin, fat);
            if let Err(e) = run_project(&rules, input.as_deref(), mode, pretty) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { rules } => {
            if let Err(e) = validate_rules(&rules) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Rules are valid");
        }
        Commands::Explain { rules } => {
            if let Err(e) = explain_rules(&rules) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn mode_override(thin: bool, fat: bool) -> Option<bool> {
    match (thin, fat) {
        (true, _) => Some(false),
        (_, true) => Some(true),
        _ => None,
    }
}

fn load_document(path: &Path) -> Result<RuleDocument, Box<dyn std::error::Error>> {
    let src = fs::read_to_string(path)?;
    Ok(parse_rule_document(&src)?)
}

fn read_input(input: Option<&Path>) -> Result<Value, Box<dyn std::error::Error>> {
    let text = match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

/// Defaults < environment < rule file.
fn resolve_config(doc: &RuleDocument) -> ProjectorConfig {
    let mut config = ProjectorConfig::from_env();
    if let Some(doc_config) = &doc.config {
        doc_config.apply_to(&mut config);
    }
    config
}

fn run_project(
    rules_path: &Path,
    input: Option<&Path>,
    mode: Option<bool>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(rules_path)?;
    let mut set = doc.bind(&Registry::with_builtins())?;
    if mode.is_some() {
        set.fat = mode;
    }

    let projector = Projector::new(resolve_config(&doc))?;
    let source = read_input(input)?;
    let output = projector.apply(&source, &set)?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}

fn validate_rules(rules_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(rules_path)?;
    doc.bind(&Registry::with_builtins())?;
    Projector::new(resolve_config(&doc))?;
    Ok(())
}

fn explain_rules(rules_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(rules_path)?;
    let set = doc.bind(&Registry::with_builtins())?;
    let config = resolve_config(&doc);

    println!("=== Projection Plan ===");
    println!();
    println!(
        "Mode: {}",
        if set.fat.unwrap_or(config.fat) {
            "fat (copy input, overlay rules)"
        } else {
            "thin (rule-touched fields only)"
        }
    );
    println!("Rules: {}", set.len());
    println!();
    for (i, rule) in set.rules.iter().enumerate() {
        println!("  {}. {} -> {}", i + 1, rule.origin, rule.destination());
        if let Some(kind) = rule.kind {
            println!("     type: {}", kind);
        }
        if let Some(default) = &rule.default {
            println!("     default: {}", default);
        }
        if rule.single {
            println!("     single: first value only");
        }
        if let Some(shared) = overlap_prefix(rule)? {
            println!("     re-anchored per node under `{}`", shared);
        }
    }

    Ok(())
}
