// ABOUTME: Command-line front end for intake adaptation and plan generation
// ABOUTME: Reads intake JSON, prints the adapted profile or the generated plan bundle as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # Adapt a loose intake record into a validated profile
//! coachplan adapt --intake intake.json
//!
//! # Generate a reproducible plan starting on a fixed date
//! coachplan generate --intake intake.json --seed 42 --start 2025-03-03
//!
//! # Generate from an already validated profile
//! coachplan generate --intake profile.json --profile --weeks 8 --budget 120
//!
//! # Print the effective engine configuration
//! coachplan config
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use coachplan::config::EngineConfig;
use coachplan::errors::ErrorResponse;
use coachplan::intake::keywords::{lookup, DIET_KEYWORDS};
use coachplan::logging::{LoggingConfig, PlanLogger};
use coachplan::models::{Equipment, IntakeProfile};
use coachplan::{GenerationOptions, IntakeAdapter, IntakeRecord, PlanError, PlanOrchestrator};
use serde_json::json;
use tracing::debug;

/// Exit status for expected hard stops (blocked or infeasible)
const EXIT_HARD_STOP: u8 = 2;

#[derive(Parser)]
#[command(
    name = "coachplan",
    version,
    about = "Deterministic 14-day training and nutrition plan generator",
    long_about = "Generate a periodized training program, daily meal plans, supplementary sessions and a grocery list from a client intake."
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a loose intake record into a validated profile
    Adapt {
        /// Intake record JSON file
        #[arg(long)]
        intake: PathBuf,
    },

    /// Generate a plan bundle
    Generate {
        /// Intake record JSON file (or profile JSON with --profile)
        #[arg(long)]
        intake: PathBuf,

        /// Treat the input file as a validated profile instead of an intake record
        #[arg(long)]
        profile: bool,

        /// Program length in weeks (4-52)
        #[arg(long, default_value = "12")]
        weeks: u32,

        /// Seed for identifiers and food rotation
        #[arg(long)]
        seed: Option<u64>,

        /// First plan day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Dietary pattern overriding the intake (omnivore, vegetarian, vegan, pescatarian)
        #[arg(long)]
        diet: Option<String>,

        /// Available equipment (comma-separated, e.g. "dumbbell,bodyweight")
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,

        /// Weekly grocery budget
        #[arg(long)]
        budget: Option<f64>,

        /// Skip the safety gate (supervised settings only)
        #[arg(long)]
        skip_safety: bool,
    },

    /// Print the effective engine configuration
    Config,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let logging = if args.verbose {
        LoggingConfig::from_env().with_level("debug")
    } else {
        LoggingConfig::from_env()
    };
    if let Err(e) = logging.init() {
        eprintln!("logging disabled: {e}");
    }

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Adapt { intake } => {
            let record: IntakeRecord = read_json(&intake)?;
            let (profile, warnings) = IntakeAdapter::new().adapt(&record)?;
            PlanLogger::log_intake_adapted(warnings.len());
            print_json(&json!({ "profile": profile, "warnings": warnings }))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            intake,
            profile,
            weeks,
            seed,
            start,
            diet,
            equipment,
            budget,
            skip_safety,
        } => {
            let mut warnings = Vec::new();
            let profile = if profile {
                read_json::<IntakeProfile>(&intake)?
            } else {
                let record: IntakeRecord = read_json(&intake)?;
                let (profile, intake_warnings) = IntakeAdapter::new().adapt(&record)?;
                warnings.extend(intake_warnings);
                profile
            };

            let options = GenerationOptions {
                duration_weeks: weeks,
                equipment: parse_equipment(&equipment)?,
                dietary_mode: diet
                    .as_deref()
                    .map(|d| lookup(DIET_KEYWORDS, d).ok_or_else(|| anyhow!("unknown diet: {d}")))
                    .transpose()?,
                budget_ceiling_per_week: budget,
                seed,
                skip_safety,
                reference_time: start
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| Utc.from_utc_datetime(&naive)),
            };
            generate(&profile, &options, warnings)
        }
        Command::Config => {
            let config = EngineConfig::load()?;
            print_json(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn generate(
    profile: &IntakeProfile,
    options: &GenerationOptions,
    mut warnings: Vec<String>,
) -> Result<ExitCode> {
    let config = EngineConfig::load()?;
    let orchestrator = PlanOrchestrator::new(config);
    let started = Instant::now();

    match orchestrator.generate(profile, options) {
        Ok((bundle, plan_warnings)) => {
            warnings.extend(plan_warnings);
            PlanLogger::log_plan_generated(
                &bundle.plan_id.to_string(),
                bundle.goal.label(),
                warnings.len(),
                u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            );
            print_json(&json!({ "plan": bundle, "warnings": warnings }))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) if error.is_hard_stop() => {
            report_rejection(&error)?;
            Ok(ExitCode::from(EXIT_HARD_STOP))
        }
        Err(error) => {
            report_rejection(&error)?;
            Err(error.into())
        }
    }
}

fn report_rejection(error: &PlanError) -> Result<()> {
    let response = ErrorResponse::from(error);
    PlanLogger::log_plan_rejected(&format!("{:?}", response.code), &response.message);
    print_json(&json!({ "error": response }))
}

fn parse_equipment(names: &[String]) -> Result<Vec<Equipment>> {
    if names.is_empty() {
        return Ok(Equipment::FULL_GYM.to_vec());
    }
    names
        .iter()
        .map(|name| {
            let key = name.trim().to_lowercase();
            serde_json::from_value(json!(key)).with_context(|| format!("unknown equipment: {name}"))
        })
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    debug!(path = %path.display(), "reading input");
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
