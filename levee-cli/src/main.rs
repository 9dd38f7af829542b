#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use levee_core::{
    Answers, EngineConfig, HazardKind, InMemoryProfileStore, InMemoryRuleStore,
    InMemoryStrategyStore, LocationRiskProfile, ProfileStore, RiskEngine, RuleSet, RuleStore,
    StrategyCatalog, StrategyStore, VulnerabilityProfile,
};

#[derive(Parser)]
#[command(name = "levee")]
#[command(about = "Disaster-readiness risk assessment for small businesses", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every hazard for a location and business type, then
    /// print ranked mitigation strategies.
    Assess {
        #[arg(long)]
        location: String,
        #[arg(long)]
        business_type: String,
        /// YAML/JSON file with `locations:` and `business_types:` profiles.
        #[arg(long)]
        profiles: PathBuf,
        /// Multiplier rule set file.
        #[arg(long)]
        rules: PathBuf,
        /// Strategy catalog file.
        #[arg(long)]
        strategies: PathBuf,
        /// Characteristic answers file (map of name to bool/number).
        #[arg(long)]
        answers: Option<PathBuf>,
        /// Emit the full assessment as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    Strategies {
        #[command(subcommand)]
        action: StrategiesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// Check a rule set file for malformed rules.
    Validate {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print each rule's condition, factor, and hazards.
    Explain {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum StrategiesAction {
    List {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Match a catalog against an explicit hazard list.
    Match {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(long, value_delimiter = ',')]
        hazards: Vec<String>,
        #[arg(long)]
        business_type: String,
    },
}

#[derive(serde::Deserialize)]
struct ProfileBundle {
    #[serde(default)]
    locations: Vec<LocationRiskProfile>,
    #[serde(default)]
    business_types: Vec<VulnerabilityProfile>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            location,
            business_type,
            profiles,
            rules,
            strategies,
            answers,
            json,
        } => assess(
            &location,
            &business_type,
            &profiles,
            &rules,
            &strategies,
            answers.as_deref(),
            json,
        ),
        Commands::Rules { action } => match action {
            RulesAction::Validate { file } => {
                let content = std::fs::read_to_string(&file)?;
                match RuleSet::from_yaml(&content).and_then(|set| {
                    set.validate()?;
                    Ok(set)
                }) {
                    Ok(set) => {
                        println!("✓ Rule set valid");
                        println!("  Name: {}", set.name);
                        println!("  Rules: {}", set.rules.len());
                    }
                    Err(e) => {
                        eprintln!("✗ Validation failed: {}", e);
                        std::process::exit(1);
                    }
                }
                Ok(())
            }
            RulesAction::Explain { file } => {
                let content = std::fs::read_to_string(&file)?;
                let set = RuleSet::from_yaml(&content)?;
                println!("Rule set: {} ({} rules)", set.name, set.rules.len());
                for (i, rule) in set.rules.iter().enumerate() {
                    let condition = match rule.condition {
                        levee_core::ConditionKind::Boolean => {
                            format!("{} is true", rule.target_characteristic)
                        }
                        levee_core::ConditionKind::Threshold => format!(
                            "{} >= {}",
                            rule.target_characteristic,
                            rule.threshold.unwrap_or(f64::NAN)
                        ),
                        levee_core::ConditionKind::Range => format!(
                            "{} in [{}, {}]",
                            rule.target_characteristic,
                            rule.range_min.unwrap_or(f64::NAN),
                            rule.range_max.unwrap_or(f64::NAN)
                        ),
                    };
                    let hazards: Vec<String> = rule
                        .applicable_hazards
                        .iter()
                        .map(|h| h.to_string())
                        .collect();
                    println!(
                        "  {}. {} [x{}] when {} ({}){}",
                        i + 1,
                        rule.id,
                        rule.factor,
                        condition,
                        hazards.join(", "),
                        if rule.active { "" } else { " [inactive]" }
                    );
                }
                Ok(())
            }
        },
        Commands::Strategies { action } => match action {
            StrategiesAction::List { file } => {
                let content = std::fs::read_to_string(&file)?;
                let catalog = StrategyCatalog::from_yaml(&content)?;
                for s in &catalog.strategies {
                    let hazards: Vec<String> =
                        s.applicable_hazards.iter().map(|h| h.to_string()).collect();
                    println!(
                        "{} [{}] effectiveness {} ({})",
                        s.id,
                        s.tier,
                        s.effectiveness,
                        hazards.join(", ")
                    );
                }
                Ok(())
            }
            StrategiesAction::Match {
                file,
                hazards,
                business_type,
            } => {
                let content = std::fs::read_to_string(&file)?;
                let catalog = StrategyCatalog::from_yaml(&content)?;
                let preselected = hazards
                    .iter()
                    .map(|h| h.parse::<HazardKind>())
                    .collect::<levee_core::Result<_>>()?;
                let ranked =
                    levee_core::match_strategies(&catalog.strategies, &preselected, &business_type);
                if ranked.is_empty() {
                    println!("No matching strategies");
                }
                for (i, s) in ranked.iter().enumerate() {
                    println!("{}. {} [{}] effectiveness {}", i + 1, s.id, s.tier, s.effectiveness);
                }
                Ok(())
            }
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn assess(
    location: &str,
    business_type: &str,
    profiles_path: &Path,
    rules_path: &Path,
    strategies_path: &Path,
    answers_path: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile_store = Arc::new(InMemoryProfileStore::new());
    let bundle: ProfileBundle =
        serde_yaml::from_str(&std::fs::read_to_string(profiles_path)?)?;
    for profile in bundle.locations {
        profile_store.upsert_location(profile)?;
    }
    for profile in bundle.business_types {
        profile_store.upsert_vulnerability(profile)?;
    }

    let rule_store = Arc::new(InMemoryRuleStore::new());
    let set = RuleSet::from_yaml(&std::fs::read_to_string(rules_path)?)?;
    for rule in set.rules {
        rule_store.upsert(rule)?;
    }

    let strategy_store = Arc::new(InMemoryStrategyStore::new());
    let catalog = StrategyCatalog::from_yaml(&std::fs::read_to_string(strategies_path)?)?;
    for strategy in catalog.strategies {
        strategy_store.upsert(strategy)?;
    }

    let answers: Answers = match answers_path {
        Some(path) => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
        None => Answers::new(),
    };

    let engine = RiskEngine::new(
        profile_store,
        rule_store,
        strategy_store,
        EngineConfig::default(),
    )?;
    let assessment = engine.compute_risk_profile(location, business_type, &answers)?;
    let ranked = engine.recommend_strategies(&assessment)?;

    if json {
        #[derive(serde::Serialize)]
        struct Output<'a> {
            assessment: &'a levee_core::Assessment,
            strategies: &'a [levee_core::Strategy],
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&Output {
                assessment: &assessment,
                strategies: &ranked,
            })?
        );
        return Ok(());
    }

    println!(
        "Assessment {} — location {} / business type {}",
        assessment.id, assessment.location_id, assessment.business_type_id
    );
    println!(
        "{:<16} {:>8} {:>8} {:>6} {:>6}  {:<8} {}",
        "hazard", "exposure", "vuln", "base", "final", "band", "preselected"
    );
    for r in &assessment.results {
        println!(
            "{:<16} {:>8.1} {:>8.1} {:>6.2} {:>6.2}  {:<8} {}",
            r.hazard.to_string(),
            r.location_risk,
            r.vulnerability,
            r.base_score,
            r.final_score,
            r.band.to_string(),
            if r.preselected { "yes" } else { "" }
        );
        for m in &r.applied_multipliers {
            println!("{:<16}   applied {} (x{})", "", m.rule_id, m.factor);
        }
    }

    if !assessment.diagnostics.is_empty() {
        println!("\nSkipped rules:");
        for d in &assessment.diagnostics {
            println!("  {}: {}", d.rule_id, d.reason);
        }
    }

    println!("\nRecommended strategies:");
    if ranked.is_empty() {
        println!("  (none — no hazard was preselected)");
    }
    for (i, s) in ranked.iter().enumerate() {
        println!(
            "  {}. {} [{}] effectiveness {}",
            i + 1,
            s.name,
            s.tier,
            s.effectiveness
        );
    }
    Ok(())
}
