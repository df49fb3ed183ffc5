use clap::{Parser, Subcommand};
use fitplan_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

mod serve;

#[derive(Parser)]
#[command(name = "fitplan")]
#[command(about = "Personalized multi-week workout plan generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a 12-session plan and print it
    Generate {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        gender: String,

        /// muscle_gain, fat_loss, strength, endurance, general_fitness
        #[arg(long)]
        goal: String,

        /// beginner, intermediate, advanced
        #[arg(long)]
        experience: String,

        /// Comma-separated equipment tags (default from config)
        #[arg(long, value_delimiter = ',')]
        equipment: Option<Vec<String>>,

        /// Training days per week (default from config)
        #[arg(long)]
        days_per_week: Option<u32>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// Seed exercise selection for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Serve the HTTP API
    Serve {
        /// Bind address (default from config)
        #[arg(long)]
        bind: Option<String>,

        /// Port (default from config, or PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List catalog exercises
    Catalog {
        /// warmup, main, cooldown
        #[arg(long)]
        phase: Option<String>,

        /// Only exercises usable with this comma-separated equipment
        #[arg(long, value_delimiter = ',')]
        equipment: Option<Vec<String>>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // init-config must work before any config file exists
    let config = match (&cli.command, &cli.config) {
        (Commands::InitConfig { .. }, _) => Config::default(),
        (_, Some(path)) => Config::load_from(path)?,
        (_, None) => Config::load()?,
    }
    .with_env_overrides();

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    logging::init_with_level(level);

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Commands::Generate {
            name,
            age,
            gender,
            goal,
            experience,
            equipment,
            days_per_week,
            json,
            seed,
        } => {
            let request = ProfileRequest {
                name: Some(name),
                age: Some(age),
                gender: Some(gender),
                goal: Some(Goal::from(goal)),
                experience: Some(experience.parse()?),
                equipment,
                days_per_week,
            };
            cmd_generate(catalog, request, &config, json, seed)
        }
        Commands::Serve { bind, port } => cmd_serve(config, bind, port),
        Commands::Catalog { phase, equipment } => cmd_catalog(catalog, phase, equipment),
        Commands::InitConfig { force } => cmd_init_config(cli.config, force),
    }
}

fn cmd_generate(
    catalog: &Catalog,
    request: ProfileRequest,
    config: &Config,
    json: bool,
    seed: Option<u64>,
) -> Result<()> {
    let profile = request.into_profile(&config.defaults)?;

    let plan = match seed {
        Some(seed) => generate_plan_from(
            catalog,
            &profile,
            schedule::today(),
            &mut StdRng::seed_from_u64(seed),
        )?,
        None => generate_plan(catalog, &profile)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_plan(&plan);
    }
    Ok(())
}

fn cmd_serve(config: Config, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let port = port.unwrap_or(config.server.port);

    let state = serve::AppState::new(config.defaults);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve::run_serve(state, &bind, port))
}

fn cmd_catalog(
    catalog: &Catalog,
    phase: Option<String>,
    equipment: Option<Vec<String>>,
) -> Result<()> {
    let query = ExerciseQuery {
        phase: phase.as_deref().map(str::parse).transpose()?,
        equipment: equipment.as_deref(),
        muscle_groups: None,
    };

    let exercises = catalog.query(&query);
    if exercises.is_empty() {
        println!("No exercises match.");
        return Ok(());
    }

    for exercise in exercises {
        println!(
            "{:<26} {:<9} {:<14} {:<22} [{}]",
            exercise.name,
            format!("{:?}", exercise.phase),
            format!("{:?}", exercise.muscle_group),
            prescription_text(
                exercise.sets,
                exercise.reps,
                exercise.duration,
                exercise.rest
            ),
            exercise.equipment.join(", ")
        );
    }
    Ok(())
}

fn cmd_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

// ============================================================================
// Text rendering
// ============================================================================

fn prescription_text(
    sets: Option<u32>,
    reps: Option<u32>,
    duration: Option<TimeSpan>,
    rest: Option<TimeSpan>,
) -> String {
    let mut text = match (sets, reps, duration) {
        (Some(sets), Some(reps), _) => format!("{} sets x {} reps", sets, reps),
        (Some(sets), None, Some(duration)) => format!("{} sets x {}", sets, duration),
        (None, Some(reps), _) => format!("{} reps", reps),
        (None, None, Some(duration)) => duration.to_string(),
        _ => String::new(),
    };
    if let Some(rest) = rest {
        text.push_str(&format!(", rest: {}", rest));
    }
    text
}

fn exercise_line(exercise: &SessionExercise) -> String {
    format!(
        "{} - {}",
        exercise.name,
        prescription_text(exercise.sets, exercise.reps, exercise.duration, exercise.rest)
    )
}

fn display_plan(plan: &Plan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PERSONALIZED WORKOUT PLAN");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Name: {}", plan.user.name);
    println!("  Age: {}", plan.user.age);
    println!("  Gender: {}", plan.user.gender);
    println!("  Goal: {}", plan.user.goal.display_name());
    println!("  Experience Level: {}", plan.user.experience.display_name());
    println!("  Available Equipment: {}", plan.user.equipment.join(", "));
    println!("  Workout Split: {}", plan.workout_split.display_name());
    println!("  Plan ID: {}", plan.id);

    for session in &plan.sessions {
        println!();
        println!(
            "Session {} - {}",
            session.session_number,
            schedule::format_date(session.date)
        );
        println!(
            "  Focus: {} (Primary), {} (Secondary)",
            session.focus.primary.display_name(),
            session.focus.secondary.display_name()
        );

        let sections = &session.sections;
        println!("  Warm-Up:");
        for exercise in &sections.warmup {
            println!("    • {}", exercise_line(exercise));
        }

        println!("  Main Exercises:");
        for exercise in &sections.main {
            println!("    • {}", exercise_line(exercise));
        }

        if let Some(circuit) = &sections.circuit {
            println!("  Circuit Training:");
            println!(
                "    Perform {} rounds with {} rest between exercises and {} rest between rounds.",
                circuit.rounds, circuit.rest_between_exercises, circuit.rest_between_rounds
            );
            for exercise in &circuit.exercises {
                println!("    • {} - {} reps or {}", exercise.name, exercise.reps, exercise.time);
            }
        }

        if let Some(supersets) = &sections.superset {
            println!("  Supersets:");
            for superset in supersets {
                println!("    • {} - {} rounds", superset.name, superset.rounds);
                for (i, exercise) in superset.exercises.iter().enumerate() {
                    println!("      {}. {}", i + 1, exercise_line(exercise));
                }
            }
        }

        println!("  Cool-Down:");
        for exercise in &sections.cooldown {
            println!("    • {}", exercise_line(exercise));
        }
    }
    println!();
}
