#![warn(clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use cubist::{
    CubeState, MoveSequence,
    config::Config,
    moves::{LINE_LENGTH, MOVES_PER_LINE},
    cube::FACELETS,
    scramble::generate_pattern_scramble,
    solver::{CancelToken, IdaStarSolver},
    validate::{facelet_report, validate_cube_state},
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};

#[derive(Parser)]
#[command(version, about = "Scramble, validate and solve the 3x3x3 cube")]
struct Cli {
    /// The configuration file to use, in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate WCA-style random-move scrambles.
    Scramble {
        /// Moves per scramble, defaults to the configured length.
        #[arg(long, short)]
        length: Option<usize>,
        /// Seed for reproducible scrambles.
        #[arg(long, short)]
        seed: Option<u64>,
        /// How many scrambles to generate.
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },
    /// Print the moves that produce a named pattern, e.g. `superflip`.
    Pattern { name: String },
    /// Solve the state reached by applying a sequence to the solved cube.
    Solve {
        /// The scramble to undo, e.g. "R U R' U'".
        #[arg(required_unless_present = "facelets")]
        sequence: Option<String>,
        /// A 54-character `URFDLB` face-letter string instead of a sequence.
        #[arg(long, conflicts_with = "sequence")]
        facelets: Option<String>,
    },
    /// Check whether a facelet array describes a reachable cube.
    Validate {
        /// Either 54 face letters or 54 whitespace separated colours.
        #[arg(required = true, num_args = 1..)]
        facelets: Vec<String>,
    },
    /// Merge adjacent turns of the same face.
    Simplify { sequence: String },
    /// Print the sequence that undoes a sequence.
    Invert { sequence: String },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Scramble {
            length,
            seed,
            count,
        } => {
            let mut scramble_config = config.scramble.clone();
            if let Some(length) = length {
                scramble_config = scramble_config.with_length(length);
            }
            if let Some(seed) = seed {
                scramble_config = scramble_config.with_seed(seed);
            }
            let scrambles = scramble_config
                .generator()
                .generate_session(count, scramble_config.length);
            for scramble in scrambles {
                println!("{scramble}");
            }
        }
        Commands::Pattern { name } => {
            println!("{}", generate_pattern_scramble(&name)?);
        }
        Commands::Solve {
            sequence,
            facelets,
        } => {
            let state = match (sequence, facelets) {
                (_, Some(facelets)) => CubeState::from_facelet_string(&facelets)?,
                (Some(sequence), None) => {
                    CubeState::solved().apply_sequence(&sequence.parse::<MoveSequence>()?)
                }
                (None, None) => return Err(eyre!("Expected a sequence or --facelets")),
            };
            if let Err(errors) = validate_cube_state(&state).into_result() {
                return Err(eyre!(
                    "The cube cannot be solved: {}",
                    errors.iter().join("; ")
                ));
            }
            let solver = IdaStarSolver::new(config.solver.clone());
            let solution = solver.solve_with(&state, &CancelToken::new(), |progress| {
                info!(
                    "Depth {} with bound {}, {} nodes so far",
                    progress.depth, progress.current_bound, progress.nodes_expanded
                );
            })?;
            println!("{}", solution.moves);
            println!(
                "{} moves found by {} in {:.3}s ({:.1} moves/s)",
                solution.stats.move_count,
                solution.stats.solver_name,
                solution.stats.elapsed.as_secs_f64(),
                solution.stats.moves_per_second
            );
        }
        Commands::Validate { facelets } => {
            let facelets = match facelets.as_slice() {
                [letters] if letters.chars().count() == FACELETS => {
                    letters.chars().map(String::from).collect_vec()
                }
                _ => facelets,
            };
            let report = facelet_report(&facelets);
            if report.validation.is_valid() {
                println!("valid");
                return Ok(());
            }
            for error in &report.validation.errors {
                println!("{error}");
            }
            println!(
                "problematic stickers: {}",
                report.problematic_stickers.iter().join(" ")
            );
            return Err(eyre!("The facelets do not describe a reachable cube"));
        }
        Commands::Simplify { sequence } => {
            let sequence = sequence.parse::<MoveSequence>()?;
            let efficiency = sequence.efficiency();
            info!(
                "{} moves simplify to {}, efficiency {:.2}",
                efficiency.total_moves, efficiency.simplified_moves, efficiency.efficiency_score
            );
            for face in efficiency.heavy_faces {
                info!(
                    "High frequency of {face} moves ({})",
                    efficiency.move_distribution.count_for(face)
                );
            }
            println!("{}", sequence.simplify().format_lines(LINE_LENGTH, MOVES_PER_LINE));
        }
        Commands::Invert { sequence } => {
            println!("{}", sequence.parse::<MoveSequence>()?.inverse());
        }
    }

    Ok(())
}
