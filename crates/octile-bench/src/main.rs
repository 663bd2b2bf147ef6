//! `octile`: solve or cross-check benchmark scenarios on an octile map.
//!
//! ```bash
//! # Solve every scenario with A*
//! octile maps/arena.map scenarios/arena.map.scen
//!
//! # Check RBFS against A*, printing only disagreements and the tally
//! octile maps/arena.map scenarios/arena.map.scen --compare rbfs
//!
//! # Trace every expansion
//! RUST_LOG=trace octile maps/arena.map scenarios/arena.map.scen -a peastar
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use crossterm::style::Color;
use log::info;
use octile_bench::{Planner, display};
use octile_core::TerrainMap;
use octile_search::{AStar, Connectivity, Heuristic, PathFinder, PeaStar, Rbfs, Report, SearchConfig};

/// Solve or cross-check benchmark scenarios on an octile map.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Octile map file
    map: PathBuf,

    /// Scenario file for the map (version 0 or 1)
    scenario: PathBuf,

    /// Search engine to run
    #[arg(short, long, value_enum, default_value_t = Algorithm::Astar)]
    algorithm: Algorithm,

    /// Heuristic preset; chebyshev is the admissible one for unit weights
    #[arg(long, value_enum, default_value_t = HeuristicArg::Chebyshev)]
    heuristic: HeuristicArg,

    /// Compare against a second engine instead of printing every solution
    #[arg(short, long, value_enum)]
    compare: Option<Algorithm>,

    /// Restrict moves to the four cardinal directions
    #[arg(long)]
    four_connected: bool,

    /// Print only the final tally
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    Astar,
    Peastar,
    Rbfs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl From<HeuristicArg> for Heuristic {
    fn from(h: HeuristicArg) -> Self {
        match h {
            HeuristicArg::Euclidean => Heuristic::Euclidean,
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Chebyshev => Heuristic::Chebyshev,
        }
    }
}

impl Args {
    fn finder(&self, algorithm: Algorithm) -> Box<dyn PathFinder<TerrainMap>> {
        let connectivity = if self.four_connected {
            Connectivity::Four
        } else {
            Connectivity::Eight
        };
        let config = SearchConfig::new()
            .heuristic(self.heuristic.into())
            .connectivity(connectivity);
        match algorithm {
            Algorithm::Astar => Box::new(AStar::new(config)),
            Algorithm::Peastar => Box::new(PeaStar::new(config)),
            Algorithm::Rbfs => Box::new(Rbfs::new(config)),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let planner = Planner::load(&args.map, &args.scenario)?;
    info!(
        "loaded {}x{} map {} with {} scenarios",
        planner.map().rows(),
        planner.map().columns(),
        args.map.display(),
        planner.scenarios().len()
    );

    let mut stdout = io::stdout().lock();
    let mut primary = args.finder(args.algorithm);
    let mut output: io::Result<()> = Ok(());

    match args.compare {
        Some(other) => {
            let mut candidate = args.finder(other);
            let (reference_name, candidate_name) = (primary.name(), candidate.name());
            let comparison =
                planner.compare(primary.as_mut(), candidate.as_mut(), |_, expected, actual| {
                    if output.is_ok() && !args.quiet {
                        output = write_mismatch(
                            &mut stdout,
                            planner.map(),
                            (reference_name, expected),
                            (candidate_name, actual),
                        );
                    }
                });
            output?;
            display::write_comparison(&mut stdout, reference_name, candidate_name, &comparison)?;
        }
        None => {
            let summary = planner.plan_all(primary.as_mut(), |_, report| {
                if output.is_ok() && !args.quiet {
                    output = display::write_report(&mut stdout, report)
                        .and_then(|()| display::write_map(&mut stdout, planner.map(), report));
                }
            });
            output?;
            display::write_summary(&mut stdout, primary.name(), &summary)?;
        }
    }
    Ok(())
}

fn write_mismatch<W: Write>(
    out: &mut W,
    map: &TerrainMap,
    (reference, expected): (&str, &Report),
    (candidate, actual): (&str, &Report),
) -> io::Result<()> {
    for (name, report) in [(reference, expected), (candidate, actual)] {
        display::message(out, Color::Red, format_args!("{name} report:\n"))?;
        display::write_report(out, report)?;
        display::write_map(out, map, report)?;
    }
    Ok(())
}
