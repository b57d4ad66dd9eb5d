//! Command-line interface of the `mazegrid` binary.
//!
//! The binary only parses arguments and hands them to [`run`], so every subcommand can be driven
//! from tests with an in-memory writer.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{OptionExt as _, Result, WrapErr as _};

use crate::{
    config::GenerationConfig,
    coordinates::{GridCoord, WorldPosition},
    generators::Algorithm,
    grid::MazeGrid,
    pathfinding::Pathfinder,
};

/// Generate seeded mazes and query shortest paths through them.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a maze and print it.
    Generate {
        /// Maze to generate.
        #[command(flatten)]
        maze: MazeArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Labmap)]
        format: OutputFormat,
    },
    /// Generate a maze and print a shortest path through it.
    Path(PathArgs),
}

/// Output encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Digit grid, one row per line: `2` wall, `3` floor, `1` start, `4` end.
    Labmap,
    /// Pretty-printed JSON.
    Json,
}

/// Options describing the maze to generate.
#[derive(Debug, Default, Args)]
pub struct MazeArgs {
    /// JSON file holding a generation config; the flags below override its fields.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Random seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Grid width in cells.
    #[arg(long)]
    pub width: Option<u32>,
    /// Grid height in cells.
    #[arg(long)]
    pub height: Option<u32>,
    /// Carving algorithm.
    #[arg(long, value_enum)]
    pub algorithm: Option<Algorithm>,
    /// Edge length of a cell in world units.
    #[arg(long)]
    pub cell_size: Option<f32>,
    /// Wall height in world units.
    #[arg(long)]
    pub wall_height: Option<f32>,
}

impl MazeArgs {
    /// Builds the generation config: the config file (or the defaults) with the flags applied.
    ///
    /// # Errors
    ///
    /// Fails if the config file cannot be read or is not a valid JSON config.
    pub fn resolve(&self) -> Result<GenerationConfig> {
        let mut config: GenerationConfig = match &self.config {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
                serde_json::from_str(&contents)
                    .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?
            }
            None => GenerationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(wall_height) = self.wall_height {
            config.wall_height = wall_height;
        }

        Ok(config)
    }
}

/// Arguments of the `path` subcommand.
#[derive(Debug, Args)]
pub struct PathArgs {
    /// Maze to search.
    #[command(flatten)]
    pub maze: MazeArgs,
    /// Start cell as `x,y`.
    #[arg(
        long,
        value_name = "X,Y",
        required_unless_present = "from_world",
        conflicts_with = "from_world"
    )]
    pub from: Option<GridCoord>,
    /// Start position in world units as `x,y[,z]`; walls snap to the nearest floor cell.
    #[arg(long, value_name = "X,Y[,Z]", allow_hyphen_values = true)]
    pub from_world: Option<WorldPosition>,
    /// End cell as `x,y`.
    #[arg(long, value_name = "X,Y")]
    pub to: GridCoord,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Runs a parsed command line, writing its output to stdout.
///
/// # Errors
///
/// Fails on an invalid config, a failed path query or an I/O error on stdout.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut output = stdout.lock();
    execute(cli.command, &mut output)?;
    output.flush()?;

    Ok(())
}

/// Runs `command`, writing its output to `output`.
fn execute<W: Write>(command: Command, output: &mut W) -> Result<()> {
    match command {
        Command::Generate { maze, format } => generate(&maze, format, output),
        Command::Path(args) => path(&args, output),
    }
}

/// Handler of the `generate` subcommand.
fn generate<W: Write>(args: &MazeArgs, format: OutputFormat, output: &mut W) -> Result<()> {
    let grid = MazeGrid::generate(args.resolve()?)?;

    match format {
        OutputFormat::Labmap => write!(output, "{}", grid.to_labmap(None, None))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *output, &grid)?;
            writeln!(output)?;
        }
    }

    Ok(())
}

/// Handler of the `path` subcommand.
fn path<W: Write>(args: &PathArgs, output: &mut W) -> Result<()> {
    let grid = MazeGrid::generate(args.maze.resolve()?)?;
    let mut pathfinder = Pathfinder::new();
    pathfinder.initialize_from_grid(&grid)?;

    let result = if let Some(from) = args.from {
        pathfinder.find_path(from, args.to)
    } else {
        let from_world = args
            .from_world
            .ok_or_eyre("either --from or --from-world is required")?;
        pathfinder.find_path_from_world(from_world, args.to)
    }
    .wrap_err("path query failed")?;

    match args.format {
        OutputFormat::Labmap => write!(
            output,
            "{}",
            grid.to_labmap(result.path.first().copied(), result.path.last().copied())
        )?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *output, &result)?;
            writeln!(output)?;
        }
    }

    Ok(())
}
