//! Command-line driver: replay clicks on a level and render its sprites

use std::cell::Cell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use ndarray::Array2;

use crate::autotile::matcher::{PatternMatcher, SpriteCoordinate};
use crate::autotile::reference::PngPatternSource;
use crate::game::state::{ActionOutcome, GameGridState, GameStatus};
use crate::game::tile::Position;
use crate::io::error::{GameError, Result};
use crate::io::image::{export_sprites_as_png, load_sprite_sheet};
use crate::io::level::Level;
use crate::io::scores::HighScores;

#[derive(Parser)]
#[command(name = "tilemaze")]
#[command(
    author,
    version,
    about = "Replay a tile-reveal maze level and resolve its autotile sprites"
)]
/// Command-line arguments for the level runner
pub struct Cli {
    /// Level JSON file to play
    #[arg(value_name = "LEVEL")]
    pub level: PathBuf,

    /// Reference pattern sheet used to resolve sprites
    #[arg(short, long, value_name = "PNG")]
    pub pattern: PathBuf,

    /// Tiles to click in order, as `row,col`
    #[arg(short, long, value_name = "ROW,COL", value_parser = parse_position, num_args = 1..)]
    pub actions: Vec<Position>,

    /// Fight battles instead of fleeing them
    #[arg(short, long)]
    pub fight: bool,

    /// Uncover the whole level before rendering
    #[arg(short, long)]
    pub reveal_all: bool,

    /// Decorative sprite sheet to cut rendered tiles from
    #[arg(short, long, value_name = "PNG", requires = "output")]
    pub sprites: Option<PathBuf>,

    /// Write the rendered level to this PNG
    #[arg(short, long, value_name = "PNG", requires = "sprites")]
    pub output: Option<PathBuf>,

    /// High-score file to record a won run in
    #[arg(long, value_name = "JSON")]
    pub scores: Option<PathBuf>,

    /// Player name stored with the score
    #[arg(long, default_value = "player")]
    pub pseudo: String,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

/// Parse a `row,col` pair
///
/// # Errors
///
/// Returns a message if the text is not two comma-separated integers
pub fn parse_position(text: &str) -> std::result::Result<Position, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got '{text}'"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    Ok(Position::new(row, col))
}

/// Install the log subscriber at the requested level
pub fn init_logging(level: log::LevelFilter) {
    use tracing_subscriber::filter::LevelFilter;

    let max_level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };

    if tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        log::debug!("Log subscriber already installed");
    }
}

/// Runs one level according to the CLI arguments
pub struct Session {
    cli: Cli,
}

impl Session {
    /// Create a session from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the level, replay clicks, resolve sprites and write the outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The level cannot be read or is invalid
    /// - A click lies outside the grid
    /// - The sprite sheet or output image cannot be read or written
    /// - The score file cannot be read or written
    pub fn run(&self) -> Result<()> {
        let level = Level::from_file(&self.cli.level)?;
        let mut state = GameGridState::from_level(&level)?;

        for &position in &self.cli.actions {
            let outcome = state.click(position)?;
            log_outcome(position, &outcome);

            if state.combat().is_active() {
                if self.cli.fight {
                    if let Some(result) = state.fight() {
                        log::info!("Battle at ({}, {}): {result:?}", position.row, position.col);
                    }
                } else {
                    state.flee();
                }
            }
        }

        // Snapshot the score before the preview reveal inflates the tile count
        let earned = (state.status() == GameStatus::Victory).then(|| state.score(&self.cli.pseudo));

        if self.cli.reveal_all {
            state.reveal_all();
        }

        let sprites = self.resolve_sprites(&state);
        write_report(&state, &sprites)?;

        if let (Some(sheet_path), Some(output)) = (&self.cli.sprites, &self.cli.output) {
            let sheet = load_sprite_sheet(sheet_path)?;
            export_sprites_as_png(&sprites, &sheet, output)?;
        }

        if let (Some(path), Some(entry)) = (&self.cli.scores, earned) {
            let mut scores = HighScores::load(path)?;
            match scores.record(entry) {
                Some(rank) => log::info!("New high score at rank {}", rank + 1),
                None => log::info!("Score did not make the high-score list"),
            }
            scores.save(path)?;
        }

        Ok(())
    }

    // First pass serves estimates; once the queued lookups land the grid is
    // drawn again with the precise sprites.
    fn resolve_sprites(&self, state: &GameGridState) -> Array2<Option<SpriteCoordinate>> {
        let mut matcher = PatternMatcher::new(PngPatternSource::new(&self.cli.pattern));
        let redraw = Rc::new(Cell::new(false));
        let flag = Rc::clone(&redraw);
        matcher.on_resolved(move |_, _| flag.set(true));

        let estimated = state.render_sprites(&mut matcher);
        let resolved = matcher.run_pending();
        log::debug!("{resolved} sprite patterns resolved precisely");

        if redraw.get() {
            state.render_sprites(&mut matcher)
        } else {
            estimated
        }
    }
}

fn log_outcome(position: Position, outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Interacted {
            moved, interaction, ..
        } => {
            log::info!(
                "Click ({}, {}): moved={moved} battle={}",
                position.row,
                position.col,
                interaction.triggers_battle
            );
        }
        other => log::info!("Click ({}, {}): {other:?}", position.row, position.col),
    }
}

fn write_report(state: &GameGridState, sprites: &Array2<Option<SpriteCoordinate>>) -> Result<()> {
    let stdout_error = |e: std::io::Error| GameError::FileSystem {
        path: PathBuf::from("<stdout>"),
        operation: "write report",
        source: e,
    };
    let mut out = std::io::stdout().lock();

    for ((row, col), sprite) in sprites.indexed_iter() {
        if col == 0 && row > 0 {
            writeln!(out).map_err(stdout_error)?;
        }
        let position = Position::new(row, col);
        let code = match state.grid().get(position) {
            Some(_) if position == state.player() => '@',
            Some(tile) if tile.revealed => tile.category.code(),
            _ => '.',
        };
        let written = match sprite {
            Some(coordinate) => write!(out, "{code}{:>3},{:<2}", coordinate.x, coordinate.y),
            None => write!(out, "{code}      "),
        };
        written.map_err(stdout_error)?;
    }
    writeln!(out).map_err(stdout_error)?;

    writeln!(
        out,
        "status={:?} moves={} revealed={}",
        state.status(),
        state.moves(),
        state.tiles_revealed()
    )
    .map_err(stdout_error)
}
