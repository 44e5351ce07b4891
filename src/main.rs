use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tsx_palette::tileset::{LoadOptions, TileDefinition, TilesetDescriptor};
use tsx_palette::{check_images, AssetManager, FileProtocol, TextureLoader, TsxLoader};

/// Inspects Tiled tileset (.tsx) files.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// YAML file with load options (duplicate_ids, invalid_tiles).
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists every tile.
    List { file: String },
    /// Shows a single tile.
    Lookup { file: String, id: u32 },
    /// Lists tiles with a semantic type.
    Type { file: String, tile_type: String },
    /// Verifies every tile image exists and matches its declared size.
    Check { file: String },
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    #[cfg(feature = "profile")]
    let _guard = init_profiling();

    let cli = Cli::parse();
    let options = match &cli.options {
        Some(path) => LoadOptions::from_file(path)
            .with_context(|| format!("Failed to read options from {}", path.display()))?,
        None => LoadOptions::default(),
    };
    let manager = AssetManager::builder()
        .default_protocol(FileProtocol)
        .loader(TsxLoader::new(options))
        .loader(TextureLoader)
        .build()?;

    match cli.command {
        Command::List { file } => {
            let tileset = load(&manager, &file)?;
            println!(
                "{} ({} tiles, grid {}x{})",
                tileset.name, tileset.len(), tileset.tile_width, tileset.tile_height,
            );
            for tile in tileset.tiles() {
                print_tile(tile);
            }
            for skipped in tileset.skipped() {
                println!("skipped tile #{} (line {}): {}", skipped.position, skipped.line, skipped.error);
            }
        },
        Command::Lookup { file, id } => {
            let tileset = load(&manager, &file)?;
            match tileset.lookup(id) {
                Some(tile) => print_tile(tile),
                None => println!("No tile with id {id} in {}", tileset.name),
            }
        },
        Command::Type { file, tile_type } => {
            let tileset = load(&manager, &file)?;
            for tile in tileset.tiles_of_type(&tile_type) {
                print_tile(tile);
            }
        },
        Command::Check { file } => {
            let tileset = load(&manager, &file)?;
            let checks = check_images(&tileset, &manager);
            let failures = checks.iter().filter(|check| !check.is_ok()).count();
            for check in &checks {
                println!("{:>4}  {}  {}", check.id, check.path, check.status);
            }
            if failures > 0 {
                println!("{failures} of {} images failed", checks.len());
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn load(manager: &AssetManager, file: &str) -> anyhow::Result<TilesetDescriptor> {
    manager
        .load::<TilesetDescriptor>(file)
        .with_context(|| format!("Failed to load tileset {file}"))
}

fn print_tile(tile: &TileDefinition) {
    println!(
        "{:>4}  {:<12} {:>4}x{:<4} {}",
        tile.id,
        tile.tile_type().unwrap_or("-"),
        tile.image.width,
        tile.image.height,
        tile.image.source,
    );
}

#[cfg(feature = "profile")]
fn init_profiling() -> tracing_chrome::FlushGuard {
    use tracing_subscriber::prelude::*;
    let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new().build();
    tracing_subscriber::registry().with(chrome_layer).init();
    guard
}
