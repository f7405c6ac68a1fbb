//! Geolabel: georeferenced exports of object-detection annotations.
//!
//! Geolabel reads LabelImg/roLabelImg style XML annotations and writes
//! either a GeoJSON `FeatureCollection` in the geographic space of the
//! matching GeoTIFF, or a flat `.rbox` text file of rotated boxes.
//!
//! # Modules
//!
//! - [`ir`]: Typed geometry (pixel vs geographic coordinates, boxes, rings)
//! - [`georef`]: Affine georeferencing and GeoTIFF geotransform reading
//! - [`annotation`]: XML tree walking and box extraction
//! - [`output`]: GeoJSON and `.rbox` writers
//! - [`convert`]: Per-file pipelines and directory walks
//! - [`split`]: Train/test split of a labels CSV
//! - [`raster_export`]: TIFF to JPEG/PNG export through `gdal_translate`
//! - [`error`]: Error types for geolabel operations

pub mod annotation;
pub mod convert;
pub mod error;
pub mod georef;
pub mod ir;
pub mod output;
pub mod raster_export;
pub mod split;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use annotation::{BoxKind, PolygonOptions};
use convert::WalkReport;
use ir::RingClosure;
use raster_export::ExportFormat;

pub use error::GeolabelError;

/// The geolabel CLI application.
#[derive(Parser)]
#[command(name = "geolabel")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug detail (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert annotation XML + GeoTIFF pairs to GeoJSON.
    Geojson(GeoJsonArgs),
    /// Convert rotated-box annotation XML to .rbox text.
    Rbox(RboxArgs),
    /// Split a labels CSV into train/test files, grouped by filename.
    Split(SplitArgs),
    /// Export every .tif under a directory to JPEG or PNG via gdal_translate.
    Tif2img(Tif2ImgArgs),
}

/// Arguments for the geojson subcommand.
#[derive(clap::Args)]
struct GeoJsonArgs {
    /// File to convert; any extension is stripped and <stem>.tif/<stem>.xml
    /// are read. Without it every .xml under --root with a sibling .tif is
    /// converted.
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Directory to walk when no file is given.
    #[arg(long, env = "GEOLABEL_ROOT", default_value = ".")]
    root: PathBuf,

    /// Box element to read ('bndbox' or 'robndbox').
    #[arg(long, default_value = "bndbox")]
    geometry: String,

    /// Repeat the first vertex at the end of every ring.
    #[arg(long)]
    close_rings: bool,

    /// Rotate robndbox corners by their stored angle.
    #[arg(long)]
    apply_rotation: bool,

    /// Output format for the walk summary ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the rbox subcommand.
#[derive(clap::Args)]
struct RboxArgs {
    /// XML file to convert. Without it every .xml under --root is converted.
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Directory to walk when no file is given.
    #[arg(long, env = "GEOLABEL_ROOT", default_value = ".")]
    root: PathBuf,

    /// Output format for the walk summary ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the split subcommand.
#[derive(clap::Args)]
struct SplitArgs {
    /// Labels CSV with a 'filename' column.
    input: PathBuf,

    /// Share of image groups assigned to training (0.0 to 1.0).
    train_fraction: f64,

    /// Seed for the group shuffle.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Directory receiving train_labels.csv and test_labels.csv.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

/// Arguments for the tif2img subcommand.
#[derive(clap::Args)]
struct Tif2ImgArgs {
    /// Target format: jpeg or png.
    #[arg(short = 'f', long = "format")]
    format: Option<String>,

    /// Directory to walk for .tif files.
    #[arg(long, env = "GEOLABEL_ROOT", default_value = ".")]
    root: PathBuf,

    /// Program used for the export.
    #[arg(long, env = "GEOLABEL_GDAL_TRANSLATE", default_value = raster_export::GDAL_TRANSLATE)]
    gdal_translate: String,

    /// Print the commands instead of running them.
    #[arg(long)]
    dry_run: bool,
}

/// Run the geolabel CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), GeolabelError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Geojson(args)) => run_geojson(args),
        Some(Commands::Rbox(args)) => run_rbox(args),
        Some(Commands::Split(args)) => run_split(args),
        Some(Commands::Tif2img(args)) => run_tif2img(args),
        None => {
            println!("geolabel {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Georeferenced GeoJSON and .rbox exports of annotation XML.");
            println!();
            println!("Run 'geolabel --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}

/// Execute the geojson subcommand.
fn run_geojson(args: GeoJsonArgs) -> Result<(), GeolabelError> {
    let kind = match args.geometry.as_str() {
        "bndbox" => BoxKind::Bndbox,
        "robndbox" => BoxKind::Robndbox,
        other => {
            return Err(GeolabelError::UnsupportedFormat(format!(
                "'{}' (supported: bndbox, robndbox)",
                other
            )));
        }
    };
    let options = PolygonOptions {
        kind,
        closure: if args.close_rings {
            RingClosure::Closed
        } else {
            RingClosure::Open
        },
        apply_rotation: args.apply_rotation,
    };

    match args.file {
        Some(file) => {
            let output = convert::convert_geojson(&file, &options)?;
            println!("Wrote {}", output.display());
            Ok(())
        }
        None => {
            let report = convert::walk_geojson(&args.root, &options)?;
            print_report(&report, &args.output)
        }
    }
}

/// Execute the rbox subcommand.
fn run_rbox(args: RboxArgs) -> Result<(), GeolabelError> {
    match args.file {
        Some(file) => {
            let output = convert::convert_rbox(&file)?;
            println!("Wrote {}", output.display());
            Ok(())
        }
        None => {
            let report = convert::walk_rbox(&args.root)?;
            print_report(&report, &args.output)
        }
    }
}

/// Execute the split subcommand.
fn run_split(args: SplitArgs) -> Result<(), GeolabelError> {
    let opts = split::SplitOptions {
        train_fraction: args.train_fraction,
        seed: args.seed,
        out_dir: args.out_dir,
    };
    let summary = split::split_labels(&args.input, &opts)?;

    println!("Total number of labels: {}", summary.groups);
    println!("Number of training elements: {}", summary.train_groups);
    println!("Number of testing elements: {}", summary.test_groups);
    Ok(())
}

/// Execute the tif2img subcommand.
fn run_tif2img(args: Tif2ImgArgs) -> Result<(), GeolabelError> {
    let raw = args.format.ok_or_else(|| GeolabelError::InvalidArguments {
        message: format!(
            "A file format to convert to must be specified: -f {}",
            ExportFormat::options_list()
        ),
    })?;
    let format: ExportFormat = raw.parse()?;

    let report =
        raster_export::export_tree(&args.root, format, &args.gdal_translate, args.dry_run)?;
    if !args.dry_run {
        print!("{report}");
    }
    Ok(())
}

fn print_report(report: &WalkReport, output: &str) -> Result<(), GeolabelError> {
    match output {
        "json" => {
            let json =
                serde_json::to_string_pretty(report).map_err(GeolabelError::ReportSerialize)?;
            println!("{json}");
        }
        "text" => print!("{report}"),
        other => {
            return Err(GeolabelError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }
    Ok(())
}
