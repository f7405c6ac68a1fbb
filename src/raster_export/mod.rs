//! Export GeoTIFF tiles to 8-bit JPEG or PNG through `gdal_translate`.
//!
//! Pixel work happens entirely in the external program; this module picks
//! the files, builds each command line and cleans up the `.aux.xml`
//! sidecar GDAL leaves next to the output.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use walkdir::WalkDir;

use crate::convert::{has_extension, WalkReport};
use crate::error::GeolabelError;

/// Default program name; overridable from the CLI.
pub const GDAL_TRANSLATE: &str = "gdal_translate";

/// Per-band input ranges stretched to 0..255 with `-ot Byte`.
const BAND_SCALES: [(&str, &str, &str); 3] = [
    ("-scale_1", "20", "1463"),
    ("-scale_2", "114", "1808"),
    ("-scale_3", "139", "1256"),
];

const TIFF_EXTENSION: &str = "tif";

/// Output formats supported by the export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Jpeg,
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Jpeg, ExportFormat::Png];

    /// Lower-case name, also used as the output extension.
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Png => "png",
        }
    }

    /// GDAL driver short name passed to `-of`.
    pub fn gdal_driver(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Png => "PNG",
        }
    }

    /// `[jpeg | png]`
    pub fn options_list() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(ExportFormat::name).collect();
        format!("[{}]", names.join(" | "))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = GeolabelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(raw))
            .ok_or_else(|| {
                GeolabelError::UnsupportedFormat(format!(
                    "'{raw}' (supported: {})",
                    Self::options_list()
                ))
            })
    }
}

/// One planned `gdal_translate` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub args: Vec<String>,
}

impl ExportPlan {
    /// The `.aux.xml` sidecar GDAL writes next to the output.
    pub fn aux_sidecar(&self) -> PathBuf {
        let mut name = self.output.clone().into_os_string();
        name.push(".aux.xml");
        PathBuf::from(name)
    }
}

/// Build the command arguments for exporting one tile.
pub fn plan_export(input: &Path, format: ExportFormat) -> ExportPlan {
    let output = input.with_extension(format.name());

    let mut args = Vec::new();
    for (flag, low, high) in BAND_SCALES {
        args.extend([flag.to_string(), low.to_string(), high.to_string()]);
    }
    args.extend([
        "-ot".to_string(),
        "Byte".to_string(),
        "-of".to_string(),
        format.gdal_driver().to_string(),
        input.display().to_string(),
        output.display().to_string(),
    ]);

    ExportPlan {
        input: input.to_path_buf(),
        output,
        args,
    }
}

/// Run one plan, then remove the sidecar if GDAL wrote one.
pub fn run_export(plan: &ExportPlan, program: &str) -> Result<(), GeolabelError> {
    let status = Command::new(program)
        .args(&plan.args)
        .status()
        .map_err(|source| GeolabelError::ExternalCommand {
            program: program.to_string(),
            message: source.to_string(),
        })?;

    if !status.success() {
        return Err(GeolabelError::ExternalCommand {
            program: program.to_string(),
            message: format!("{} exited with {status}", plan.input.display()),
        });
    }

    let sidecar = plan.aux_sidecar();
    if sidecar.is_file() {
        fs::remove_file(&sidecar).map_err(GeolabelError::Io)?;
    }
    Ok(())
}

/// Export every `.tif` under `root`.
///
/// With `dry_run`, commands are printed instead of executed. A failing tile
/// is logged and skipped.
pub fn export_tree(
    root: &Path,
    format: ExportFormat,
    program: &str,
    dry_run: bool,
) -> Result<WalkReport, GeolabelError> {
    let mut report = WalkReport::new(format.name());

    for tif in collect_tiffs(root)? {
        let plan = plan_export(&tif, format);
        if dry_run {
            println!("{program} {}", plan.args.join(" "));
            report.record_converted(plan.output);
            continue;
        }

        match run_export(&plan, program) {
            Ok(()) => {
                log::info!("Exported {}", plan.output.display());
                report.record_converted(plan.output);
            }
            Err(err) => {
                log::error!("{err}");
                report.record_skipped(tif, err.to_string());
            }
        }
    }

    Ok(report)
}

fn collect_tiffs(root: &Path) -> Result<Vec<PathBuf>, GeolabelError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| GeolabelError::Walk {
            path: root.to_path_buf(),
            message: source.to_string(),
        })?;
        if entry.file_type().is_file() && has_extension(entry.path(), TIFF_EXTENSION) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
