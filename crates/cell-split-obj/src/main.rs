//! Splits a Wavefront OBJ model into one OBJ file per unit grid cell.
//!
//! With usable cells (from `-u` or the configuration file) the fragments are
//! additionally clumped into those cells and written as `<stem>_clumped_*`.
//! Every output file references the input's material libraries, which are
//! loaded from next to the input to report materials they do not define.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cell_split::{CellMap, GridCell, GridDecomposer, clump};
use cell_split_obj::{
    JobConfig, MaterialLibrary, ObjError, ObjMaterial, read_mtl, read_obj_model,
    write_obj_with_libraries,
};
use clap::Parser;
use tracing::{info, warn};

/// Splits an OBJ model into unit grid cells.
#[derive(Parser, Debug)]
#[command(name = "split-obj")]
#[command(about = "Splits an OBJ model into one file per unit grid cell")]
struct Args {
    /// Input OBJ file.
    input: PathBuf,

    /// Output directory (default: from the config, else next to the input).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Usable cell as `x,y,z`; repeat for more. Enables clumping.
    #[arg(short, long = "usable", value_parser = parse_cell)]
    usable: Vec<GridCell>,

    /// Classification tolerance, overriding the config.
    #[arg(long)]
    epsilon: Option<f64>,
}

fn parse_cell(text: &str) -> Result<GridCell, String> {
    let coords = text
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid cell `{text}`: {e}"))?;
    match coords[..] {
        [x, y, z] => Ok(GridCell::new(x, y, z)),
        _ => Err(format!("invalid cell `{text}`: expected x,y,z")),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut job = match &args.config {
        Some(path) => JobConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => JobConfig::default(),
    };
    if let Some(epsilon) = args.epsilon {
        job.split.epsilon = epsilon;
    }
    let mut usable = job.usable_cells();
    usable.extend(args.usable.iter().copied());

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| job.output_dir.clone())
        .unwrap_or_else(|| args.input.parent().unwrap_or(Path::new(".")).to_path_buf());
    let stem = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Input path has no file name")?;

    let decomposer = GridDecomposer::new(job.split).context("Invalid split settings")?;

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let model = read_obj_model(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mesh = model.mesh;
    let libraries = model.material_libraries;
    info!(
        groups = mesh.group_count(),
        polygons = mesh.polygon_count(),
        libraries = libraries.len(),
        "Loaded model"
    );

    let input_dir = args.input.parent().unwrap_or(Path::new("."));
    let materials = load_materials(input_dir, &libraries);
    for name in materials.missing_from(&mesh) {
        warn!(material = name, "Material not defined in any library");
    }

    let cells = decomposer
        .decompose(&mesh.recompute_zero_normals(decomposer.epsilon()))
        .context("Failed to split model into cells")?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;
    write_cells(&output_dir, &format!("{stem}_"), &libraries, &cells)?;

    if !usable.is_empty() {
        let clumped = clump(cells, &usable)?;
        write_cells(&output_dir, &format!("{stem}_clumped_"), &libraries, &clumped)?;
    }

    info!(output = %output_dir.display(), "Done");
    Ok(())
}

/// Loads the named MTL files relative to `dir`. Libraries that cannot be
/// read are skipped with a warning.
fn load_materials(dir: &Path, libraries: &[String]) -> MaterialLibrary {
    let mut materials = MaterialLibrary::new();
    for name in libraries {
        let path = dir.join(name);
        let loaded = File::open(&path)
            .map_err(ObjError::from)
            .and_then(|file| read_mtl(BufReader::new(file)));
        match loaded {
            Ok(library) => {
                info!(path = %path.display(), materials = library.len(), "Loaded material library");
                materials.merge(library);
            }
            Err(err) => warn!(path = %path.display(), %err, "Skipping material library"),
        }
    }
    materials
}

/// Writes one `<prefix><x>_<y>_<z>.obj` file per cell.
fn write_cells(
    dir: &Path,
    prefix: &str,
    libraries: &[String],
    cells: &CellMap<ObjMaterial>,
) -> Result<()> {
    for (cell, mesh) in cells {
        let path = dir.join(format!("{prefix}{cell}.obj"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_obj_with_libraries(mesh, libraries, BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(
            %cell,
            polygons = mesh.polygon_count(),
            path = %path.display(),
            "Wrote cell"
        );
    }
    Ok(())
}
