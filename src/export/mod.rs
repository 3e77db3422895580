pub mod geojson;
pub mod html;

use crate::cli::ExportFormat;
use crate::error::Result;
use std::path::{Path, PathBuf};
use well_map_common::{MarkerLayer, ViewerConfig};

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, stem: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        (
            output.join(format!("{}.geojson", stem)),
            output.join(format!("{}.html", stem)),
        )
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(stem);
        (
            parent.join(format!("{}.geojson", stem)),
            parent.join(format!("{}.html", stem)),
        )
    }
}

/// 出力したファイルのパスを返す
pub fn export_layer(
    layer: &MarkerLayer,
    format: &ExportFormat,
    output: &Path,
    viewer: &ViewerConfig,
    title: &str,
) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    }

    let written = match format {
        ExportFormat::GeoJson => {
            let path = output_path_for_format(output, "wells", "geojson");
            geojson::write_geojson(layer, &path)?;
            vec![path]
        }
        ExportFormat::Html => {
            let path = output_path_for_format(output, "wells", "html");
            html::write_html(layer, viewer, title, &path)?;
            vec![path]
        }
        ExportFormat::Both => {
            let (geojson_path, html_path) = output_paths_for_both(output, "wells");
            geojson::write_geojson(layer, &geojson_path)?;
            html::write_html(layer, viewer, title, &html_path)?;
            vec![geojson_path, html_path]
        }
    };

    for path in &written {
        println!("✔ 出力: {}", path.display());
    }
    Ok(written)
}
