use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use well_map_common::ViewportPreset;

#[derive(Parser)]
#[command(name = "well-map")]
#[command(about = "油井・ガス井データの取得・検査・地図エクスポート", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// データの取得元（どちらも省略時は設定のエンドポイント）
#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// APIエンドポイント
    #[arg(short, long, conflicts_with = "input")]
    pub endpoint: Option<String>,

    /// 保存済みのAPIレスポンス（JSONファイル）
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 井戸データを1回取得してマーカー化の結果を表示
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// マーカーをGeoJSON/HTMLに出力
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// 出力形式 (geojson/html/both)
        #[arg(short, long, default_value = "geojson")]
        format: ExportFormat,

        /// 初期表示位置 (well-field/world)
        #[arg(long)]
        preset: Option<ViewportPreset>,

        /// HTMLのタイトル
        #[arg(short, long, default_value = "Well Map")]
        title: String,
    },

    /// 設定を表示/編集
    Config {
        /// エンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 初期表示位置を設定 (well-field/world)
        #[arg(long)]
        set_preset: Option<ViewportPreset>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExportFormat {
    #[default]
    GeoJson,
    Html,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "geojson" | "json" => Ok(ExportFormat::GeoJson),
            "html" => Ok(ExportFormat::Html),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use geojson, html, or both", s)),
        }
    }
}
