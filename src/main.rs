use clap::Parser;
use tracing_subscriber::EnvFilter;
use well_map::{cli, config, error, export, wells};
use well_map_common::derive_markers;
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Inspect { source } => {
            println!("🛢  well-map - 井戸データ検査\n");

            // 1. 取得
            println!("[1/2] 井戸データを取得中... ({})", wells::source_label(&source, &config));
            let store = wells::load_store(&source, &config).await?;
            println!("✔ {}件を取得\n", store.wells().len());

            // 2. マーカー導出
            println!("[2/2] マーカーを導出中...");
            let layer = derive_markers(store.wells());
            println!("✔ マーカー {}件 / スキップ {}件", layer.len(), layer.skipped.len());

            if !layer.skipped.is_empty() {
                println!("  座標が不正なレコード: {:?}", layer.skipped);
            }

            if cli.verbose {
                for marker in &layer.markers {
                    println!(
                        "\n#{} ({:.5}, {:.5})",
                        marker.index, marker.position.lat, marker.position.lng
                    );
                    for line in &marker.popup {
                        println!("  {}", line);
                    }
                }
            }

            println!("\n✅ 検査完了");
        }

        Commands::Export { source, output, format, preset, title } => {
            println!("🗺  well-map - エクスポート\n");

            let viewer = config.viewer_config(preset)?;

            println!("[1/2] 井戸データを取得中... ({})", wells::source_label(&source, &config));
            let store = wells::load_store(&source, &config).await?;
            let layer = derive_markers(store.wells());
            println!(
                "✔ {}件を取得（マーカー {}件 / スキップ {}件）\n",
                store.wells().len(),
                layer.len(),
                layer.skipped.len()
            );

            println!("[2/2] 出力中...");
            export::export_layer(&layer, &format, &output, &viewer, &title)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Config { set_endpoint, set_preset, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(endpoint) = set_endpoint {
                config.endpoint = Some(endpoint);
                changed = true;
            }

            if let Some(preset) = set_preset {
                config.preset = preset;
                changed = true;
            }

            if changed {
                config.viewer_config(None)?;
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint());
                println!("  初期表示位置: {}", config.preset.as_str());
                println!("  スクロールズーム: {}", if config.scroll_wheel_zoom { "有効" } else { "無効" });
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}
