//! Map Marker Sync Demo.
//!
//! Spielt eine Szene (Marker + Aktionen) gegen ein aufzeichnendes Backend ab
//! und gibt ausgehende Events sowie den nativen Endzustand als JSON aus.

use anyhow::{bail, Context, Result};
use map_marker_sync::app::{DomEvent, NativeEventSlots};
use map_marker_sync::{
    FileIconLoader, LatLng, LayerIntent, LoadOrder, MarkerLayer, MarkerSlot, MarkerSpec, Provider,
    RecordingBackend, SyncOptions, VendorClickEvent,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Szenen-Datei.
#[derive(Debug, Deserialize)]
struct Scene {
    #[serde(default)]
    provider: Option<String>,
    markers: Vec<SceneMarker>,
    #[serde(default)]
    actions: Vec<SceneAction>,
}

#[derive(Debug, Deserialize)]
struct SceneMarker {
    slot: u64,
    spec: MarkerSpec,
}

/// Aktionen nach dem Bereit-Signal.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum SceneAction {
    Update { slot: u64, spec: MarkerSpec },
    Click { slot: u64, latitude: f64, longitude: f64 },
    CalloutClick { slot: u64 },
    Remove { slot: u64 },
}

impl SceneAction {
    fn into_intent(self, provider: Provider) -> LayerIntent {
        match self {
            SceneAction::Update { slot, spec } => LayerIntent::MarkerSpecChanged {
                slot: MarkerSlot(slot),
                spec,
            },
            SceneAction::Click {
                slot,
                latitude,
                longitude,
            } => LayerIntent::MarkerClicked {
                slot: MarkerSlot(slot),
                event: VendorClickEvent::synthesize(
                    provider,
                    LatLng::new(latitude, longitude),
                    NativeEventSlots::event(DomEvent::new()),
                ),
            },
            SceneAction::CalloutClick { slot } => LayerIntent::CalloutClicked {
                slot: MarkerSlot(slot),
                dom_event: Some(DomEvent::new()),
            },
            SceneAction::Remove { slot } => LayerIntent::MarkerRemoved {
                slot: MarkerSlot(slot),
            },
        }
    }
}

/// Kommandozeilen-Argumente.
struct Args {
    scene: PathBuf,
    provider: Option<Provider>,
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut scene = None;
        let mut provider = None;
        let mut config = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--provider" => {
                    let name = args.next().context("--provider erwartet einen Namen")?;
                    provider = Some(
                        Provider::from_name(&name)
                            .with_context(|| format!("Unbekannter Anbieter: {}", name))?,
                    );
                }
                "--config" => {
                    config = Some(PathBuf::from(
                        args.next().context("--config erwartet einen Pfad")?,
                    ));
                }
                other if other.starts_with("--") => bail!("Unbekannte Option: {}", other),
                other => scene = Some(PathBuf::from(other)),
            }
        }

        Ok(Self {
            scene: scene.context(
                "Aufruf: Map-Marker-Sync <scene.json> [--provider amap|tencent|google] [--config pfad]",
            )?,
            provider,
            config,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Map Marker Sync v{} startet...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse()?;
    let scene = load_scene(&args.scene)?;

    let provider = match (args.provider, scene.provider.as_deref()) {
        (Some(p), _) => p,
        (None, Some(name)) => Provider::from_name(name)
            .with_context(|| format!("Unbekannter Anbieter in Szene: {}", name))?,
        (None, None) => Provider::Tencent,
    };

    let config_path = args.config.unwrap_or_else(SyncOptions::config_path);
    let mut options = SyncOptions::load_from_file(&config_path);
    if options.asset_root.is_empty() {
        if let Some(dir) = args.scene.parent().filter(|d| !d.as_os_str().is_empty()) {
            options.asset_root = dir.to_string_lossy().into_owned();
        }
    }

    let mut layer = MarkerLayer::new(RecordingBackend::new(provider), options);
    let loader = FileIconLoader;

    for marker in scene.markers {
        layer.handle_intent(LayerIntent::MarkerDeclared {
            slot: MarkerSlot(marker.slot),
            spec: marker.spec,
        })?;
    }
    layer.handle_intent(LayerIntent::MapReady)?;
    layer.flush_icon_loads(&loader, LoadOrder::Reversed)?;

    for action in scene.actions {
        layer.handle_intent(action.into_intent(provider))?;
        layer.flush_icon_loads(&loader, LoadOrder::Reversed)?;
    }

    let output = serde_json::json!({
        "events": layer.drain_events(),
        "native": layer.backend().snapshot(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_scene(path: &Path) -> Result<Scene> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Szene nicht lesbar: {}", path.display()))?;
    let scene = serde_json::from_str(&content)
        .with_context(|| format!("Szene fehlerhaft: {}", path.display()))?;
    log::info!("Szene geladen: {}", path.display());
    Ok(scene)
}
