//! Map View Editor Replay.
//!
//! Spielt eine aufgezeichnete Eingabe-Sequenz headless gegen eine Karte ab
//! und gibt die resultierende Karte als JSON aus.
//!
//! Aufruf: `map-editor-replay <szenario.json>`

use anyhow::Context;
use map_view_editor::{
    EditorOptions, EditorSession, InputEvent, InteractionController, TileMap, TilePattern,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Inhalt einer Szenario-Datei.
#[derive(Debug, Deserialize)]
struct Scenario {
    map: TileMap,
    /// Auswahl des Tileset-Pickers zu Beginn
    #[serde(default)]
    patterns: Vec<TilePattern>,
    events: Vec<InputEvent>,
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Map View Editor Replay v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let scenario_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("Aufruf: map-editor-replay <szenario.json>")?;

    let options = EditorOptions::load_from_file(&EditorOptions::config_path());
    let scenario = load_scenario(&scenario_path)?;

    let mut session = EditorSession::new(scenario.map);
    session.set_selected_patterns(scenario.patterns);
    let mut controller = InteractionController::new(options);

    for (i, event) in scenario.events.into_iter().enumerate() {
        let before = controller.kind();
        controller
            .handle_event(&mut session, event)
            .with_context(|| format!("Event #{i} fehlgeschlagen"))?;
        if controller.kind() != before {
            log::info!("Event #{}: {:?} -> {:?}", i, before, controller.kind());
        }
    }

    log::info!(
        "{} Requests angewendet, Endzustand {:?}",
        session.command_log().len(),
        controller.kind()
    );

    let map = session.tile_map().context("Keine Karte nach dem Abspielen")?;
    let json = serde_json::to_string_pretty(map).context("Karte nicht serialisierbar")?;
    println!("{json}");
    Ok(())
}

fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Szenario nicht lesbar: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Szenario ungültig: {}", path.display()))
}
