mod db;
mod engine;
mod models;
mod render;
mod settings;
mod speech;
mod store;

use db::Database;
use engine::commands::{
    claim_report, clear_query, focus_report, get_reports_view, resync_reports, set_query,
    submit_report,
};
use engine::EngineController;
use settings::{MapSettings, SettingsStore};
use speech::commands::{
    read_report_aloud, set_speech_available, speech_failed, speech_finished, speech_started,
};
use speech::SpeechController;
use store::ReportFeed;
use tauri::{Manager, State};

pub(crate) struct AppState {
    pub(crate) feed: ReportFeed,
    pub(crate) engine: EngineController,
    pub(crate) speech: SpeechController,
    pub(crate) settings: SettingsStore,
}

#[tauri::command]
fn get_map_settings(state: State<AppState>) -> Result<MapSettings, String> {
    Ok(state.settings.map())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Lost & Found starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let db_path = app_data_dir.join("lostfound.sqlite3");
                let database = Database::new(db_path)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings_store = SettingsStore::new(settings_path)?;
                let map_settings = settings_store.map();

                let feed = ReportFeed::new(database);
                let engine = EngineController::new(app.handle().clone(), map_settings.icons);
                let speech = SpeechController::new(app.handle().clone());

                // One standing subscription, then the initial full snapshot.
                // A failed initial load is logged inside the feed; the map
                // simply starts empty.
                engine.subscribe_to(&feed);
                tauri::async_runtime::block_on(feed.notify());

                app.manage(AppState {
                    feed,
                    engine,
                    speech,
                    settings: settings_store,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_map_settings,
            get_reports_view,
            set_query,
            clear_query,
            focus_report,
            submit_report,
            claim_report,
            resync_reports,
            read_report_aloud,
            set_speech_available,
            speech_started,
            speech_finished,
            speech_failed,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
