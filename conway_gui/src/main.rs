// main.rs - Desktop viewer for the conway engine
// Window size is the viewport; the control panel is the chrome.

use eframe::egui;
use egui::Color32;
use std::path::Path;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use conway::{Driver, Life, LifeConfig, Viewport};

mod ui;

const CONFIG_FILE: &str = "conway.toml";
const WINDOW_SIZE: [f32; 2] = [900.0, 800.0];

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conway=info")),
        )
        .init();

    let config = load_config();
    // Replaced by the measured viewport on the first frame.
    let guess = Viewport::new(WINDOW_SIZE[0] as f64, WINDOW_SIZE[1] as f64, 90.0);
    let life = match Life::new(config, guess) {
        Ok(life) => life,
        Err(e) => {
            error!("Cannot start simulation: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(LifeApp::new(Driver::new(life)))),
    )
}

fn load_config() -> LifeConfig {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return LifeConfig::default();
    }
    match LifeConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring {}: {}", CONFIG_FILE, e);
            LifeConfig::default()
        }
    }
}

/// Typed resolution text is applied unless it is blank or still shows the
/// current grid size, so clicking away from the field does not reshuffle.
pub fn should_apply_resolution(text: &str, current: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && !text.eq_ignore_ascii_case(current)
}

/// Viewer state around the engine's driver. Everything that touches the
/// grid goes through `driver`.
pub struct LifeApp {
    pub driver: Driver,
    pub interval_text: String,
    pub resolution_text: String,
    pub selected_pattern: usize,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub notice: Option<String>,
    last_viewport: Option<Viewport>,
}

impl LifeApp {
    pub fn new(driver: Driver) -> Self {
        let interval_text = driver.life().interval().as_millis().to_string();
        let spec = driver.life().spec();
        Self {
            driver,
            interval_text,
            resolution_text: format!("{}x{}", spec.columns, spec.rows),
            selected_pattern: 0,
            live_color: Color32::BLACK,
            dead_color: Color32::WHITE,
            notice: None,
            last_viewport: None,
        }
    }

    /// Logs and shows a failed engine call; the engine keeps its last state.
    pub fn report(&mut self, result: conway::Result<()>) {
        if let Err(e) = result {
            warn!("{}", e);
            self.notice = Some(e.to_string());
        }
    }

    pub fn current_resolution(&self) -> String {
        let spec = self.driver.life().spec();
        format!("{}x{}", spec.columns, spec.rows)
    }

    pub fn sync_resolution_text(&mut self) {
        self.resolution_text = self.current_resolution();
    }

    /// Forwards a viewport change; sub-pixel jitter is not a resize.
    pub fn observe_viewport(&mut self, viewport: Viewport, now: std::time::Instant) {
        let rounded = Viewport::new(
            viewport.width.round(),
            viewport.height.round(),
            viewport.chrome_height.round(),
        );
        if self.last_viewport == Some(rounded) {
            return;
        }
        self.last_viewport = Some(rounded);
        let result = self.driver.on_resize(rounded, now);
        self.report(result);
        self.sync_resolution_text();
    }
}
