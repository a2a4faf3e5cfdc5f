mod support;

use support::trainlog_env::TrainlogEnvGuard;

use tempfile::TempDir;
use trainlog::app_dirs::APP_DIR_NAME;
use trainlog::config::{self, AppSettings, CONFIG_FILE_NAME};
use trainlog::egui_app::controller::EguiController;
use trainlog::training::FormField;

struct ControllerHarness {
    _env: TrainlogEnvGuard,
    temp: TempDir,
    pub controller: EguiController,
}

impl ControllerHarness {
    fn new(settings: Option<AppSettings>) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let env = TrainlogEnvGuard::set_config_home(temp.path().to_path_buf());
        if let Some(settings) = settings {
            let path = temp.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
            config::save_to_path(&settings, &path).expect("write config");
        }
        let mut controller = EguiController::default();
        controller.load_configuration().expect("load configuration");
        Self {
            _env: env,
            temp,
            controller,
        }
    }

    fn config_file(&self) -> std::path::PathBuf {
        self.temp.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
    }
}

#[test]
fn first_launch_writes_defaults_and_seeds_demo_days() {
    let harness = ControllerHarness::new(None);

    assert!(harness.config_file().is_file());
    let dates: Vec<_> = harness
        .controller
        .ui
        .rows
        .iter()
        .map(|row| row.date_display.as_str())
        .collect();
    assert_eq!(dates, vec!["20.07.2019", "19.07.2019", "18.07.2019"]);
}

#[test]
fn seeding_can_be_turned_off() {
    let harness = ControllerHarness::new(Some(AppSettings {
        seed_demo_entries: false,
        start_maximized: true,
    }));

    assert!(harness.controller.ui.rows.is_empty());
    assert!(harness.controller.settings().start_maximized);
}

#[test]
fn demo_day_accumulates_new_distance() {
    let mut harness = ControllerHarness::new(None);
    let controller = &mut harness.controller;
    controller.update_field(FormField::Date, "19.07.2019");
    controller.update_field(FormField::Distance, "0.8");
    controller.submit_form().expect("valid entry");

    assert_eq!(controller.ui.rows.len(), 3);
    assert_eq!(controller.ui.rows[1].date_display, "19.07.2019");
    assert_eq!(controller.ui.rows[1].distance_label, "15.0");
    assert!(controller.ui.form.is_empty());
}
