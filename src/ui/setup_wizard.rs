//! First-run setup wizard for configuration.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use eframe::egui::{self, Color32, RichText};

use crate::api::ApiClient;
use crate::config::AppConfig;

/// Connection test state.
#[derive(Default, Clone)]
pub enum ConnectionTestState {
    #[default]
    NotTested,
    Testing,
    Success,
    Failed(String),
}

/// Setup wizard state.
pub struct SetupWizard {
    /// Current step (0-3).
    pub current_step: usize,
    /// Configuration being built.
    pub config: AppConfig,
    /// Backend connection test state.
    pub server_test_state: ConnectionTestState,
    /// Wizard completed flag.
    pub completed: bool,
    /// Where the finished config is written.
    pub config_path: PathBuf,
    timeout_input: String,
    notification_input: String,
}

impl SetupWizard {
    pub fn new(config_path: PathBuf) -> Self {
        Self::with_config(AppConfig::default(), config_path)
    }

    /// Start from existing values, e.g. a `--server` override.
    pub fn with_config(config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            current_step: 0,
            timeout_input: config.server.timeout_secs.to_string(),
            notification_input: config.ui.notification_secs.to_string(),
            config,
            server_test_state: ConnectionTestState::NotTested,
            completed: false,
            config_path,
        }
    }

    /// Check if user can proceed to next step.
    pub fn can_proceed(&self) -> bool {
        match self.current_step {
            0 => true,
            // An unreachable server is allowed, only the URL shape is checked.
            1 => self.validate_server_step().is_ok(),
            2 => self.config.validate().is_ok(),
            3 => true,
            _ => false,
        }
    }

    fn validate_server_step(&self) -> Result<(), String> {
        let url = self.config.server.base_url.trim();
        if url.is_empty() {
            return Err("Server URL cannot be empty".to_string());
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err("Server URL must start with http:// or https://".to_string());
        }
        if self.config.server.timeout_secs == 0 {
            return Err("Timeout must be at least 1 second".to_string());
        }
        Ok(())
    }

    /// Get step title.
    fn step_title(&self) -> &'static str {
        match self.current_step {
            0 => "Welcome",
            1 => "Server Connection",
            2 => "Preferences",
            3 => "Confirmation",
            _ => "Setup",
        }
    }

    /// Total number of steps.
    const TOTAL_STEPS: usize = 4;
}

/// Setup wizard application.
pub struct SetupApp {
    pub wizard: SetupWizard,
    pub initial_error: Option<String>,
    pub rt: tokio::runtime::Runtime,
    server_test_rx: Option<mpsc::Receiver<Result<(), String>>>,
}

impl SetupApp {
    pub fn new(
        wizard: SetupWizard,
        initial_error: Option<String>,
        rt: tokio::runtime::Runtime,
    ) -> Self {
        Self {
            wizard,
            initial_error,
            rt,
            server_test_rx: None,
        }
    }

    /// Test the backend connection asynchronously.
    fn start_server_test(&mut self) {
        let base_url = self.wizard.config.server.base_url.trim().to_string();
        let timeout = self.wizard.config.server.timeout().min(Duration::from_secs(10));
        let (tx, rx) = mpsc::channel();
        self.server_test_rx = Some(rx);
        self.wizard.server_test_state = ConnectionTestState::Testing;

        self.rt.spawn(async move {
            let result = match ApiClient::new(&base_url, timeout) {
                Ok(client) => client.test_connection().await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for async test results.
    fn poll_test_results(&mut self) {
        if let Some(rx) = &self.server_test_rx
            && let Ok(result) = rx.try_recv()
        {
            self.wizard.server_test_state = match result {
                Ok(()) => ConnectionTestState::Success,
                Err(e) => ConnectionTestState::Failed(e),
            };
            self.server_test_rx = None;
        }
    }
}

impl eframe::App for SetupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_test_results();

        if matches!(self.wizard.server_test_state, ConnectionTestState::Testing) {
            ctx.request_repaint();
        }

        if let Some(err) = self.initial_error.clone() {
            egui::Window::new("Configuration Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(Color32::from_rgb(255, 100, 100), &err);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.initial_error = None;
                    }
                });
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Payroll Console Setup").size(24.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!(
                            "Step {} of {}",
                            self.wizard.current_step + 1,
                            SetupWizard::TOTAL_STEPS
                        ));
                    });
                });

                ui.separator();
                ui.add_space(10.0);

                ui.heading(self.wizard.step_title());
                ui.add_space(20.0);

                let needs_server_test = match self.wizard.current_step {
                    0 => {
                        show_welcome_step(ui);
                        false
                    }
                    1 => show_server_step(ui, &mut self.wizard),
                    2 => {
                        show_preferences_step(ui, &mut self.wizard);
                        false
                    }
                    3 => {
                        show_confirmation_step(ui, &self.wizard);
                        false
                    }
                    _ => false,
                };

                if needs_server_test {
                    self.start_server_test();
                }

                ui.add_space(30.0);
                ui.separator();

                ui.horizontal(|ui| {
                    if self.wizard.current_step > 0 && ui.button("< Back").clicked() {
                        self.wizard.current_step -= 1;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.wizard.current_step < SetupWizard::TOTAL_STEPS - 1 {
                            let btn_text = if self.wizard.current_step == 0 {
                                "Get Started >"
                            } else {
                                "Next >"
                            };
                            let enabled = self.wizard.can_proceed();
                            if ui.add_enabled(enabled, egui::Button::new(btn_text)).clicked() {
                                self.wizard.current_step += 1;
                            }
                        } else if ui.button("Save & Exit").clicked() {
                            self.wizard.completed = true;
                        }
                    });
                });
            });
        });

        if self.wizard.completed {
            match self.wizard.config.save(&self.wizard.config_path) {
                Ok(()) => {
                    tracing::info!("Config saved to {:?}", self.wizard.config_path);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                Err(e) => {
                    tracing::error!("Failed to save config: {e}");
                    self.initial_error = Some(format!("Failed to save config: {e}"));
                    self.wizard.completed = false;
                }
            }
        }
    }
}

fn show_welcome_step(ui: &mut egui::Ui) {
    ui.label("Welcome to Payroll Console!");
    ui.add_space(10.0);
    ui.label(
        "The console manages employees, departments, positions, payroll, attendance \
         and leave through the payroll backend.",
    );
    ui.add_space(20.0);
    ui.label("Have the backend address ready, for example http://localhost:8080.");
    ui.label("Settings are written to config.toml and can be edited later.");
}

fn show_server_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) -> bool {
    let mut needs_test = false;

    egui::Grid::new("server_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Server URL:");
            if ui.text_edit_singleline(&mut wizard.config.server.base_url).changed() {
                wizard.server_test_state = ConnectionTestState::NotTested;
            }
            ui.end_row();

            ui.label("Timeout (seconds):");
            if ui.text_edit_singleline(&mut wizard.timeout_input).changed()
                && let Ok(t) = wizard.timeout_input.trim().parse()
            {
                wizard.config.server.timeout_secs = t;
            }
            ui.end_row();
        });

    ui.add_space(20.0);

    ui.horizontal(|ui| {
        let testing = matches!(wizard.server_test_state, ConnectionTestState::Testing);
        let valid = wizard.validate_server_step().is_ok();
        if ui
            .add_enabled(!testing && valid, egui::Button::new("Test Connection"))
            .clicked()
        {
            needs_test = true;
        }

        ui.add_space(10.0);

        match &wizard.server_test_state {
            ConnectionTestState::NotTested => {
                ui.label("Not tested");
            }
            ConnectionTestState::Testing => {
                ui.spinner();
                ui.label("Testing...");
            }
            ConnectionTestState::Success => {
                ui.colored_label(Color32::from_rgb(100, 200, 100), "Connection successful!");
            }
            ConnectionTestState::Failed(e) => {
                ui.colored_label(
                    Color32::from_rgb(255, 200, 100),
                    format!("Server not reachable: {e} (you can still continue)"),
                );
            }
        }
    });

    if let Err(e) = wizard.validate_server_step() {
        ui.add_space(10.0);
        ui.colored_label(Color32::from_rgb(255, 100, 100), e);
    }

    needs_test
}

fn show_preferences_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) {
    egui::Grid::new("prefs_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Notification time (seconds):");
            if ui.text_edit_singleline(&mut wizard.notification_input).changed()
                && let Ok(n) = wizard.notification_input.trim().parse()
            {
                wizard.config.ui.notification_secs = n;
            }
            ui.end_row();

            ui.label("Deletes:");
            ui.checkbox(&mut wizard.config.ui.confirm_deletes, "Ask before deleting");
            ui.end_row();

            ui.label("Log level:");
            egui::ComboBox::from_id_salt("log_level")
                .selected_text(&wizard.config.logging.level)
                .show_ui(ui, |ui| {
                    for level in ["error", "warn", "info", "debug", "trace"] {
                        ui.selectable_value(
                            &mut wizard.config.logging.level,
                            level.to_string(),
                            level,
                        );
                    }
                });
            ui.end_row();

            ui.label("Log files:");
            ui.checkbox(&mut wizard.config.logging.file, "Write daily log files");
            ui.end_row();
        });

    if let Err(e) = wizard.config.validate() {
        ui.add_space(10.0);
        ui.colored_label(Color32::from_rgb(255, 100, 100), e.to_string());
    }
}

fn show_confirmation_step(ui: &mut egui::Ui, wizard: &SetupWizard) {
    ui.label("Review your configuration:");
    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Server");
        ui.label(format!("  {}", wizard.config.server.base_url));
        ui.label(format!("  Timeout: {} seconds", wizard.config.server.timeout_secs));
    });

    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Preferences");
        ui.label(format!("  Notifications: {} seconds", wizard.config.ui.notification_secs));
        ui.label(format!(
            "  Delete confirmation: {}",
            if wizard.config.ui.confirm_deletes { "On" } else { "Off" }
        ));
        ui.label(format!(
            "  Logging: {}{}",
            wizard.config.logging.level,
            if wizard.config.logging.file { " (with files)" } else { "" }
        ));
    });

    ui.add_space(20.0);
    ui.label(format!("Settings will be written to {}.", wizard.config_path.display()));
    ui.label("Start Payroll Console again after saving to open the main window.");
}
