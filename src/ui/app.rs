//! Main application UI.

use std::time::Instant;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::api::{ApiClient, ApiRequest};
use crate::config::AppConfig;
use crate::error::Result;
use crate::export;
use crate::flows::{
    AttendanceIntent, AttendancePanel, LeaveIntent, LeavePanel, PayrollIntent, PayrollPanel,
};
use crate::models::{Department, Employee, Position};
use crate::notify::Notifier;
use crate::panel::{Call, CrudIntent, CrudPanel, OptionLists, OptionSource};

use super::components::{colors, notification_banner};
use super::{ViewOutcome, attendance_panel, crud_view, dashboard, leave_panel, payroll_panel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Employees,
    Departments,
    Positions,
    Payroll,
    Attendance,
    Leaves,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Employees => "Employees",
            Panel::Departments => "Departments",
            Panel::Positions => "Positions",
            Panel::Payroll => "Payroll",
            Panel::Attendance => "Attendance",
            Panel::Leaves => "Leave Requests",
        }
    }

    /// Option lists the panel's dropdowns read from.
    fn option_sources(&self) -> &'static [OptionSource] {
        match self {
            Panel::Employees => &[OptionSource::Departments, OptionSource::Positions],
            Panel::Payroll | Panel::Attendance | Panel::Leaves => &[OptionSource::Employees],
            Panel::Dashboard | Panel::Departments | Panel::Positions => &[],
        }
    }
}

/// Backend reachability as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServerStatus {
    #[default]
    Unknown,
    Checking,
    Online,
    Offline(String),
}

/// Where a reply goes once it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Employees(CrudIntent),
    Departments(CrudIntent),
    Positions(CrudIntent),
    Options(OptionSource),
    Payroll(PayrollIntent),
    Attendance(AttendanceIntent),
    Leaves(LeaveIntent),
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    Reply {
        route: Route,
        request: String,
        result: Result<Value>,
    },
    ConnectionTested(std::result::Result<(), String>),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Main application state.
pub struct App {
    pub rt: tokio::runtime::Runtime,
    pub client: ApiClient,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    pub current_panel: Panel,

    // Screens
    pub employees: CrudPanel<Employee>,
    pub departments: CrudPanel<Department>,
    pub positions: CrudPanel<Position>,
    pub payroll: PayrollPanel,
    pub attendance: AttendancePanel,
    pub leaves: LeavePanel,
    pub options: OptionLists,

    pub notifier: Notifier,
    pub log_messages: Vec<LogEntry>,
    pub in_flight: usize,
    pub server_status: ServerStatus,
    pub last_request: Option<(String, bool)>,

    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig, client: ApiClient, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut employees = CrudPanel::new();
        let mut departments = CrudPanel::new();
        let mut positions = CrudPanel::new();
        employees.set_confirm_deletes(config.ui.confirm_deletes);
        departments.set_confirm_deletes(config.ui.confirm_deletes);
        positions.set_confirm_deletes(config.ui.confirm_deletes);

        let mut app = Self {
            rt,
            client,
            tx,
            rx,
            current_panel: Panel::default(),
            employees,
            departments,
            positions,
            payroll: PayrollPanel::default(),
            attendance: AttendancePanel::default(),
            leaves: LeavePanel::new(),
            options: OptionLists::default(),
            notifier: Notifier::new(config.ui.notification_delay()),
            log_messages: Vec::new(),
            in_flight: 0,
            server_status: ServerStatus::Unknown,
            last_request: None,
            config,
        };

        // Initial data for the dashboard counters
        app.test_connection();
        app.issue(Some(app.employees.load()), Route::Employees);
        app.issue(Some(app.departments.load()), Route::Departments);
        app.issue(Some(app.positions.load()), Route::Positions);
        app.issue(Some(app.leaves.load()), Route::Leaves);

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Clear the activity log.
    pub fn clear_log(&mut self) {
        self.log_messages.clear();
    }

    /// Run a request on the runtime and route its reply back.
    pub fn dispatch(&mut self, route: Route, request: ApiRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let label = request.to_string();
        debug!("Dispatching {label}");
        self.in_flight += 1;

        self.rt.spawn(async move {
            let result = client.send(&request).await;
            let _ = tx.send(UiMessage::Reply {
                route,
                request: label,
                result,
            });
        });
    }

    /// Dispatch a panel call, if the panel produced one.
    pub fn issue<I>(&mut self, call: Option<Call<I>>, route: fn(I) -> Route) {
        if let Some(call) = call {
            self.dispatch(route(call.intent), call.request);
        }
    }

    fn issue_all<I>(&mut self, outcome: ViewOutcome<I>, route: fn(I) -> Route) -> ViewOutcome<I> {
        let mut outcome = outcome;
        for call in std::mem::take(&mut outcome.calls) {
            self.dispatch(route(call.intent), call.request);
        }
        outcome
    }

    /// Refresh one dropdown option list.
    pub fn load_options(&mut self, source: OptionSource) {
        self.dispatch(Route::Options(source), ApiRequest::get(source.collection()));
    }

    /// Check that the backend answers.
    pub fn test_connection(&mut self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.server_status = ServerStatus::Checking;

        self.rt.spawn(async move {
            let result = client.test_connection().await.map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::ConnectionTested(result));
        });
    }

    /// Switch screens, loading what the new one shows.
    pub fn navigate(&mut self, panel: Panel) {
        info!("Opening {}", panel.name());
        self.current_panel = panel;

        for source in panel.option_sources() {
            self.load_options(*source);
        }

        match panel {
            Panel::Employees => self.issue(Some(self.employees.load()), Route::Employees),
            Panel::Departments => self.issue(Some(self.departments.load()), Route::Departments),
            Panel::Positions => self.issue(Some(self.positions.load()), Route::Positions),
            Panel::Leaves => self.issue(Some(self.leaves.load()), Route::Leaves),
            Panel::Dashboard | Panel::Payroll | Panel::Attendance => {}
        }
    }

    /// Export the table of the current screen to a workbook chosen by the user.
    pub fn export_current(&mut self) {
        let (prefix, sheet) = match self.current_panel {
            Panel::Employees => ("employees", "Employees"),
            Panel::Departments => ("departments", "Departments"),
            Panel::Positions => ("positions", "Positions"),
            Panel::Payroll => ("payroll", "Payroll"),
            Panel::Attendance => ("attendance", "Attendance"),
            Panel::Leaves => ("leave_requests", "Leave Requests"),
            Panel::Dashboard => return,
        };

        let Some(path) = export::show_save_dialog(&export::generate_export_filename(prefix)) else {
            return;
        };

        let result = match self.current_panel {
            Panel::Employees => export::export_records(sheet, self.employees.table(), &path),
            Panel::Departments => export::export_records(sheet, self.departments.table(), &path),
            Panel::Positions => export::export_records(sheet, self.positions.table(), &path),
            Panel::Payroll => export::export_records(sheet, self.payroll.table(), &path),
            Panel::Attendance => export::export_records(sheet, self.attendance.history(), &path),
            Panel::Leaves => export::export_records(sheet, self.leaves.table(), &path),
            Panel::Dashboard => return,
        };

        match result {
            Ok(rows) => {
                let message = format!("Exported {rows} rows to {}", path.display());
                self.notifier.success(message.clone());
                self.log(LogLevel::Success, message);
            }
            Err(e) => {
                error!("Export failed: {e}");
                self.notifier.error(format!("Export failed: {e}"));
                self.log(LogLevel::Error, format!("Export failed: {e}"));
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::Reply { route, request, result } => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.record_outcome(&request, &result);
                    self.route_reply(route, result);
                }
                UiMessage::ConnectionTested(result) => {
                    self.server_status = match result {
                        Ok(()) => {
                            let message = format!("Connected to {}", self.client.base_url());
                            self.log(LogLevel::Success, message);
                            ServerStatus::Online
                        }
                        Err(e) => {
                            self.log(LogLevel::Error, format!("Backend unreachable: {e}"));
                            ServerStatus::Offline(e)
                        }
                    };
                }
            }
        }
    }

    fn record_outcome(&mut self, request: &str, result: &Result<Value>) {
        match result {
            Ok(_) => {
                self.last_request = Some((request.to_string(), true));
                self.log(LogLevel::Info, request.to_string());
                if self.server_status != ServerStatus::Online {
                    self.server_status = ServerStatus::Online;
                }
            }
            Err(e) => {
                self.last_request = Some((request.to_string(), false));
                self.log(LogLevel::Error, format!("{request}: {e}"));
                if e.is_transport() {
                    self.server_status = ServerStatus::Offline(e.to_string());
                }
            }
        }
    }

    fn route_reply(&mut self, route: Route, result: Result<Value>) {
        match route {
            Route::Employees(intent) => {
                let next = self.employees.handle(intent, result, &mut self.notifier);
                self.issue(next, Route::Employees);
            }
            Route::Departments(intent) => {
                let next = self.departments.handle(intent, result, &mut self.notifier);
                self.issue(next, Route::Departments);
            }
            Route::Positions(intent) => {
                let next = self.positions.handle(intent, result, &mut self.notifier);
                self.issue(next, Route::Positions);
            }
            Route::Options(source) => {
                self.options.get_mut(source).apply(result, &mut self.notifier);
            }
            Route::Payroll(intent) => self.payroll.handle(intent, result, &mut self.notifier),
            Route::Attendance(intent) => self.attendance.handle(intent, result, &mut self.notifier),
            Route::Leaves(intent) => {
                let next = self.leaves.handle(intent, result, &mut self.notifier);
                self.issue(next, Route::Leaves);
            }
        }
    }

    /// Act on what a screen asked for.
    fn finish_view<I>(&mut self, outcome: ViewOutcome<I>, route: fn(I) -> Route) {
        let outcome = self.issue_all(outcome, route);
        if outcome.reload_options {
            for source in self.current_panel.option_sources() {
                self.load_options(*source);
            }
        }
        if outcome.export {
            self.export_current();
        }
        if outcome.back {
            self.navigate(Panel::Dashboard);
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Go", |ui| {
                    for panel in [
                        Panel::Dashboard,
                        Panel::Employees,
                        Panel::Departments,
                        Panel::Positions,
                        Panel::Payroll,
                        Panel::Attendance,
                        Panel::Leaves,
                    ] {
                        if ui.button(panel.name()).clicked() {
                            self.navigate(panel);
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Server", |ui| {
                    let checking = self.server_status == ServerStatus::Checking;
                    if ui
                        .add_enabled(!checking, egui::Button::new("Test Connection"))
                        .clicked()
                    {
                        self.test_connection();
                        ui.close();
                    }
                    if ui.button("Clear Activity Log").clicked() {
                        self.clear_log();
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (color, text) = match &self.server_status {
                        ServerStatus::Unknown => (colors::NEUTRAL, "Not checked".to_string()),
                        ServerStatus::Checking => (colors::WARNING, "Checking...".to_string()),
                        ServerStatus::Online => (colors::SUCCESS, "Online".to_string()),
                        ServerStatus::Offline(e) => (colors::ERROR, format!("Offline ({e})")),
                    };

                    if self.server_status == ServerStatus::Checking {
                        ui.spinner();
                    }
                    ui.colored_label(color, format!("Server: {} - {text}", self.client.base_url()));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.in_flight > 0 {
                            ui.spinner();
                            ui.label(format!("{} pending", self.in_flight));
                        } else if let Some((request, ok)) = &self.last_request {
                            let color = if *ok { colors::SUCCESS } else { colors::ERROR };
                            ui.colored_label(color, request);
                        }
                    });
                });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_async_results();

        if self.in_flight > 0 || self.server_status == ServerStatus::Checking {
            ctx.request_repaint();
        } else if let Some(remaining) = self.notifier.remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            notification_banner(ui, &mut self.notifier);
            ui.add_space(6.0);

            match self.current_panel {
                Panel::Dashboard => {
                    if let Some(next) = dashboard::show(self, ui) {
                        self.navigate(next);
                    }
                }
                Panel::Employees => {
                    let outcome =
                        crud_view::show(ui, &mut self.employees, &self.options, &mut self.notifier);
                    self.finish_view(outcome, Route::Employees);
                }
                Panel::Departments => {
                    let outcome = crud_view::show(
                        ui,
                        &mut self.departments,
                        &self.options,
                        &mut self.notifier,
                    );
                    self.finish_view(outcome, Route::Departments);
                }
                Panel::Positions => {
                    let outcome =
                        crud_view::show(ui, &mut self.positions, &self.options, &mut self.notifier);
                    self.finish_view(outcome, Route::Positions);
                }
                Panel::Payroll => {
                    let outcome = payroll_panel::show(
                        ui,
                        &mut self.payroll,
                        &self.options,
                        &mut self.notifier,
                    );
                    self.finish_view(outcome, Route::Payroll);
                }
                Panel::Attendance => {
                    let outcome = attendance_panel::show(
                        ui,
                        &mut self.attendance,
                        &self.options,
                        &mut self.notifier,
                    );
                    self.finish_view(outcome, Route::Attendance);
                }
                Panel::Leaves => {
                    let outcome =
                        leave_panel::show(ui, &mut self.leaves, &self.options, &mut self.notifier);
                    self.finish_view(outcome, Route::Leaves);
                }
            }
        });
    }
}
