//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Network calls run as tasks on the tokio runtime and report back through
//! the event channel; the App never blocks on the API.

use std::future::Future;
use std::sync::mpsc;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::client::{ApiClient, ExportFormat};
use crate::config::Settings;
use crate::dashboard::{load, load_failure_notice, DashboardData, DashboardQuery, Debouncer, Generation};
use crate::display::{Action, Notice, Resource};
use crate::error::{NexoraError, NexoraResult};
use crate::models::{Month, Transaction, TransactionFilter, TransactionId};
use crate::session::Route;

use super::dialogs::filter::{FilterField, FilterForm};
use super::event::Event;
use super::widgets::{Notification, NotificationQueue};

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Transactions,
    Budgets,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [Self::Dashboard, Self::Transactions, Self::Budgets];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Budgets => "Budgets",
        }
    }

    fn next(&self) -> Self {
        match self {
            Self::Dashboard => Self::Transactions,
            Self::Transactions => Self::Budgets,
            Self::Budgets => Self::Dashboard,
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Filter,
    ConfirmDelete(TransactionId),
}

/// Main application state
pub struct App {
    pub settings: Settings,

    client: ApiClient,

    runtime: Handle,

    sender: mpsc::Sender<Event>,

    /// Last successful load; kept on screen while a reload is in flight
    pub data: Option<DashboardData>,

    pub query: DashboardQuery,

    generation: Arc<Generation>,

    debouncer: Debouncer,

    pub loading: bool,

    pub active_view: ActiveView,

    pub active_dialog: ActiveDialog,

    pub filter_form: FilterForm,

    /// Filter fields that did not resolve against the loaded lists
    pub invalid_filter_fields: Vec<FilterField>,

    /// Row selected in the transactions table
    pub selected_transaction_index: usize,

    /// Row selected in the budgets table
    pub selected_budget_index: usize,

    pub notifications: NotificationQueue,

    pub should_quit: bool,

    /// Where to send the user after the TUI closes
    pub redirect: Option<Route>,
}

impl App {
    pub fn new(
        client: ApiClient,
        settings: Settings,
        runtime: Handle,
        sender: mpsc::Sender<Event>,
    ) -> Self {
        let debouncer = Debouncer::new(settings.filter_debounce());
        Self {
            settings,
            client,
            runtime,
            sender,
            data: None,
            query: DashboardQuery::new(Month::current()),
            generation: Arc::new(Generation::new()),
            debouncer,
            loading: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::None,
            filter_form: FilterForm::new(),
            invalid_filter_fields: Vec::new(),
            selected_transaction_index: 0,
            selected_budget_index: 0,
            notifications: NotificationQueue::new(),
            should_quit: false,
            redirect: None,
        }
    }

    /// Signal the app to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    pub fn cycle_view(&mut self) {
        self.active_view = self.active_view.next();
    }

    /// Currency of the signed-in user, or the configured fallback
    pub fn currency(&self) -> &str {
        self.data
            .as_ref()
            .map(DashboardData::currency)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.settings.fallback_currency.as_str())
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.data
            .as_ref()
            .map(|d| d.transactions.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions().get(self.selected_transaction_index)
    }

    /// Queue a localized toast
    pub fn notify(&mut self, notice: Notice) {
        let notification =
            Notification::from_notice(notice, self.settings.locale, self.settings.toast_duration());
        self.notifications.push(notification);
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(task);
    }

    /// Task that loads the dashboard for the current query
    ///
    /// The generation is claimed here, when the load is queued, so loads
    /// are ordered by when they were requested.
    fn load_task(&self) -> impl Future<Output = ()> + Send + 'static {
        let client = self.client.clone();
        let query = self.query.clone();
        let generation = self.generation.next();
        let sender = self.sender.clone();
        async move {
            let result = load(&client, &query).await;
            let _ = sender.send(Event::Loaded {
                generation,
                result: Box::new(result),
            });
        }
    }

    /// Reload right away, dropping any pending debounced reload
    pub fn reload_now(&mut self) {
        self.debouncer.cancel();
        self.loading = true;
        let task = self.load_task();
        self.spawn(task);
    }

    /// Reload after the filter quiet period
    pub fn schedule_reload(&mut self) {
        self.loading = true;
        let task = self.load_task();
        self.debouncer.schedule(&self.runtime, task);
    }

    /// Apply a load result unless a newer load has started since
    pub fn on_loaded(&mut self, generation: u64, result: NexoraResult<DashboardData>) {
        if !self.generation.is_current(generation) {
            tracing::debug!(generation, "dropping stale dashboard load");
            return;
        }
        self.loading = false;

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.clamp_selection();
                // Names typed before the lists arrived can resolve now
                self.refresh_invalid_fields();
            }
            Err(err) => self.on_failure(err, Notice::LoadFailed),
        }
    }

    /// Route a failed action: an ended session closes the TUI, anything
    /// else shows `notice`
    fn on_failure(&mut self, err: NexoraError, notice: Notice) {
        if let Some(route) = err.redirect() {
            tracing::info!(%route, "session ended, leaving the dashboard");
            self.redirect = Some(route);
            self.quit();
            return;
        }
        let notice = if notice == Notice::LoadFailed {
            load_failure_notice(&err).unwrap_or(notice)
        } else {
            tracing::warn!(error = %err, "action failed");
            notice
        };
        self.notify(notice);
    }

    fn clamp_selection(&mut self) {
        let transactions = self.transactions().len();
        self.selected_transaction_index = self
            .selected_transaction_index
            .min(transactions.saturating_sub(1));
        let budgets = self.data.as_ref().map_or(0, |d| d.budget_status.len());
        self.selected_budget_index = self.selected_budget_index.min(budgets.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        match self.active_view {
            ActiveView::Transactions => {
                self.selected_transaction_index = self.selected_transaction_index.saturating_sub(1)
            }
            ActiveView::Budgets => {
                self.selected_budget_index = self.selected_budget_index.saturating_sub(1)
            }
            ActiveView::Dashboard => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.active_view {
            ActiveView::Transactions => self.selected_transaction_index += 1,
            ActiveView::Budgets => self.selected_budget_index += 1,
            ActiveView::Dashboard => {}
        }
        self.clamp_selection();
    }

    pub fn prev_month(&mut self) {
        self.query.month = self.query.month.prev();
        self.reload_now();
    }

    pub fn next_month(&mut self) {
        self.query.month = self.query.month.next();
        self.reload_now();
    }

    fn resolve_filter(&self) -> (TransactionFilter, Vec<FilterField>) {
        match &self.data {
            Some(data) => self.filter_form.to_filter(&data.categories, &data.wallets),
            None => self.filter_form.to_filter(&[], &[]),
        }
    }

    fn refresh_invalid_fields(&mut self) {
        let (filter, invalid) = self.resolve_filter();
        self.invalid_filter_fields = invalid;
        if filter != self.query.filter {
            self.query.filter = filter;
            self.schedule_reload();
        }
    }

    /// Re-read the filter form and reload when the query changed
    pub fn on_filter_changed(&mut self) {
        self.refresh_invalid_fields();
    }

    pub fn clear_filter(&mut self) {
        self.filter_form.clear();
        self.on_filter_changed();
    }

    /// Ask for confirmation before deleting the selected transaction
    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_transaction().map(|t| t.id) {
            self.open_dialog(ActiveDialog::ConfirmDelete(id));
        }
    }

    pub fn delete_transaction(&mut self, id: TransactionId) {
        self.close_dialog();
        let client = self.client.clone();
        let sender = self.sender.clone();
        self.spawn(async move {
            let result = client
                .delete_transaction(id)
                .await
                .map(|_| id)
                .map_err(NexoraError::from);
            let _ = sender.send(Event::Deleted(result));
        });
    }

    pub fn on_deleted(&mut self, result: NexoraResult<TransactionId>) {
        match result {
            Ok(id) => {
                tracing::info!(id = %id, "transaction deleted");
                self.notify(Notice::Done(Resource::Transaction, Action::Deleted));
                self.reload_now();
            }
            Err(err) => self.on_failure(err, Notice::DeleteFailed(Resource::Transaction)),
        }
    }

    /// Download the PDF report for the current filter into the working
    /// directory
    pub fn export_pdf(&mut self) {
        let client = self.client.clone();
        let filter = self.query.filter.clone();
        let sender = self.sender.clone();
        self.spawn(async move {
            let result = async {
                let file = client.export_transactions(&filter, ExportFormat::Pdf).await?;
                let path = std::env::current_dir()?.join(&file.file_name);
                std::fs::write(&path, &file.bytes)?;
                Ok::<_, NexoraError>(path)
            }
            .await;
            let _ = sender.send(Event::Exported(result));
        });
    }

    pub fn on_exported(&mut self, result: NexoraResult<std::path::PathBuf>) {
        match result {
            Ok(path) => {
                let message = format!(
                    "{} {}",
                    Notice::ExportSaved.text(self.settings.locale),
                    path.display()
                );
                self.notifications
                    .push(Notification::info(message, self.settings.toast_duration()));
            }
            Err(err) if err.is_session_expired() => self.on_failure(err, Notice::LoadFailed),
            Err(err) => {
                self.notifications
                    .push(Notification::error(err.to_string(), self.settings.toast_duration()));
            }
        }
    }

    /// Revoke the refresh token and leave
    pub fn logout(&mut self) {
        let client = self.client.clone();
        let sender = self.sender.clone();
        self.spawn(async move {
            if let Err(err) = client.logout().await {
                tracing::warn!(error = %err, "logout failed");
            }
            let _ = sender.send(Event::LoggedOut);
        });
    }

    pub fn on_logged_out(&mut self) {
        self.redirect = Some(Route::login());
        self.quit();
    }

    /// Called on every tick
    pub fn tick(&mut self) {
        self.notifications.remove_expired();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::models::{Preferences, Profile, UserId};
    use crate::session::SessionContext;
    use crate::tui::widgets::NotificationType;

    fn data(transactions: usize) -> DashboardData {
        DashboardData {
            profile: Profile {
                id: UserId::new(1),
                username: "awa".into(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                date_joined: None,
                last_login: None,
                preferences: Preferences::default(),
            },
            categories: Vec::new(),
            wallets: Vec::new(),
            transactions: (0..transactions)
                .map(|i| Transaction {
                    id: TransactionId::new(i as i64 + 1),
                    amount: crate::models::Money::from_cents(-100),
                    description: String::new(),
                    date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    category: None,
                    category_name: None,
                    category_icon: None,
                    category_color: None,
                    wallet: None,
                    wallet_name: None,
                    wallet_color: None,
                })
                .collect(),
            budget_status: Vec::new(),
            budgets: Vec::new(),
        }
    }

    fn app(runtime: &tokio::runtime::Runtime) -> (App, mpsc::Receiver<Event>) {
        let client = ApiClient::new("http://127.0.0.1:9/api/", SessionContext::in_memory()).unwrap();
        let (sender, receiver) = mpsc::channel();
        let app = App::new(client, Settings::default(), runtime.handle().clone(), sender);
        (app, receiver)
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let rt = runtime();
        let (mut app, _rx) = app(&rt);

        let stale = app.generation.next();
        let fresh = app.generation.next();

        app.on_loaded(stale, Ok(data(5)));
        assert!(app.data.is_none());

        app.on_loaded(fresh, Ok(data(2)));
        assert_eq!(app.transactions().len(), 2);
        assert!(!app.loading);
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let rt = runtime();
        let (mut app, _rx) = app(&rt);

        let first = app.generation.next();
        app.on_loaded(first, Ok(data(3)));

        let second = app.generation.next();
        let err = ClientError::ServerError {
            status: 500,
            message: "boom".into(),
        };
        app.on_loaded(second, Err(err.into()));

        assert_eq!(app.transactions().len(), 3);
        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.notification_type, NotificationType::Error);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_expired_session_quits_with_redirect() {
        let rt = runtime();
        let (mut app, _rx) = app(&rt);

        let generation = app.generation.next();
        let err = ClientError::SessionExpired {
            redirect: Route::login_expired(),
        };
        app.on_loaded(generation, Err(err.into()));

        assert!(app.should_quit);
        assert_eq!(app.redirect, Some(Route::login_expired()));
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_selection_is_clamped() {
        let rt = runtime();
        let (mut app, _rx) = app(&rt);
        app.switch_view(ActiveView::Transactions);

        let generation = app.generation.next();
        app.on_loaded(generation, Ok(data(2)));

        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_transaction_index, 1);

        app.move_up();
        app.move_up();
        assert_eq!(app.selected_transaction_index, 0);
    }

    #[test]
    fn test_delete_requires_selection() {
        let rt = runtime();
        let (mut app, _rx) = app(&rt);

        app.request_delete();
        assert_eq!(app.active_dialog, ActiveDialog::None);

        let generation = app.generation.next();
        app.on_loaded(generation, Ok(data(1)));
        app.request_delete();
        assert_eq!(
            app.active_dialog,
            ActiveDialog::ConfirmDelete(TransactionId::new(1))
        );
    }

    #[test]
    fn test_currency_falls_back_to_settings() {
        let rt = runtime();
        let (app, _rx) = app(&rt);
        assert_eq!(app.currency(), "FCFA");
    }

    #[test]
    fn test_view_cycle() {
        let rt = runtime();
        let (mut app, _rx) = app(&rt);
        app.cycle_view();
        assert_eq!(app.active_view, ActiveView::Transactions);
        app.cycle_view();
        app.cycle_view();
        assert_eq!(app.active_view, ActiveView::Dashboard);
    }

    #[test]
    fn test_generation_claimed_when_load_is_queued() {
        let rt = runtime();
        let (mut app, _rx) = app(&rt);
        let before = app.generation.current();

        // The idle runtime has not polled either task yet
        app.prev_month();
        app.prev_month();
        assert_eq!(app.generation.current(), before + 2);
        assert!(!app.generation.is_current(before + 1));

        app.filter_form.set_value(FilterField::Search, "loyer");
        app.on_filter_changed();
        assert!(app.debouncer.is_pending());
        assert_eq!(app.generation.current(), before + 3);
        assert_eq!(app.query.filter.q.as_deref(), Some("loyer"));
    }
}
