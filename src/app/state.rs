use std::cell::RefCell;
use std::rc::Rc;

use crate::classifier::{ClassifierError, Prediction};
use crate::config::Config;
use crate::history::History;
use crate::session::Session;
use crate::ui::dashboard::DashboardWidgets;

/// Events sent from the tokio runtime back to the GTK main thread. Each one
/// carries the generation of the submission it answers, so the handler can
/// drop responses the session has since moved past.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    PredictionComplete {
        generation: u64,
        prediction: Prediction,
    },
    PredictionFailed {
        generation: u64,
        error: ClassifierError,
    },
}

/// Central application state. Lives on the GTK main thread inside Rc<RefCell<>>.
pub struct AppState {
    pub session: Session,
    pub config: Config,
    pub history: History,
    pub tokio_rt: tokio::runtime::Runtime,
    pub backend_sender: async_channel::Sender<BackendEvent>,

    // UI handles
    pub dashboard: Option<DashboardWidgets>,
}

impl AppState {
    pub fn new(sender: async_channel::Sender<BackendEvent>) -> Self {
        let config = Config::load();
        let history = History::load();
        let tokio_rt =
            tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

        Self {
            session: Session::new(),
            config,
            history,
            tokio_rt,
            backend_sender: sender,
            dashboard: None,
        }
    }
}

/// Helper to update the status label.
pub fn update_status(state: &Rc<RefCell<AppState>>, label_text: &str) {
    let s = state.borrow();
    if let Some(ref dash) = s.dashboard {
        dash.status_label.set_text(label_text);
    }
}

/// Pop a short toast over the dashboard.
pub fn show_toast(state: &Rc<RefCell<AppState>>, message: &str) {
    let s = state.borrow();
    if let Some(ref dash) = s.dashboard {
        let toast = libadwaita::Toast::new(message);
        toast.set_timeout(4);
        dash.toast_overlay.add_toast(toast);
    }
}
