mod app;
mod classifier;
mod config;
mod history;
mod render;
mod session;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use libadwaita::prelude::*;

use app::{AppState, BackendEvent};

fn main() {
    env_logger::init();
    log::info!("DermaScan starting");

    let application = libadwaita::Application::builder()
        .application_id("com.github.dermascan.DermaScan")
        .build();

    application.connect_activate(on_activate);
    application.run();
}

fn on_activate(app: &libadwaita::Application) {
    // Async channel for backend → UI communication
    let (backend_tx, backend_rx) = async_channel::unbounded::<BackendEvent>();

    // Build app state
    let state = Rc::new(RefCell::new(AppState::new(backend_tx)));

    // Build UI
    let dashboard =
        ui::dashboard::build_dashboard(app, &state.borrow().config, &state.borrow().history);

    // Wire up the upload button
    {
        let state_clone = state.clone();
        dashboard.upload_button.connect_clicked(move |_| {
            app::choose_file(&state_clone);
        });
    }

    // Wire up submit
    {
        let state_clone = state.clone();
        dashboard.submit_button.connect_clicked(move |_| {
            app::dispatch_prediction(&state_clone);
        });
    }

    // Wire up clear
    {
        let state_clone = state.clone();
        dashboard.clear_button.connect_clicked(move |_| {
            app::clear_session(&state_clone);
        });
    }

    // Wire up endpoint changes
    {
        let state_clone = state.clone();
        dashboard
            .endpoint_row
            .connect_changed(move |row: &libadwaita::EntryRow| {
                let endpoint = row.text().to_string();
                let mut s = state_clone.borrow_mut();
                s.config.endpoint = endpoint;
                if let Err(e) = s.config.save() {
                    log::warn!("Failed to save config: {e}");
                }
            });
    }

    // Wire up history row to open the scan history
    {
        let state_clone = state.clone();
        let dash_window = dashboard.window.clone();
        dashboard.history_row.connect_activated(move |_| {
            let records = state_clone.borrow().history.records.clone();
            ui::history::show_history_window(&dash_window, &records);
        });
    }

    // Store UI handles in state
    {
        let mut s = state.borrow_mut();
        s.dashboard = Some(dashboard);
    }

    // Show the dashboard
    state.borrow().dashboard.as_ref().unwrap().window.present();

    // Attach backend event handler
    {
        let state_clone = state.clone();
        gtk4::glib::spawn_future_local(async move {
            while let Ok(event) = backend_rx.recv().await {
                app::handle_backend_event(&state_clone, event);
            }
        });
    }
}
