use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use libadwaita::prelude::*;

use super::state::{AppState, BackendEvent, show_toast, update_status};
use crate::classifier::Prediction;
use crate::render;
use crate::session::SubmitOutcome;

/// Handle a backend event. Every completion is routed through the session,
/// which is where stale responses (superseded by a reset or a new selection)
/// get dropped.
pub fn handle_backend_event(state: &Rc<RefCell<AppState>>, event: BackendEvent) {
    let outcome = match event {
        BackendEvent::PredictionComplete {
            generation,
            prediction,
        } => state
            .borrow_mut()
            .session
            .complete_submit(generation, Ok(prediction)),
        BackendEvent::PredictionFailed { generation, error } => state
            .borrow_mut()
            .session
            .complete_submit(generation, Err(error)),
    };

    match outcome {
        SubmitOutcome::Finished(prediction) => {
            finish_submit_ui(state);
            on_prediction_ready(state, prediction);
        }
        SubmitOutcome::Failed(error) => {
            log::error!("Prediction failed: {error}");
            finish_submit_ui(state);
            clear_preview(state);
            clear_result_rows(state);
            show_toast(state, error.user_message());
            update_status(state, "Idle");
        }
        SubmitOutcome::Stale => {
            log::info!("Discarding response for a superseded submission");
            // A selection made mid-flight left the submit controls locked;
            // release them once no request is live anymore. A reset already
            // restored them via clear_session.
            if !state.borrow().session.is_submitting() {
                finish_submit_ui(state);
            }
        }
    }
}

/// Reset the whole session. Valid at any time, including mid-submission;
/// the in-flight response will come back stale.
pub fn clear_session(state: &Rc<RefCell<AppState>>) {
    if state.borrow().session.is_submitting() {
        log::info!("Reset with a request in flight; its response will be discarded");
    }
    state.borrow_mut().session.reset();
    finish_submit_ui(state);
    clear_preview(state);
    clear_result_rows(state);
    update_status(state, "Idle");
}

fn on_prediction_ready(state: &Rc<RefCell<AppState>>, prediction: Prediction) {
    log::info!(
        "Prediction: {} (confidence {})",
        prediction.class,
        prediction.confidence
    );

    let verdict = {
        let s = state.borrow();
        render::project(&prediction, &s.config.positive_labels, &s.config.category)
    };

    {
        let mut s = state.borrow_mut();
        s.history.record_scan(&prediction, verdict.positive);
        if let Err(e) = s.history.save() {
            log::warn!("Failed to save history: {e}");
        }
    }

    {
        let s = state.borrow();
        if let Some(ref dash) = s.dashboard {
            dash.class_label.set_text(&verdict.class_text);
            dash.class_row
                .set_subtitle(verdict.note.as_deref().unwrap_or(""));
            dash.confidence_row.set_title(verdict.confidence_caption);
            dash.confidence_label.set_text(&verdict.confidence_text);
            dash.result_group.set_visible(true);
            dash.scans_label.set_text(&s.history.total_scans.to_string());
            dash.positive_label
                .set_text(&s.history.total_positive.to_string());
        }
    }

    update_status(state, if verdict.positive { "Positive" } else { "Negative" });
}

pub(crate) fn clear_preview(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    if let Some(ref dash) = s.dashboard {
        dash.preview.set_paintable(gtk4::gdk::Paintable::NONE);
        dash.preview.set_visible(false);
    }
}

pub(crate) fn clear_result_rows(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    if let Some(ref dash) = s.dashboard {
        dash.result_group.set_visible(false);
        dash.class_label.set_text("");
        dash.class_row.set_subtitle("");
        dash.confidence_row.set_title(render::NEGATIVE_CAPTION);
        dash.confidence_label.set_text("");
    }
}

fn finish_submit_ui(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    if let Some(ref dash) = s.dashboard {
        dash.spinner.stop();
        dash.spinner.set_visible(false);
        dash.submit_button.set_sensitive(true);
    }
}
