use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use super::state::{AppState, BackendEvent, update_status};
use crate::session::SubmitTicket;

/// Dispatch the selected image to the classifier service on the tokio
/// runtime. A no-op when nothing is selected or a request is already in
/// flight.
pub fn dispatch_prediction(state: &Rc<RefCell<AppState>>) {
    let ticket = {
        let mut s = state.borrow_mut();
        let resubmitting = s.session.prediction().is_some();
        match s.session.begin_submit() {
            Some(ticket) => {
                if resubmitting {
                    log::info!("Resubmitting the current image");
                }
                ticket
            }
            None => {
                log::info!("Submit ignored: nothing to send");
                return;
            }
        }
    };

    update_status(state, "Classifying...");
    {
        let s = state.borrow();
        if let Some(ref dash) = s.dashboard {
            dash.submit_button.set_sensitive(false);
            dash.spinner.set_visible(true);
            dash.spinner.start();
        }
    }

    let SubmitTicket {
        generation,
        file_name,
        mime,
        bytes,
    } = ticket;
    let endpoint = state.borrow().config.endpoint.clone();
    let sender = state.borrow().backend_sender.clone();

    state.borrow().tokio_rt.spawn(async move {
        let event = match crate::classifier::predict(&endpoint, &file_name, &mime, bytes).await
        {
            Ok(prediction) => BackendEvent::PredictionComplete {
                generation,
                prediction,
            },
            Err(error) => BackendEvent::PredictionFailed { generation, error },
        };
        let _ = sender.send(event).await;
    });
}
