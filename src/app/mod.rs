mod event_handler;
mod pipeline;
mod selection;
mod state;

pub use event_handler::{clear_session, handle_backend_event};
pub use pipeline::dispatch_prediction;
pub use selection::choose_file;
pub use state::{AppState, BackendEvent};
