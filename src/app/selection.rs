use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use gtk4::gio;
use gtk4::glib;
use gtk4::prelude::*;

use super::event_handler::{clear_preview, clear_result_rows};
use super::state::{AppState, show_toast, update_status};
use crate::session::SelectedFile;

/// Open the image chooser and feed the result into the session.
pub fn choose_file(state: &Rc<RefCell<AppState>>) {
    let window = match state.borrow().dashboard {
        Some(ref dash) => dash.window.clone(),
        None => return,
    };

    let filter = gtk4::FileFilter::new();
    filter.add_mime_type("image/*");
    filter.set_name(Some("Images"));

    let dialog = gtk4::FileDialog::builder()
        .title("Select an image")
        .default_filter(&filter)
        .modal(true)
        .build();

    let state_clone = state.clone();
    dialog.open(Some(&window), gio::Cancellable::NONE, move |result| {
        match result {
            Ok(file) => {
                if let Some(path) = file.path() {
                    on_file_chosen(&state_clone, path);
                }
            }
            Err(e) => log::info!("File selection dismissed: {e}"),
        }
    });
}

fn on_file_chosen(state: &Rc<RefCell<AppState>>, path: PathBuf) {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to read {}: {e}", path.display());
            show_toast(state, &format!("Could not read file: {e}"));
            return;
        }
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime = mime_for_path(&path);
    let size = bytes.len();

    let file = SelectedFile {
        name,
        mime: mime.to_string(),
        bytes,
    };
    let limit = state.borrow().config.max_upload_bytes;

    let selected = state.borrow_mut().session.select_file(file, limit);
    match selected {
        Ok(()) => {
            log::info!("Selected {} ({size} bytes, {mime})", path.display());
            clear_result_rows(state);
            show_preview(state);
            update_status(state, "Image ready");
        }
        Err(e) => {
            log::warn!("Rejected {}: {e}", path.display());
            clear_preview(state);
            clear_result_rows(state);
            show_toast(state, &e.to_string());
            update_status(state, "Idle");
        }
    }
}

/// Derive a preview texture from the selected bytes and show it. A file GDK
/// cannot decode keeps its selection; it just goes without a preview.
fn show_preview(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    let (Some(dash), Some(file)) = (s.dashboard.as_ref(), s.session.selected_file()) else {
        return;
    };

    match gtk4::gdk::Texture::from_bytes(&glib::Bytes::from(&file.bytes[..])) {
        Ok(texture) => {
            dash.preview.set_paintable(Some(&texture));
            dash.preview.set_visible(true);
        }
        Err(e) => {
            log::warn!("Preview decode failed for {}: {e}", file.name);
            dash.preview.set_paintable(gtk4::gdk::Paintable::NONE);
            dash.preview.set_visible(false);
        }
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}
