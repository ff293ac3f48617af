use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::config::Config;
use crate::history::History;
use crate::render;

/// Handles returned from building the dashboard window.
pub struct DashboardWidgets {
    pub window: libadwaita::ApplicationWindow,
    pub toast_overlay: libadwaita::ToastOverlay,
    pub status_label: gtk4::Label,
    pub spinner: gtk4::Spinner,
    pub preview: gtk4::Picture,
    pub upload_button: gtk4::Button,
    pub submit_button: gtk4::Button,
    pub clear_button: gtk4::Button,
    pub result_group: libadwaita::PreferencesGroup,
    pub class_row: libadwaita::ActionRow,
    pub class_label: gtk4::Label,
    pub confidence_row: libadwaita::ActionRow,
    pub confidence_label: gtk4::Label,
    pub scans_label: gtk4::Label,
    pub positive_label: gtk4::Label,
    pub history_row: libadwaita::ActionRow,
    pub endpoint_row: libadwaita::EntryRow,
}

/// Build the main dashboard window.
pub fn build_dashboard(
    app: &libadwaita::Application,
    config: &Config,
    history: &History,
) -> DashboardWidgets {
    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title(&config.title)
        .default_width(450)
        .default_height(640)
        .build();

    let toast_overlay = libadwaita::ToastOverlay::new();
    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();
    toolbar_view.add_top_bar(&header);

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    // --- Status group ---
    let status_group = libadwaita::PreferencesGroup::new();
    status_group.set_title("Status");

    let status_row = libadwaita::ActionRow::builder()
        .title("Current State")
        .build();
    let status_label = gtk4::Label::new(Some("Idle"));
    status_label.add_css_class("dim-label");
    status_row.add_suffix(&status_label);
    let spinner = gtk4::Spinner::new();
    spinner.set_visible(false);
    status_row.add_suffix(&spinner);
    status_group.add(&status_row);

    content.append(&status_group);
    content.append(&gtk4::Separator::new(gtk4::Orientation::Horizontal));

    // --- Image group ---
    let image_group = libadwaita::PreferencesGroup::new();
    image_group.set_title("Image");
    image_group.set_margin_top(12);

    let upload_row = libadwaita::ActionRow::builder()
        .title("Dog Skin Photo")
        .subtitle("JPEG or PNG")
        .build();
    let upload_button = gtk4::Button::builder()
        .label("Upload")
        .valign(gtk4::Align::Center)
        .build();
    upload_row.add_suffix(&upload_button);
    image_group.add(&upload_row);

    content.append(&image_group);

    let preview = gtk4::Picture::new();
    preview.set_content_fit(gtk4::ContentFit::Cover);
    preview.set_height_request(300);
    preview.set_margin_top(12);
    preview.set_visible(false);
    content.append(&preview);

    content.append(&gtk4::Separator::new(gtk4::Orientation::Horizontal));

    // --- Result group ---
    let result_group = libadwaita::PreferencesGroup::new();
    result_group.set_title("Result");
    result_group.set_margin_top(12);
    result_group.set_visible(false);

    let class_row = libadwaita::ActionRow::builder().title("Class").build();
    let class_label = gtk4::Label::new(None);
    class_label.add_css_class("accent");
    class_row.add_suffix(&class_label);
    result_group.add(&class_row);

    let confidence_row = libadwaita::ActionRow::builder()
        .title(render::NEGATIVE_CAPTION)
        .build();
    let confidence_label = gtk4::Label::new(None);
    confidence_label.add_css_class("dim-label");
    confidence_row.add_suffix(&confidence_label);
    result_group.add(&confidence_row);

    content.append(&result_group);

    // --- Submit / Clear ---
    let actions = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    actions.set_margin_top(12);
    actions.set_halign(gtk4::Align::Center);

    let submit_button = gtk4::Button::builder().label("Submit").build();
    submit_button.add_css_class("suggested-action");
    actions.append(&submit_button);

    let clear_button = gtk4::Button::builder().label("Clear").build();
    actions.append(&clear_button);

    content.append(&actions);
    content.append(&gtk4::Separator::new(gtk4::Orientation::Horizontal));

    // --- History group ---
    let history_group = libadwaita::PreferencesGroup::new();
    history_group.set_title("History");
    history_group.set_margin_top(12);

    let scans_row = libadwaita::ActionRow::builder()
        .title("Total Scans")
        .build();
    let scans_label = gtk4::Label::new(Some(&history.total_scans.to_string()));
    scans_label.add_css_class("dim-label");
    scans_row.add_suffix(&scans_label);
    history_group.add(&scans_row);

    let positive_row = libadwaita::ActionRow::builder()
        .title("Positive Results")
        .build();
    let positive_label = gtk4::Label::new(Some(&history.total_positive.to_string()));
    positive_label.add_css_class("dim-label");
    positive_row.add_suffix(&positive_label);
    history_group.add(&positive_row);

    let history_row = libadwaita::ActionRow::builder()
        .title("Scan History")
        .activatable(true)
        .build();
    let chevron = gtk4::Image::from_icon_name("go-next-symbolic");
    history_row.add_suffix(&chevron);
    history_group.add(&history_row);

    content.append(&history_group);
    content.append(&gtk4::Separator::new(gtk4::Orientation::Horizontal));

    // --- Service group ---
    let service_group = libadwaita::PreferencesGroup::new();
    service_group.set_title("Classifier Service");
    service_group.set_margin_top(12);

    let endpoint_row = libadwaita::EntryRow::builder()
        .title("Endpoint")
        .text(&config.endpoint)
        .build();
    service_group.add(&endpoint_row);

    content.append(&service_group);

    // Assemble
    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&content)
        .build();
    toolbar_view.set_content(Some(&scrolled));
    toast_overlay.set_child(Some(&toolbar_view));
    window.set_content(Some(&toast_overlay));

    DashboardWidgets {
        window,
        toast_overlay,
        status_label,
        spinner,
        preview,
        upload_button,
        submit_button,
        clear_button,
        result_group,
        class_row,
        class_label,
        confidence_row,
        confidence_label,
        scans_label,
        positive_label,
        history_row,
        endpoint_row,
    }
}
