use chat_widget::config::{self, WidgetConfig};

fn main() -> anyhow::Result<()> {
    let widget_config = WidgetConfig::load()?;
    chat_widget::logging::init(widget_config.log_level);
    tracing::info!(
        server = %widget_config.server_origin,
        endpoint = %widget_config.endpoint,
        "launching chat widget"
    );

    config::install(widget_config);
    dioxus::launch(chat_widget::ui::App);
    Ok(())
}
