use crate::client::{ChatBackend, HttpChatBackend};
use crate::config::WidgetConfig;
use crate::coordinator::SendCoordinator;
use crate::identity::SessionIdentity;
use crate::render::render_message_html;
use crate::storage::{self, KeyValueStore};
use crate::theme::ThemeController;
use crate::types::ChatMessage;
use std::rc::Rc;

/// Everything the page needs, built once at load.
pub struct WidgetController {
    pub config: WidgetConfig,
    pub theme: ThemeController,
    pub sender: SendCoordinator,
}

impl WidgetController {
    pub fn new(
        config: WidgetConfig,
        durable: Box<dyn KeyValueStore>,
        session: &dyn KeyValueStore,
        backend: Rc<dyn ChatBackend>,
    ) -> Self {
        let identity = SessionIdentity::load_or_create(session);
        Self {
            theme: ThemeController::new(durable),
            sender: SendCoordinator::new(backend, identity),
            config,
        }
    }

    /// Platform storage plus the HTTP backend described by `config`.
    pub fn setup(config: WidgetConfig) -> Self {
        let backend = HttpChatBackend::from_config(&config);
        tracing::info!(url = backend.url(), markup = ?config.markup, "chat widget ready");
        let session = storage::session_store();
        Self::new(config, storage::durable_store(), session.as_ref(), Rc::new(backend))
    }

    pub fn render(&self, message: &ChatMessage) -> String {
        render_message_html(&message.text, self.config.markup)
    }
}
