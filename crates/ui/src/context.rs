use std::sync::Arc;

use exam_core::model::ImageCatalog;
use services::ExamService;

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn exam_service(&self) -> Arc<ExamService>;
    fn image_catalog(&self) -> ImageCatalog;
}

#[derive(Clone)]
pub struct AppContext {
    exam_service: Arc<ExamService>,
    images: Arc<ImageCatalog>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            exam_service: app.exam_service(),
            images: Arc::new(app.image_catalog()),
        }
    }

    #[must_use]
    pub fn exam_service(&self) -> Arc<ExamService> {
        Arc::clone(&self.exam_service)
    }

    #[must_use]
    pub fn images(&self) -> Arc<ImageCatalog> {
        Arc::clone(&self.images)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
