use std::sync::Arc;

use crate::application::services::PipelineService;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PipelineService>,
}
