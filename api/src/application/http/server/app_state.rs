use std::sync::Arc;

use pantryscan_core::application::PantryScanService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: Arc<PantryScanService>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: PantryScanService) -> Self {
        Self {
            args,
            service: Arc::new(service),
        }
    }
}
