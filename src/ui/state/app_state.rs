use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::catalog::Section;
use crate::domain::entities::report::Report;
use crate::domain::entities::report_filter::ReportFilter;
use crate::usecase::services::dataset_service::DatasetService;
use crate::usecase::services::report_service::{ReportListState, ReportService};

/// Services shared with every view through the context API.
#[derive(Clone)]
pub struct AppServices {
    pub reports: Arc<ReportService>,
    pub datasets: Arc<DatasetService>,
}

#[derive(Clone, Copy)]
pub struct Navigation {
    pub section: Signal<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalMode {
    Add,
    Edit(Report),
}

/// Signals owned by one report board instance.
pub struct ReportBoardState {
    pub reports: Signal<ReportListState>,
    pub reload: Signal<u64>,
    pub filter: Signal<ReportFilter>,
    pub modal: Signal<Option<ModalMode>>,
    pub form_error: Signal<Option<String>>,
    pub action_error: Signal<Option<String>>,
    pub busy: Signal<bool>,
}

impl ReportBoardState {
    pub fn new() -> Self {
        Self {
            reports: use_signal(ReportListState::default),
            reload: use_signal(|| 0_u64),
            filter: use_signal(ReportFilter::default),
            modal: use_signal(|| None::<ModalMode>),
            form_error: use_signal(|| None::<String>),
            action_error: use_signal(|| None::<String>),
            busy: use_signal(|| false),
        }
    }
}
