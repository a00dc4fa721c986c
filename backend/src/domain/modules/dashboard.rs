//! Dashboard screen: the headline figures every role lands on.

use std::sync::Arc;

use crate::domain::error::ModuleError;
use crate::domain::menu::Screen;
use crate::domain::modules::authorize;
use crate::domain::ports::{DashboardGauges, DashboardSnapshot};
use crate::domain::session::Session;

/// Service behind the dashboard screen.
#[derive(Clone)]
pub struct DashboardService<G> {
    gauges: Arc<G>,
}

impl<G> DashboardService<G>
where
    G: DashboardGauges,
{
    /// Create a dashboard service over the given gauges.
    pub fn new(gauges: Arc<G>) -> Self {
        Self { gauges }
    }

    /// The current headline figures.
    pub fn overview(&self, session: &Session) -> Result<DashboardSnapshot, ModuleError> {
        authorize(session, Screen::Dashboard)?;
        Ok(self.gauges.snapshot()?)
    }
}
