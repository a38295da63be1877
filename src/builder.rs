use std::sync::Arc;

use crate::{
    Config, Result, WorkflowSqlExporter,
    utils::{Clock, IdGenerator, RandomIdGenerator, SystemClock},
};

pub struct ExporterBuilder {
    config: Config,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl Default for ExporterBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            clock: None,
            ids: None,
        }
    }
}

impl ExporterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn clock(
        mut self,
        clock: Arc<dyn Clock>,
    ) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(
        mut self,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(&self) -> Result<WorkflowSqlExporter> {
        let clock: Arc<dyn Clock> = match &self.clock {
            Some(clock) => clock.clone(),
            None => Arc::new(SystemClock),
        };
        let ids: Arc<dyn IdGenerator> = match &self.ids {
            Some(ids) => ids.clone(),
            None => Arc::new(RandomIdGenerator),
        };
        let exporter = WorkflowSqlExporter::with_providers(self.config.clone(), clock, ids);

        Ok(exporter)
    }
}
