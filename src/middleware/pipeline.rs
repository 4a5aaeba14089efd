//! Ordered, short-circuiting request stages.
//!
//! A [`Pipeline`] runs its [`Stage`]s in the order they were added. Each stage reads
//! and enriches the shared [`RequestContext`] and either lets the request continue or
//! fails it; the first failure aborts the remaining stages.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use flagpole_core::AppError;

use crate::middleware::auth::Principal;

/// Request-scoped data produced and consumed by stages.
#[derive(Debug, Default)]
pub struct RequestContext {
    pub token: Option<String>,
    pub principal: Option<Principal>,
}

impl RequestContext {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            principal: None,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Continue,
    Fail(AppError),
}

#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut RequestContext) -> Outcome;
}

#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then<S>(mut self, stage: S) -> Self
    where
        S: Stage + 'static,
    {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub async fn run(&self, ctx: &mut RequestContext) -> Result<(), AppError> {
        for stage in &self.stages {
            if let Outcome::Fail(err) = stage.run(ctx).await {
                tracing::debug!(stage = stage.name(), status = %err.status, "Pipeline stage failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Record {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    #[async_trait]
    impl Stage for Record {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn run(&self, _ctx: &mut RequestContext) -> Outcome {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                Outcome::Fail(AppError::forbidden(self.name))
            } else {
                Outcome::Continue
            }
        }
    }

    fn stage(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>, fail: bool) -> Record {
        Record {
            name,
            log: log.clone(),
            fail,
        }
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .then(stage("first", &log, false))
            .then(stage("second", &log, false));

        assert!(pipeline.run(&mut RequestContext::default()).await.is_ok());
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_first_failure_aborts_the_rest() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .then(stage("first", &log, true))
            .then(stage("second", &log, true));

        let err = pipeline
            .run(&mut RequestContext::default())
            .await
            .unwrap_err();

        assert_eq!(err.message(), "first");
        assert_eq!(*log.lock().unwrap(), vec!["first"]);
    }

    #[tokio::test]
    async fn test_empty_pipeline_continues() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.run(&mut RequestContext::default()).await.is_ok());
    }
}
