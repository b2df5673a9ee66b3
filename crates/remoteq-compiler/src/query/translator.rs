use std::sync::Arc;

use remoteq_core::Expr;
use tracing::{debug, debug_span};

use super::TranslatorProfile;
use crate::decompose::{Decomposer, RemoteDataParameter};
use crate::{Result, TranslatorConfig};

/// Compiles operator chains with one translator profile.
///
/// Cheap to create; the profile is shared.
#[derive(Clone, Debug, Default)]
pub struct QueryTranslator {
    profile: Arc<TranslatorProfile>,
}

impl QueryTranslator {
    pub fn new(profile: Arc<TranslatorProfile>) -> Self {
        Self { profile }
    }

    pub fn with_config(config: TranslatorConfig) -> Self {
        Self::new(Arc::new(TranslatorProfile {
            config,
            ..TranslatorProfile::default()
        }))
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.profile.config
    }

    pub fn translate(&self, chain: &Expr) -> Result<RemoteDataParameter> {
        let span = debug_span!("translate", query_type = %chain.ty());
        let _enter = span.enter();

        let profile = &self.profile;
        let param = Decomposer::new(&profile.literals, &profile.methods, &profile.config)
            .decompose(chain)?;

        debug!(
            query = %self.query_string(&param),
            executor = %param.executor,
            "chain translated"
        );
        Ok(param)
    }

    /// Render `param` honoring the configured filter encoding.
    pub fn query_string(&self, param: &RemoteDataParameter) -> String {
        param.render(self.profile.config.encode_filter)
    }
}
