//! Module lifecycle: startup, persistent handles and the info table.

use std::sync::Arc;

use serde::Serialize;

use crate::cluster::ClusterConfig;
use crate::error::{HostError, Result};
use crate::registry::ClassRegistry;
use crate::resources::{PersistentList, Release, ResourceKind};
use crate::settings::{self, Settings};

pub const EXTENSION_NAME: &str = "cassandra";
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Version of the native driver the binding is built against.
pub const DRIVER_VERSION: &str = "2.16.0";

/// Rows of the module information table.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    pub extension: &'static str,
    pub extension_version: &'static str,
    pub driver_version: &'static str,
    pub persistent_clusters: usize,
    pub persistent_sessions: usize,
    pub classes: usize,
    pub log: Option<String>,
    pub log_level: Option<String>,
}

pub struct Module<'a> {
    registry: &'static ClassRegistry,
    settings: Settings<'a>,
    clusters: PersistentList<Arc<ClusterConfig>>,
}

impl Module<'static> {
    /// Start the module against the process-wide log configuration.
    pub fn startup(ini: Option<&str>) -> Result<Self> {
        Module::new(Settings::global(), ini)
    }
}

impl<'a> Module<'a> {
    pub fn new(mut settings: Settings<'a>, ini: Option<&str>) -> Result<Self> {
        if let Some(text) = ini {
            settings.load_ini(text)?;
        }
        settings.startup();
        let registry = ClassRegistry::global();
        tracing::info!(
            version = EXTENSION_VERSION,
            driver = DRIVER_VERSION,
            classes = registry.len(),
            "module started"
        );
        Ok(Self { registry, settings, clusters: PersistentList::new(ResourceKind::Cluster) })
    }

    pub fn registry(&self) -> &'static ClassRegistry {
        self.registry
    }

    pub fn settings(&self) -> &Settings<'a> {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings<'a> {
        &mut self.settings
    }

    /// Cluster handle for `config`. Persistent configurations are shared by
    /// key; the first caller opens the handle.
    pub fn cluster(&self, config: ClusterConfig) -> Result<Arc<ClusterConfig>> {
        if !config.persistent {
            return Ok(Arc::new(config));
        }
        let key = config.persistent_key();
        self.clusters.get_or_insert_with(
            &key,
            || {
                tracing::debug!(key = %key, "opening persistent cluster");
                let release: Release<Arc<ClusterConfig>> = Box::new(|cluster| {
                    tracing::debug!(hosts = ?cluster.contact_points, "closing persistent cluster");
                });
                Ok::<_, HostError>((Arc::new(config), release))
            },
            Arc::clone,
        )
    }

    /// Drop the persistent cluster stored under `key`.
    pub fn close_cluster(&self, key: &str) -> bool {
        self.clusters.remove(key)
    }

    pub fn info(&self) -> ModuleInfo {
        ModuleInfo {
            extension: EXTENSION_NAME,
            extension_version: EXTENSION_VERSION,
            driver_version: DRIVER_VERSION,
            persistent_clusters: ResourceKind::Cluster.count(),
            persistent_sessions: ResourceKind::Session.count(),
            classes: self.registry.len(),
            log: self.settings.get_str(settings::LOG).map(str::to_string),
            log_level: self.settings.get_str(settings::LOG_LEVEL).map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ClusterBuilder;
    use crate::logging::{LogConfig, LogLevel};

    #[test]
    fn ini_is_applied_at_startup() {
        let log = LogConfig::new();
        let module = Module::new(Settings::new(&log), Some("cassandra.log_level = \"TRACE\"\n")).unwrap();
        assert_eq!(log.level(), LogLevel::Trace);
        let info = module.info();
        assert_eq!(info.extension, "cassandra");
        assert_eq!(info.log_level.as_deref(), Some("TRACE"));
        assert!(info.classes > 0);
    }

    #[test]
    fn persistent_clusters_are_shared() {
        let log = LogConfig::new();
        let module = Module::new(Settings::new(&log), None).unwrap();
        let mut builder = ClusterBuilder::new();
        builder.with_contact_points("10.1.1.1").unwrap();
        let a = module.cluster(builder.build()).unwrap();
        let b = module.cluster(builder.build()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(module.close_cluster(&a.persistent_key()));

        builder.with_persistent_sessions(false);
        let c = module.cluster(builder.build()).unwrap();
        let d = module.cluster(builder.build()).unwrap();
        assert!(!Arc::ptr_eq(&c, &d));
    }
}
