//! Asset readiness gate.
//!
//! The tank only opens once every required image has loaded. Instead of a bare
//! load counter the gate keeps a status per asset, so a failed load or a
//! timeout surfaces as an [`AssetError`] rather than a game that never starts.

/// Load status of a single asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed(String),
}

/// Overall readiness of the gate
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    Waiting { loaded: usize, total: usize },
    Ready,
    Failed(AssetError),
}

/// Tracks a fixed set of named assets until all are loaded or one fails
#[derive(Debug, Clone)]
pub struct AssetGate {
    assets: Vec<(String, AssetStatus)>,
    elapsed_ms: f64,
    timeout_ms: Option<f64>,
}

impl AssetGate {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            assets: names
                .into_iter()
                .map(|name| (name.into(), AssetStatus::Pending))
                .collect(),
            elapsed_ms: 0.0,
            timeout_ms: None,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: Option<f64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn mark_loaded(&mut self, name: &str) {
        self.set_status(name, AssetStatus::Loaded);
    }

    pub fn mark_failed(&mut self, name: &str, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Asset {} failed to load: {}", name, reason);
        self.set_status(name, AssetStatus::Failed(reason));
    }

    fn set_status(&mut self, name: &str, status: AssetStatus) {
        match self.assets.iter_mut().find(|(n, _)| n == name) {
            // A failure is final
            Some((_, current)) if matches!(current, AssetStatus::Failed(_)) => {}
            Some((_, current)) => *current = status,
            None => log::warn!("Asset gate has no entry named {}", name),
        }
    }

    pub fn status(&self, name: &str) -> Option<&AssetStatus> {
        self.assets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, status)| status)
    }

    /// Advance the wait clock
    pub fn tick(&mut self, delta_ms: f64) {
        self.elapsed_ms += delta_ms.max(0.0);
    }

    pub fn pending(&self) -> Vec<String> {
        self.assets
            .iter()
            .filter(|(_, status)| *status == AssetStatus::Pending)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn readiness(&self) -> Readiness {
        if let Some((name, AssetStatus::Failed(reason))) = self
            .assets
            .iter()
            .find(|(_, status)| matches!(status, AssetStatus::Failed(_)))
        {
            return Readiness::Failed(AssetError::LoadFailed {
                name: name.clone(),
                reason: reason.clone(),
            });
        }

        let total = self.assets.len();
        let loaded = self
            .assets
            .iter()
            .filter(|(_, status)| *status == AssetStatus::Loaded)
            .count();

        if loaded == total {
            return Readiness::Ready;
        }

        match self.timeout_ms {
            Some(timeout) if self.elapsed_ms > timeout => Readiness::Failed(AssetError::TimedOut {
                pending: self.pending(),
                waited_ms: self.elapsed_ms,
            }),
            _ => Readiness::Waiting { loaded, total },
        }
    }
}

/// Why the tank could not open
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    LoadFailed { name: String, reason: String },
    TimedOut { pending: Vec<String>, waited_ms: f64 },
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::LoadFailed { name, reason } => {
                write!(f, "Failed to load {}: {}", name, reason)
            }
            AssetError::TimedOut { pending, waited_ms } => write!(
                f,
                "Gave up after {:.0} ms waiting for {}",
                waited_ms,
                pending.join(", ")
            ),
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_after_all_loaded() {
        let mut gate = AssetGate::new(["background", "sheet"]);
        assert_eq!(gate.readiness(), Readiness::Waiting { loaded: 0, total: 2 });

        gate.mark_loaded("sheet");
        assert_eq!(gate.readiness(), Readiness::Waiting { loaded: 1, total: 2 });

        gate.mark_loaded("background");
        assert_eq!(gate.readiness(), Readiness::Ready);
    }

    #[test]
    fn test_failure_is_reported() {
        let mut gate = AssetGate::new(["background", "sheet"]);
        gate.mark_loaded("background");
        gate.mark_failed("sheet", "file not found");
        // Later success cannot mask the failure
        gate.mark_loaded("sheet");
        assert_eq!(
            gate.status("sheet"),
            Some(&AssetStatus::Failed("file not found".into()))
        );
        assert_eq!(gate.status("background"), Some(&AssetStatus::Loaded));
        assert_eq!(gate.status("music"), None);

        assert_eq!(
            gate.readiness(),
            Readiness::Failed(AssetError::LoadFailed {
                name: "sheet".into(),
                reason: "file not found".into(),
            })
        );
    }

    #[test]
    fn test_timeout() {
        let mut gate = AssetGate::new(["background", "sheet"]).with_timeout(Some(1000.0));
        gate.mark_loaded("background");
        gate.tick(600.0);
        assert!(matches!(gate.readiness(), Readiness::Waiting { .. }));

        gate.tick(600.0);
        match gate.readiness() {
            Readiness::Failed(AssetError::TimedOut { pending, .. }) => {
                assert_eq!(pending, vec!["sheet".to_string()]);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_no_timeout_waits_forever() {
        let mut gate = AssetGate::new(["background"]);
        gate.tick(1.0e9);
        assert!(matches!(gate.readiness(), Readiness::Waiting { .. }));
    }
}
