//! Dashboard state for one network view.
//!
//! DESIGN
//! ======
//! `AssetBoard` is plain component-local state: two registry panels (records,
//! picker options, focused id, loading flag) plus one shared error banner.
//! `reset` is the single entry point for a network change. Every load is
//! tagged with the epoch it started in, and `finish_load` drops results whose
//! epoch is stale, so a slow load for a previous network can never overwrite
//! the current one.
//!
//! ERROR HANDLING
//! ==============
//! A failed load puts the error text in the banner and clears that panel's
//! loading flag. The panel keeps whatever it held before (empty after reset).

use crate::chain::{ChainConnector, ChainError, RegistryKind};
use crate::network::Network;
use crate::registry::{AssetRecord, DropdownOption, Registry, load_registry};

/// Records and picker state for one registry kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryPanel {
    pub records: Vec<AssetRecord>,
    pub options: Vec<DropdownOption>,
    pub focus: Option<u128>,
    pub loading: bool,
}

impl RegistryPanel {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Points at which [`AssetBoard::refresh`] hands the board to its observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStep {
    /// Both loads started; both panels are loading.
    Started,
    /// The load for this kind was applied. `External` always comes first.
    Finished(RegistryKind),
}

/// Proof that a load was started; hand it back to `finish_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
    kind: RegistryKind,
}

impl LoadTicket {
    #[must_use]
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }
}

#[derive(Debug, Clone)]
pub struct AssetBoard {
    network: Network,
    epoch: u64,
    local: RegistryPanel,
    external: RegistryPanel,
    error: Option<String>,
}

impl AssetBoard {
    #[must_use]
    pub fn new(network: Network) -> Self {
        Self {
            network,
            epoch: 0,
            local: RegistryPanel::default(),
            external: RegistryPanel::default(),
            error: None,
        }
    }

    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    #[must_use]
    pub fn panel(&self, kind: RegistryKind) -> &RegistryPanel {
        match kind {
            RegistryKind::Local => &self.local,
            RegistryKind::External => &self.external,
        }
    }

    fn panel_mut(&mut self, kind: RegistryKind) -> &mut RegistryPanel {
        match kind {
            RegistryKind::Local => &mut self.local,
            RegistryKind::External => &mut self.external,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch to `network`: drop both registries, options, focus, and error.
    pub fn reset(&mut self, network: Network) {
        self.network = network;
        self.epoch += 1;
        for kind in RegistryKind::ALL {
            self.panel_mut(kind).clear();
        }
        self.error = None;
    }

    /// Mark `kind` as loading and clear the banner.
    pub fn begin_load(&mut self, kind: RegistryKind) -> LoadTicket {
        self.panel_mut(kind).loading = true;
        self.error = None;
        LoadTicket { epoch: self.epoch, kind }
    }

    /// Apply a finished load. Returns `false` if the ticket is stale and the
    /// result was discarded.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Registry, ChainError>) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(kind = ticket.kind().as_str(), "discarding stale registry load");
            return false;
        }
        let panel = self.panel_mut(ticket.kind());
        panel.loading = false;
        match result {
            Ok(registry) => {
                panel.options = registry.options;
                panel.records = registry.records;
            }
            Err(err) => {
                tracing::warn!(network = %self.network, kind = ticket.kind().as_str(), error = %err, "registry load failed");
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Load both registries concurrently and apply the results.
    ///
    /// `observe` sees the board at each [`RefreshStep`], in page order: the
    /// external result is applied as soon as it lands, the local one after
    /// both loads are done.
    pub async fn refresh(
        &mut self,
        connector: &dyn ChainConnector,
        concurrency: usize,
        mut observe: impl FnMut(&Self, RefreshStep),
    ) {
        let external = self.begin_load(RegistryKind::External);
        let local = self.begin_load(RegistryKind::Local);
        let network = self.network;
        observe(self, RefreshStep::Started);

        let ((), local_result) = tokio::join!(
            async {
                let result = load_registry(connector, network, RegistryKind::External, concurrency).await;
                self.finish_load(external, result);
                observe(self, RefreshStep::Finished(RegistryKind::External));
            },
            load_registry(connector, network, RegistryKind::Local, concurrency),
        );

        self.finish_load(local, local_result);
        observe(self, RefreshStep::Finished(RegistryKind::Local));
    }

    /// Set or clear the focused asset for `kind`.
    pub fn select(&mut self, kind: RegistryKind, asset_id: Option<u128>) {
        self.panel_mut(kind).focus = asset_id;
    }

    /// The focused record, if an id is selected and present in the registry.
    #[must_use]
    pub fn focused(&self, kind: RegistryKind) -> Option<&AssetRecord> {
        let panel = self.panel(kind);
        let id = panel.focus?;
        panel.records.iter().find(|r| r.asset_id == id)
    }
}

#[cfg(test)]
#[path = "board_test.rs"]
mod tests;
