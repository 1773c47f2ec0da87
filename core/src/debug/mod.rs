//! Debug inspection system
//!
//! Mirrors the debug-visible part of the live graph in an inspector UI and
//! feeds edits made there back into the graph.
//!
//! # Overview
//!
//! Every update the [`DebugInspector`] reconciles the graph against the tree it
//! displayed last time ([`reconcile`]) and applies the resulting [`UiOp`]s to an
//! [`InspectorHost`]. Hosts report edited values as [`ControlEdit`]s, which
//! [`DebugInspector::apply_edit`] writes into the owning parameter.
//!
//! - Debug-visible nodes become folders; folders without controls are not shown
//! - Debug-visible parameters become controls chosen by their debug kind
//! - Values are only pushed into a control when they changed

pub mod edit;
pub mod host;
pub mod panel;
pub mod reconcile;
pub mod types;

pub use edit::{ControlEdit, EditError, apply_edit};
pub use host::InspectorHost;
pub use panel::EguiInspector;
pub use reconcile::{Reconciled, UiOp, reconcile};
pub use types::{ControlKind, DisplayControl, DisplayFolder};

use crate::config::InspectorConfig;
use crate::sync::SyncNode;

/// Keeps a host in step with the graph across updates
#[derive(Debug, Clone, Default)]
pub struct DebugInspector {
    config: InspectorConfig,
    displayed: DisplayFolder,
}

impl DebugInspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config,
            displayed: DisplayFolder::root(),
        }
    }

    /// What the host is showing
    pub fn displayed(&self) -> &DisplayFolder {
        &self.displayed
    }

    /// Reconcile once and drive the host.
    ///
    /// Returns the number of operations applied.
    pub fn update(&mut self, root: &dyn SyncNode, host: &mut dyn InspectorHost) -> usize {
        let Reconciled { displayed, ops } = reconcile(root, &self.displayed, &self.config);
        for op in &ops {
            op.apply(host);
        }
        if !ops.is_empty() {
            tracing::debug!("Inspector updated with {} operations", ops.len());
        }
        self.displayed = displayed;
        ops.len()
    }

    /// Write a host edit into the graph.
    ///
    /// The control already shows the edited value, so it is recorded as
    /// displayed and the next update leaves the control alone.
    pub fn apply_edit(
        &mut self,
        root: &mut dyn SyncNode,
        edit: &ControlEdit,
    ) -> Result<(), EditError> {
        edit::apply_edit(root, edit)?;
        if let Some(control) = self.displayed.control_mut(&edit.folders, &edit.name) {
            control.value = edit.value.clone();
        }
        Ok(())
    }

    /// Forget the displayed tree (after the host was cleared)
    pub fn reset(&mut self) {
        self.displayed = DisplayFolder::root();
    }
}
