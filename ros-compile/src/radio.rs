//! Radio master/slave allocation.
//!
//! The router has exactly one physical radio per band. The first network to
//! claim a free band gets the physical interface (master); every later
//! network on that band becomes a virtual interface bound to it (slave). A
//! band already used as a station uplink or mesh trunk has no free master.

use serde::Serialize;
use tracing::debug;

use crate::intent::{Band, BandPair, NetworkIntent, NetworkRole};
use crate::options::CompileOptions;

/// How a network occupies one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioKind {
    /// Configures the physical radio.
    Master,
    /// Virtual interface bound to the physical radio.
    Slave,
}

/// Allocation of one network on one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadioAssignment {
    pub role: NetworkRole,
    pub band: Band,
    pub kind: RadioKind,
}

/// Allocations for every requested network, in request order, 2.4GHz first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RadioPlan {
    pub consumed: BandPair<bool>,
    pub assignments: Vec<RadioAssignment>,
}

impl RadioPlan {
    pub fn kind(&self, role: NetworkRole, band: Band) -> Option<RadioKind> {
        self.assignments
            .iter()
            .find(|a| a.role == role && a.band == band)
            .map(|a| a.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Allocate both bands for each role in order.
///
/// Disabled networks are allocated like enabled ones; whether a network is
/// switched on does not change which interface is physical.
pub fn allocate(roles: &[NetworkRole], consumed: BandPair<bool>) -> RadioPlan {
    let mut taken = consumed;
    let mut assignments = Vec::with_capacity(roles.len() * 2);

    for &role in roles {
        for band in Band::ALL {
            let slot = taken.get_mut(band);
            let kind = if *slot {
                RadioKind::Slave
            } else {
                *slot = true;
                RadioKind::Master
            };
            debug!(role = %role, band = %band, kind = ?kind, "allocated radio");
            assignments.push(RadioAssignment { role, band, kind });
        }
    }

    RadioPlan {
        consumed,
        assignments,
    }
}

/// Bands whose radio is already used by a station uplink or the mesh trunk.
pub fn consumed_bands(intent: &NetworkIntent, options: &CompileOptions) -> BandPair<bool> {
    let mut consumed = BandPair::new(false, false);

    let uplinks = intent
        .uplinks
        .all()
        .into_iter()
        .map(|(_, uplink)| uplink.interface.as_str());
    for interface in uplinks.chain(intent.inventory.trunk.as_deref()) {
        if let Some(band) = radio_band(intent, options, interface) {
            debug!(interface, band = %band, "radio consumed");
            *consumed.get_mut(band) = true;
        }
    }

    consumed
}

/// Band of `interface` when it is a radio: inventory first, then default names.
pub fn radio_band(intent: &NetworkIntent, options: &CompileOptions, interface: &str) -> Option<Band> {
    intent
        .inventory
        .band_of(interface)
        .or_else(|| options.band_of_radio(interface))
}

/// Allocation for the networks of an intent.
pub fn plan(intent: &NetworkIntent, options: &CompileOptions) -> RadioPlan {
    let roles: Vec<NetworkRole> = intent
        .wireless
        .networks()
        .into_iter()
        .map(|(role, _)| role)
        .collect();
    allocate(&roles, consumed_bands(intent, options))
}
