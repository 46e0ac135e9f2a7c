//! Per-feature command builders.
//!
//! Each builder is a pure function from (part of) the intent to its own
//! [`CommandMap`](crate::section::CommandMap); the compiler merges them.

pub mod lan;
pub mod multilink;
pub mod route;
pub mod tunnel;
pub mod vpn;
pub mod wan;
pub mod wireless;

/// Dedicated table of the VPN link class.
pub const VPN_TABLE: &str = "to-VPN";

/// Forwarder resolving through the Foreign uplink.
pub const FOREIGN_DNS: &str = "Foreign-DNS";

/// Facts about the uplinks that the VPN builder depends on.
#[derive(Debug, Clone)]
pub struct UplinkContext<'a> {
    /// A domestic uplink owns the main table; nothing is duplicated into it.
    pub has_domestic: bool,
    /// Next hop of the primary Foreign uplink.
    pub foreign_gateway: String,
    /// Failover probe hosts reserved for the VPN link class.
    pub probes: &'a [String],
}
