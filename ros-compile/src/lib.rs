//! Compile declarative router network intent into RouterOS command sections.
//!
//! The input is a [`NetworkIntent`](intent::NetworkIntent): wireless
//! networks by role, uplinks, VPN clients and generic tunnels. The output is
//! a [`CommandMap`](section::CommandMap): command lines grouped by
//! configuration section, in an order that can be pasted into a router.
//! Compilation is a pure function; nothing here talks to a device.
//!
//! # Architecture
//!
//! - [`intent`] — input model and TOML/JSON loading
//! - [`options`] — device constants (radio names, list names, distances)
//! - [`naming`] — derived interface, bridge, list and steering names
//! - [`radio`] — master/slave allocation of the two radios
//! - [`build`] — per-feature builders (LAN, wireless, WAN, VPN, tunnels)
//! - [`compile`] — runs the builders and merges their output
//! - [`section`] — the closed set of configuration sections
//!
//! # Examples
//!
//! ```ignore
//! use ros_compile::compile::compile;
//! use ros_compile::intent::load_intent;
//! use ros_compile::options::default_options;
//!
//! let intent = load_intent("home.toml".as_ref())?;
//! let script = compile(&intent, &default_options())?;
//! print!("{}", section_map::format_text(&script));
//! ```

pub mod build;
pub mod compile;
pub mod error;
pub mod intent;
pub mod naming;
pub mod options;
pub mod radio;
pub mod section;
