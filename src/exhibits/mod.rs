//! Stock definitions of the three exhibit panels.
//!
//! Each module provides the panel's phase sequence and a constructor wiring
//! it to its profile and trigger policy:
//!
//! | Panel | Sensor | Policy | Value shown |
//! |---|---|---|---|
//! | [`watering`] | touch pin | [`EdgePolicy`](crate::EdgePolicy) | pseudo-random 20-40 |
//! | [`heat`] | temperature | [`IncrementalPolicy`](crate::IncrementalPolicy) | temperature reading |
//! | [`traffic`] | light level | [`DropPolicy`](crate::DropPolicy) | fixed capacity |

pub mod heat;
pub mod traffic;
pub mod watering;
