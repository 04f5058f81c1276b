//! Sensor subsystem: the DHT20 climate driver, its conditioning wrapper,
//! and the reservoir float switch with debounce.
//!
//! Unlike the actuators these never share a task: climate and water level
//! are sampled from dedicated threads and published through
//! [`crate::state::SharedState`].

pub mod climate;
pub mod dht20;
pub mod water_level;
