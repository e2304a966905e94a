mod bridge_world;
mod setups;
mod steps;

pub use bridge_world::BridgeWorld;
