//! The `Rocket` aggregate: the fleet-side source of flight capacity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Capacity, RocketId, RocketName};

/// A rocket in the fleet.
///
/// A rocket's capacity is copied into each flight at schedule time; later
/// changes to the rocket never retroactively alter an existing flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rocket {
    id: Option<RocketId>,
    name: RocketName,
    capacity: Capacity,
    max_speed: Option<Decimal>,
}

impl Rocket {
    /// Registers a new rocket. The capacity is already validated by its type.
    pub const fn register(name: RocketName, capacity: Capacity, max_speed: Option<Decimal>) -> Self {
        Self {
            id: None,
            name,
            capacity,
            max_speed,
        }
    }

    /// Rehydrates a rocket from storage.
    pub const fn restore(
        id: RocketId,
        name: RocketName,
        capacity: Capacity,
        max_speed: Option<Decimal>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            capacity,
            max_speed,
        }
    }

    /// The rocket identity, absent before first save.
    pub const fn id(&self) -> Option<&RocketId> {
        self.id.as_ref()
    }

    /// Assigns the storage identity. Called once, by storage, on first save.
    pub fn assign_id(&mut self, id: RocketId) {
        self.id = Some(id);
    }

    /// The rocket's display name.
    pub const fn name(&self) -> &RocketName {
        &self.name
    }

    /// The validated passenger capacity.
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Maximum speed, informational only.
    pub const fn max_speed(&self) -> Option<Decimal> {
        self.max_speed
    }
}
