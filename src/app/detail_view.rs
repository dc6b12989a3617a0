use std::borrow::Cow;

use crate::core::display::{derive_display, VehicleDisplayModel};
use crate::core::normalizer::normalize_profile;
use crate::domain::model::{RawRecord, VehicleId, VehicleProfile};
use crate::domain::ports::VehicleSource;
use crate::utils::error::{CarstoolError, Result};

pub const NOT_FOUND_MESSAGE: &str = "Vehicle not found.";
pub const UNAVAILABLE_MESSAGE: &str = "Unable to load vehicle details.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Idle,
    Loading(VehicleId),
    Loaded(Box<LoadedVehicle>),
    NotFound(VehicleId),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedVehicle {
    pub profile: VehicleProfile,
    pub display: VehicleDisplayModel,
}

/// Single-use handle for one detail request. Consumed by [`DetailView::complete`].
#[derive(Debug)]
#[must_use = "a ticket must be completed for the request to leave the loading state"]
pub struct DetailTicket {
    seq: u64,
    id: VehicleId,
}

impl DetailTicket {
    pub fn id(&self) -> &VehicleId {
        &self.id
    }
}

/// The vehicle detail screen.
///
/// Starting a new request supersedes the outstanding one: its ticket goes
/// stale and its result is dropped when it arrives.
#[derive(Debug)]
pub struct DetailView {
    state: DetailState,
    seq: u64,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView {
    pub fn new() -> Self {
        Self {
            state: DetailState::Idle,
            seq: 0,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn begin(&mut self, id: VehicleId) -> DetailTicket {
        self.seq += 1;
        self.state = DetailState::Loading(id.clone());
        DetailTicket { seq: self.seq, id }
    }

    /// Applies a fetch result. Returns `false` when the ticket was superseded.
    pub fn complete(&mut self, ticket: DetailTicket, result: Result<RawRecord>) -> bool {
        if ticket.seq != self.seq {
            tracing::debug!("🔄 Dropping stale result for vehicle {}", ticket.id);
            return false;
        }

        self.state = match result.and_then(|raw| normalize_profile(&raw)) {
            Ok(profile) => {
                let display = derive_display(Some(&profile));
                DetailState::Loaded(Box::new(LoadedVehicle { profile, display }))
            }
            Err(CarstoolError::NotFound { .. }) => DetailState::NotFound(ticket.id),
            Err(e) => {
                tracing::error!("❌ Vehicle {} failed to load: {}", ticket.id, e);
                DetailState::Unavailable(UNAVAILABLE_MESSAGE.to_string())
            }
        };
        true
    }

    pub async fn load<S: VehicleSource + ?Sized>(&mut self, source: &S, id: VehicleId) {
        let ticket = self.begin(id);
        let result = source.fetch_vehicle(ticket.id()).await;
        self.complete(ticket, result);
    }

    /// Back to no selection; any outstanding request goes stale.
    pub fn reset(&mut self) {
        self.seq += 1;
        self.state = DetailState::Idle;
    }

    pub fn display(&self) -> Cow<'_, VehicleDisplayModel> {
        match &self.state {
            DetailState::Loaded(loaded) => Cow::Borrowed(&loaded.display),
            _ => Cow::Owned(derive_display(None)),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.state {
            DetailState::NotFound(_) => Some(NOT_FOUND_MESSAGE),
            DetailState::Unavailable(message) => Some(message),
            _ => None,
        }
    }
}
