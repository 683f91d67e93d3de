use shared::{Coordinate, CreateTripRequest};

use crate::error::ValidationError;

/// Trip form contents, before the route is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    pub name: String,
    pub description: String,
}

impl TripDraft {
    /// Build the create request, or explain why it cannot be sent.
    pub fn finalize(&self, path: &[Coordinate]) -> Result<CreateTripRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if path.is_empty() {
            return Err(ValidationError::EmptyRoute);
        }

        Ok(CreateTripRequest {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            route: path.to_vec(),
        })
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.description.clear();
    }
}
