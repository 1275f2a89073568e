use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A resolved point of interest: the output of POI resolution.
/// Resolution failure is represented as `None` at the call site, not as
/// an error — callers decide whether a missing POI is fatal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poi {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Poi {
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        Poi { name, coordinates }
    }
}
