pub mod coordinates;
pub mod place;
pub mod poi;
pub mod route;

pub use coordinates::Coordinates;
pub use place::{PlaceCategory, PlaceRecord};
pub use poi::Poi;
pub use route::{
    RouteCandidate, RoutePath, RoutePoint, RouteProperties, ScaledProperties,
    ScaledRouteCandidate, ViaPoint,
};
