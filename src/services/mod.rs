pub mod poi_resolver;
pub mod providers;
pub mod recommender;
pub mod tmap;
