// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinates, LocationQuery, MapPlaceholder, MatchRule, PlaceholderKind, ResolvedLocation, VoteSelection, VotingOption};
pub use requests::{MapBoardRequest, ResolveLocationRequest, ValidateOptionRequest};
pub use responses::{ErrorResponse, HealthResponse, MapBoardResponse, ResolveLocationResponse, ValidateOptionResponse};
