//! Request/response shapes and field-level validation for every resource.

pub mod image;
pub mod unavailability;
pub mod venue;

pub use image::{VenueImageCreate, VenueImageResponse, VenueImageUpdate};
pub use unavailability::{
    VenueUnavailabilityCreate, VenueUnavailabilityResponse, VenueUnavailabilityUpdate,
};
pub use venue::{
    DayHours, SportType, VenueCreate, VenueFilters, VenueListItem, VenueResponse, VenueStatus,
    VenueStatusUpdate, VenueUpdate, WeeklyHours,
};
