// Domain layer - Filter, trip, aggregate and pagination models
pub mod aggregates;
pub mod dashboard;
pub mod filters;
pub mod pagination;
pub mod trips;
