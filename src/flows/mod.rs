pub mod checkout;
pub mod selection;
pub mod trip_planner;

pub use checkout::Checkout;
pub use selection::TripSelection;
pub use trip_planner::TripPlanner;
