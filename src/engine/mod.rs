pub mod assignment;
pub mod availability;
pub mod dispatcher;
pub mod distance;
pub mod eligibility;
pub mod ranking;
pub mod selection;
