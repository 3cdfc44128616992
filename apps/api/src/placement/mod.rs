// Placement: applications, project submissions, mock interviews,
// notifications, readiness and offer letters.

pub mod handlers;
pub mod offer;
pub mod readiness;
pub mod tracking;
