pub mod prelude;

pub mod equipment;
pub mod maintenance_events;
pub mod production_lines;
pub mod sites;
pub mod users;
