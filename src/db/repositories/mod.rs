pub mod equipment;
pub mod maintenance;
pub mod site;
pub mod user;
