pub use super::equipment::Entity as Equipment;
pub use super::maintenance_events::Entity as MaintenanceEvents;
pub use super::production_lines::Entity as ProductionLines;
pub use super::sites::Entity as Sites;
pub use super::users::Entity as Users;
