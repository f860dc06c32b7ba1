use serde::{Deserialize, Serialize};

use crate::db;
use crate::entities::{equipment, maintenance_events, sites};
use crate::fallback::{
    FALLBACK_CREATE_ID, FallbackEquipment, FallbackSite, FallbackStats, FallbackUser,
    PLACEHOLDER_TIMESTAMP,
};

fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER_TIMESTAMP.to_string())
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::User> for UserResponse {
    fn from(user: db::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_active: user.is_active,
            created_at: or_placeholder(user.created_at),
            updated_at: or_placeholder(user.updated_at),
        }
    }
}

impl From<&FallbackUser> for UserResponse {
    fn from(user: &FallbackUser) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
            email: user.email(),
            first_name: user.first_name(),
            last_name: user.last_name().to_string(),
            role: user.role.to_string(),
            is_active: true,
            created_at: PLACEHOLDER_TIMESTAMP.to_string(),
            updated_at: PLACEHOLDER_TIMESTAMP.to_string(),
        }
    }
}

fn default_status() -> String {
    "active".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub site_id: Option<i32>,
    #[serde(default)]
    pub production_line_id: Option<i32>,
}

impl From<EquipmentCreate> for db::NewEquipment {
    fn from(input: EquipmentCreate) -> Self {
        Self {
            name: input.name,
            description: input.description,
            status: input.status,
            location: input.location,
            site_id: input.site_id,
            production_line_id: input.production_line_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub location: Option<String>,
    pub site_id: Option<i32>,
    pub production_line_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<equipment::Model> for EquipmentResponse {
    fn from(model: equipment::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            status: model.status,
            location: model.location,
            site_id: model.site_id,
            production_line_id: model.production_line_id,
            created_at: or_placeholder(model.created_at),
            updated_at: or_placeholder(model.updated_at),
        }
    }
}

impl From<&FallbackEquipment> for EquipmentResponse {
    fn from(eq: &FallbackEquipment) -> Self {
        Self {
            id: eq.id,
            name: eq.name.to_string(),
            description: Some(eq.description.to_string()),
            status: eq.status.to_string(),
            location: Some(eq.location.to_string()),
            site_id: Some(eq.site_id),
            production_line_id: Some(eq.production_line_id),
            created_at: PLACEHOLDER_TIMESTAMP.to_string(),
            updated_at: PLACEHOLDER_TIMESTAMP.to_string(),
        }
    }
}

impl EquipmentResponse {
    /// Unpersisted echo of a create request: same synthetic id every time.
    #[must_use]
    pub fn echo(input: EquipmentCreate) -> Self {
        Self {
            id: FALLBACK_CREATE_ID,
            name: input.name,
            description: input.description,
            status: input.status,
            location: input.location,
            site_id: input.site_id,
            production_line_id: input.production_line_id,
            created_at: PLACEHOLDER_TIMESTAMP.to_string(),
            updated_at: PLACEHOLDER_TIMESTAMP.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<sites::Model> for SiteResponse {
    fn from(model: sites::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            location: model.location,
            created_at: or_placeholder(model.created_at),
            updated_at: or_placeholder(model.updated_at),
        }
    }
}

impl From<&FallbackSite> for SiteResponse {
    fn from(site: &FallbackSite) -> Self {
        Self {
            id: site.id,
            name: site.name.to_string(),
            description: Some(site.description.to_string()),
            location: Some(site.location.to_string()),
            created_at: PLACEHOLDER_TIMESTAMP.to_string(),
            updated_at: PLACEHOLDER_TIMESTAMP.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_equipment: u64,
    pub active_equipment: u64,
    pub maintenance_equipment: u64,
    pub out_of_service_equipment: u64,
    pub pending_maintenances: u64,
    pub completed_maintenances: u64,
}

impl From<FallbackStats> for DashboardStats {
    fn from(stats: FallbackStats) -> Self {
        Self {
            total_equipment: stats.total_equipment,
            active_equipment: stats.active_equipment,
            maintenance_equipment: stats.maintenance_equipment,
            out_of_service_equipment: stats.out_of_service_equipment,
            pending_maintenances: stats.pending_maintenances,
            completed_maintenances: stats.completed_maintenances,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MaintenanceEventDto {
    pub id: i32,
    pub title: String,
    pub start: String,
    pub end: String,
    pub equipment_id: Option<i32>,
    pub equipment_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub technician: Option<String>,
    pub description: Option<String>,
}

impl From<maintenance_events::Model> for MaintenanceEventDto {
    fn from(model: maintenance_events::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            start: model.start,
            end: model.end,
            equipment_id: model.equipment_id,
            equipment_name: model.equipment_name,
            kind: model.kind,
            status: model.status,
            technician: model.technician,
            description: model.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub version: String,
    pub database: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub environment: String,
    pub database: String,
}
