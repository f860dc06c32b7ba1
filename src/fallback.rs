//! Static substitute data served when the persistent store is unavailable.
//!
//! The dataset is built once at startup and injected into the handlers via
//! shared state. It is immutable for the lifetime of the process: writes in
//! fallback mode are never persisted.

/// Sentinel substituted for absent timestamps. Callers must tolerate this
/// placeholder and not treat it as a real creation time.
pub const PLACEHOLDER_TIMESTAMP: &str = "2025-01-01T00:00:00Z";

/// Synthetic id returned by equipment creation when no store is backing the
/// write. Every fallback create returns the same id.
pub const FALLBACK_CREATE_ID: i32 = 999;

/// Test credential. Password is stored in the clear on purpose: this table
/// only exists behind the explicit fallback flag, never in production mode.
#[derive(Debug, Clone)]
pub struct FallbackUser {
    pub id: i32,
    pub username: &'static str,
    pub password: &'static str,
    pub role: &'static str,
}

impl FallbackUser {
    #[must_use]
    pub fn email(&self) -> String {
        format!("{}@maintenance.com", self.username)
    }

    #[must_use]
    pub fn first_name(&self) -> String {
        let mut chars = self.username.chars();
        chars.next().map_or_else(String::new, |c| {
            c.to_uppercase().collect::<String>() + chars.as_str()
        })
    }

    #[must_use]
    pub const fn last_name(&self) -> &'static str {
        "User"
    }
}

#[derive(Debug, Clone)]
pub struct FallbackEquipment {
    pub id: i32,
    pub name: &'static str,
    pub description: &'static str,
    pub status: &'static str,
    pub location: &'static str,
    pub site_id: i32,
    pub production_line_id: i32,
}

#[derive(Debug, Clone)]
pub struct FallbackSite {
    pub id: i32,
    pub name: &'static str,
    pub description: &'static str,
    pub location: &'static str,
}

/// Fixed dashboard counts served in fallback mode.
#[derive(Debug, Clone, Copy)]
pub struct FallbackStats {
    pub total_equipment: u64,
    pub active_equipment: u64,
    pub maintenance_equipment: u64,
    pub out_of_service_equipment: u64,
    pub pending_maintenances: u64,
    pub completed_maintenances: u64,
}

/// The complete substitute dataset.
#[derive(Debug, Clone)]
pub struct FallbackDataset {
    pub users: Vec<FallbackUser>,
    pub equipment: Vec<FallbackEquipment>,
    pub sites: Vec<FallbackSite>,
    pub stats: FallbackStats,
}

impl FallbackDataset {
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: vec![
                FallbackUser {
                    id: 1,
                    username: "admin",
                    password: "admin123",
                    role: "admin",
                },
                FallbackUser {
                    id: 2,
                    username: "super1",
                    password: "super123",
                    role: "supervisor",
                },
                FallbackUser {
                    id: 3,
                    username: "tech1",
                    password: "tech123",
                    role: "technician",
                },
            ],
            equipment: vec![
                FallbackEquipment {
                    id: 1,
                    name: "Compresseur A1",
                    description: "Compresseur principal ligne 1",
                    status: "active",
                    location: "Atelier A",
                    site_id: 1,
                    production_line_id: 1,
                },
                FallbackEquipment {
                    id: 2,
                    name: "Convoyeur B2",
                    description: "Convoyeur ligne 2",
                    status: "maintenance",
                    location: "Atelier B",
                    site_id: 1,
                    production_line_id: 2,
                },
            ],
            sites: vec![FallbackSite {
                id: 1,
                name: "Site Principal",
                description: "Site de production principal",
                location: "Paris, France",
            }],
            stats: FallbackStats {
                total_equipment: 25,
                active_equipment: 20,
                maintenance_equipment: 3,
                out_of_service_equipment: 2,
                pending_maintenances: 5,
                completed_maintenances: 15,
            },
        }
    }

    #[must_use]
    pub fn user(&self, username: &str) -> Option<&FallbackUser> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Plaintext comparison. Only reachable in fallback mode.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> Option<&FallbackUser> {
        self.user(username).filter(|u| u.password == password)
    }
}

impl Default for FallbackDataset {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_dataset_shape() {
        let dataset = FallbackDataset::seeded();
        assert_eq!(dataset.users.len(), 3);
        assert_eq!(dataset.equipment.len(), 2);
        assert_eq!(dataset.equipment[0].id, 1);
        assert_eq!(dataset.equipment[1].id, 2);
        assert_eq!(dataset.sites.len(), 1);
        assert_eq!(dataset.stats.total_equipment, 25);
    }

    #[test]
    fn test_verify_credentials() {
        let dataset = FallbackDataset::seeded();
        assert!(dataset.verify("admin", "admin123").is_some());
        assert!(dataset.verify("admin", "wrong").is_none());
        assert!(dataset.verify("nobody", "admin123").is_none());
    }

    #[test]
    fn test_user_synthesis() {
        let dataset = FallbackDataset::seeded();
        let user = dataset.user("tech1").unwrap();
        assert_eq!(user.email(), "tech1@maintenance.com");
        assert_eq!(user.first_name(), "Tech1");
        assert_eq!(user.last_name(), "User");
    }
}
