use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Supervisor,
    Admin,
}

/// Access level required by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Admin,
    Supervisor,
    /// Any signed-in user, whatever the role.
    Any,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Supervisor => "supervisor",
            Role::Admin => "admin",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(Role::Employee),
            "supervisor" => Some(Role::Supervisor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Admins satisfy every check, supervisors only the supervisor one.
    pub fn satisfies(&self, access: Access) -> bool {
        match access {
            Access::Admin => matches!(self, Role::Admin),
            Access::Supervisor => matches!(self, Role::Supervisor | Role::Admin),
            Access::Any => true,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Supervisor => "Supervisor",
            Role::Admin => "Admin",
        }
    }
}
