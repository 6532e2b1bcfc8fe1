//! Users and departments, used to assign and filter tasks

use serde::{Deserialize, Serialize};

pub type UserId = u64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    /// The full name, or the username when no full name is set
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
}

/// An entry of the assignee drop-down
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssigneeOption {
    pub user_id: UserId,
    pub label: String,
}

/// Only active users can be assigned tasks
pub fn assignee_options(users: &[User]) -> Vec<AssigneeOption> {
    users
        .iter()
        .filter(|user| user.is_active)
        .map(|user| AssigneeOption {
            user_id: user.id,
            label: format!(
                "{} ({})",
                user.display_name(),
                user.department.as_deref().filter(|d| !d.is_empty()).unwrap_or("No department")
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_users_are_not_assignable() {
        let json = r#"[
            {"id": 1, "username": "jdoe", "full_name": "John Doe", "department": "Sales", "is_active": true},
            {"id": 2, "username": "ghost", "full_name": "Gone", "department": "Sales", "is_active": false},
            {"id": 3, "username": "msmith", "full_name": null, "department": null, "is_active": true, "email": "m@x.org"}
        ]"#;
        let users: Vec<User> = serde_json::from_str(json).unwrap();
        let options = assignee_options(&users);
        assert_eq!(options, vec![
            AssigneeOption { user_id: 1, label: "John Doe (Sales)".into() },
            AssigneeOption { user_id: 3, label: "msmith (No department)".into() },
        ]);
    }
}
