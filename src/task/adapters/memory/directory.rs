//! In-memory employee and project directory.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::domain::{EmployeeId, ProjectId};
use crate::task::ports::directory::{
    DirectoryError, DirectoryResult, EmployeeContact, EmployeeDirectory, ProjectDirectory,
};

/// Thread-safe in-memory directory serving both employee and project
/// lookups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    employees: HashMap<EmployeeId, EmployeeContact>,
    projects: HashSet<ProjectId>,
}

fn poisoned(err: impl std::fmt::Display) -> DirectoryError {
    DirectoryError::lookup(std::io::Error::other(err.to_string()))
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an employee and returns their id.
    ///
    /// The email address is derived from the display name.
    #[must_use]
    pub fn add_employee(&self, display_name: &str) -> EmployeeId {
        let id = EmployeeId::new();
        let email = format!(
            "{}@example.test",
            display_name.to_lowercase().replace(' ', ".")
        );
        if let Ok(mut state) = self.state.write() {
            state.employees.insert(
                id,
                EmployeeContact {
                    id,
                    display_name: display_name.to_owned(),
                    email,
                },
            );
        }
        id
    }

    /// Registers a project and returns its id.
    #[must_use]
    pub fn add_project(&self) -> ProjectId {
        let id = ProjectId::new();
        if let Ok(mut state) = self.state.write() {
            state.projects.insert(id);
        }
        id
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryDirectory {
    async fn find(&self, id: EmployeeId) -> DirectoryResult<Option<EmployeeContact>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.employees.get(&id).cloned())
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryDirectory {
    async fn exists(&self, id: ProjectId) -> DirectoryResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.projects.contains(&id))
    }
}
