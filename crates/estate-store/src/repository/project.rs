//! # Project Repository

use chrono::NaiveDate;
use estate_core::validation::validate_project;
use estate_core::{Project, ProjectStatus};
use serde::Deserialize;
use tracing::{debug, warn};

use super::merge_patch;
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub location: String,
    pub status: ProjectStatus,
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub manager: String,
    #[serde(default)]
    pub progress: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<ProjectStatus>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager: Option<String>,
    pub progress: Option<u8>,
}

impl EntityStore {
    pub fn add_project(&mut self, new: NewProject) -> StoreResult<Project> {
        let project = Project {
            id: Self::next_id(),
            name: new.name,
            location: new.location,
            status: new.status,
            budget: new.budget,
            spent: new.spent,
            start_date: new.start_date,
            end_date: new.end_date,
            manager: new.manager,
            progress: new.progress,
        };

        check_project(&project)?;

        debug!(id = %project.id, name = %project.name, "Adding project");
        self.projects.push(project.clone());
        Ok(project)
    }

    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> StoreResult<Project> {
        let current = self.projects.require(id)?;
        let mut project = current.clone();

        merge_patch!(project <- patch {
            name, location, status, budget, spent, start_date, end_date,
            manager, progress,
        });

        if project == *current {
            return Ok(project);
        }

        check_project(&project)?;

        debug!(id = %project.id, progress = project.progress, "Updating project");
        self.projects.replace(project.clone())?;
        Ok(project)
    }
}

fn check_project(project: &Project) -> StoreResult<()> {
    validate_project(project).map_err(|err| {
        warn!(id = %project.id, error = %err, "Project rejected");
        StoreError::from(err)
    })
}
