use anyhow::anyhow;
use chrono::Utc;
use classgrid_core::{AppError, Paginated};
use classgrid_db::collections::{SCHEDULES, SUBJECTS};
use classgrid_db::{DocumentStore, Query};
use classgrid_models::registry::{RegistryFilterParams, name_key};
use classgrid_models::{
    CreateSubjectDto, PaginatedSubjectsResponse, Subject, SubjectId, UpdateSubjectDto,
};
use tracing::instrument;

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(store))]
    pub async fn create_subject(
        store: &dyn DocumentStore,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        let name = clean_name(&dto.name)?;
        Self::ensure_name_free(store, &name, None).await?;

        let now = Utc::now();
        let subject = Subject {
            id: SubjectId::new(),
            name,
            description: clean_description(dto.description),
            created_at: now,
            updated_at: now,
        };

        SUBJECTS.put(store, &subject.id.key(), &subject).await?;
        Ok(subject)
    }

    #[instrument(skip(store))]
    pub async fn get_subjects(
        store: &dyn DocumentStore,
        filters: RegistryFilterParams,
    ) -> Result<PaginatedSubjectsResponse, AppError> {
        let mut subjects: Vec<Subject> = SUBJECTS
            .all(store)
            .await?
            .into_iter()
            .filter(|s| filters.matches(&s.name))
            .collect();
        subjects.sort_by_key(|s| name_key(&s.name));

        Ok(Paginated::from_vec(subjects, &filters.pagination).into())
    }

    #[instrument(skip(store))]
    pub async fn get_subject(store: &dyn DocumentStore, id: SubjectId) -> Result<Subject, AppError> {
        SUBJECTS
            .get(store, &id.key())
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Subject not found")))
    }

    /// Looks a subject up by name, ignoring case and surrounding whitespace.
    pub async fn find_by_name(
        store: &dyn DocumentStore,
        name: &str,
    ) -> Result<Option<Subject>, AppError> {
        let wanted = name_key(name);
        Ok(SUBJECTS
            .all(store)
            .await?
            .into_iter()
            .find(|s| name_key(&s.name) == wanted))
    }

    #[instrument(skip(store))]
    pub async fn update_subject(
        store: &dyn DocumentStore,
        id: SubjectId,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let mut subject = Self::get_subject(store, id).await?;

        if let Some(name) = dto.name {
            let name = clean_name(&name)?;
            if name != subject.name {
                Self::ensure_unreferenced(store, &subject.name, "renamed").await?;
                Self::ensure_name_free(store, &name, Some(id)).await?;
                subject.name = name;
            }
        }
        if dto.description.is_some() {
            subject.description = clean_description(dto.description);
        }
        subject.updated_at = Utc::now();

        SUBJECTS.put(store, &id.key(), &subject).await?;
        Ok(subject)
    }

    #[instrument(skip(store))]
    pub async fn delete_subject(store: &dyn DocumentStore, id: SubjectId) -> Result<(), AppError> {
        let subject = Self::get_subject(store, id).await?;
        Self::ensure_unreferenced(store, &subject.name, "deleted").await?;

        SUBJECTS.delete(store, &id.key()).await?;
        Ok(())
    }

    async fn ensure_name_free(
        store: &dyn DocumentStore,
        name: &str,
        except: Option<SubjectId>,
    ) -> Result<(), AppError> {
        match Self::find_by_name(store, name).await? {
            Some(existing) if Some(existing.id) != except => Err(AppError::conflict(anyhow!(
                "A subject named '{}' already exists",
                existing.name
            ))),
            _ => Ok(()),
        }
    }

    async fn ensure_unreferenced(
        store: &dyn DocumentStore,
        name: &str,
        action: &str,
    ) -> Result<(), AppError> {
        let used_by = SCHEDULES
            .find(store, &Query::new().eq("subject", name))
            .await?
            .len();

        if used_by > 0 {
            return Err(AppError::bad_request(anyhow!(
                "Subject '{}' is used by {} schedule assignment(s) and cannot be {}",
                name,
                used_by,
                action
            )));
        }
        Ok(())
    }
}

fn clean_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::unprocessable(anyhow!("name cannot be blank")));
    }
    Ok(name.to_string())
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
