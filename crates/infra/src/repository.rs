//! Tenant-scoped in-memory repository.
//!
//! Stores whole records keyed by `(tenant, id)`. Every write runs the
//! record's [`RepositoryHooks`], enforces optimistic concurrency through
//! [`ExpectedVersion`] and bumps the version by one.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};

use serde::Serialize;
use serde_json::{Map, Value};

use erpsuite_core::record_context::to_json;
use erpsuite_core::{
    ActionContext, DomainError, DomainResult, ExpectedVersion, NoHooks, Record, RecordId,
    RepositoryHooks, TenantId,
};

type Key = (TenantId, RecordId);

#[derive(Debug)]
pub struct InMemoryRepository<E, H = NoHooks> {
    records: RwLock<HashMap<Key, E>>,
    hooks: H,
}

impl<E: Record> Default for InMemoryRepository<E, NoHooks> {
    fn default() -> Self {
        Self::new(NoHooks)
    }
}

impl<E, H> InMemoryRepository<E, H>
where
    E: Record,
    H: RepositoryHooks<E>,
{
    pub fn new(hooks: H) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            hooks,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, HashMap<Key, E>>> {
        self.records
            .write()
            .map_err(|_| DomainError::inconsistency("repository lock poisoned"))
    }

    pub fn find(&self, tenant_id: TenantId, id: RecordId) -> Option<E> {
        let map = self.records.read().ok()?;
        map.get(&(tenant_id, id)).cloned()
    }

    /// First record of the tenant matching `predicate`.
    pub fn find_where(&self, tenant_id: TenantId, predicate: impl Fn(&E) -> bool) -> Option<E> {
        let map = self.records.read().ok()?;
        map.iter()
            .find(|((t, _), e)| *t == tenant_id && predicate(e))
            .map(|(_, e)| e.clone())
    }

    pub fn list(&self, tenant_id: TenantId) -> Vec<E> {
        let map = match self.records.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.iter()
            .filter_map(|((t, _), e)| (*t == tenant_id).then(|| e.clone()))
            .collect()
    }

    /// Store a new record at version 1.
    pub fn insert(&self, tenant_id: TenantId, mut entity: E) -> DomainResult<E> {
        let mut map = self.write()?;
        let key = (tenant_id, *entity.id());
        if map.contains_key(&key) {
            return Err(DomainError::conflict(format!("record {} already exists", key.1)));
        }
        self.hooks.before_save(tenant_id, &mut entity)?;
        entity.set_version(1);
        map.insert(key, entity.clone());
        tracing::debug!(%tenant_id, id = %key.1, "record inserted");
        Ok(entity)
    }

    /// Replace an existing record. The stored version must match `expected`.
    pub fn update(
        &self,
        tenant_id: TenantId,
        mut entity: E,
        expected: ExpectedVersion,
    ) -> DomainResult<E> {
        let mut map = self.write()?;
        let key = (tenant_id, *entity.id());
        let current = map.get(&key).ok_or_else(DomainError::not_found)?.version();
        expected.check(current)?;

        self.hooks.before_save(tenant_id, &mut entity)?;
        entity.set_version(current + 1);
        map.insert(key, entity.clone());
        tracing::debug!(%tenant_id, id = %key.1, version = current + 1, "record updated");
        Ok(entity)
    }

    /// Insert or update, checking the version carried by the record itself.
    pub fn save(&self, tenant_id: TenantId, entity: E) -> DomainResult<E> {
        let exists = self.find(tenant_id, *entity.id()).is_some();
        if exists {
            let expected = ExpectedVersion::Exact(entity.version());
            self.update(tenant_id, entity, expected)
        } else {
            self.insert(tenant_id, entity)
        }
    }

    /// Duplicate a record through the `copy` hook and store the copy.
    pub fn copy(&self, tenant_id: TenantId, id: RecordId, deep: bool) -> DomainResult<E> {
        let original = self.find(tenant_id, id).ok_or_else(DomainError::not_found)?;
        let mut copy = self.hooks.copy(&original, deep);
        copy.set_id(RecordId::new());
        copy.set_version(0);
        self.insert(tenant_id, copy)
    }

    pub fn remove(&self, tenant_id: TenantId, id: RecordId) -> DomainResult<E> {
        let mut map = self.write()?;
        let entity = map.get(&(tenant_id, id)).ok_or_else(DomainError::not_found)?;
        self.hooks.before_remove(entity)?;
        map.remove(&(tenant_id, id)).ok_or_else(DomainError::not_found)
    }
}

impl<E, H> InMemoryRepository<E, H>
where
    E: Record + Serialize,
    H: RepositoryHooks<E>,
{
    /// Client JSON of a record, completed by the `populate` hook.
    pub fn to_json(&self, entity: &E, context: &ActionContext) -> Value {
        let mut json = match to_json(entity) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.hooks.populate(&mut json, context);
        Value::Object(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erpsuite_core::AggregateRoot;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Note {
        id: RecordId,
        version: u64,
        text: String,
    }

    impl Note {
        fn new(text: &str) -> Self {
            Self {
                id: RecordId::new(),
                version: 0,
                text: text.into(),
            }
        }
    }

    impl AggregateRoot for Note {
        type Id = RecordId;

        fn id(&self) -> &Self::Id {
            &self.id
        }

        fn version(&self) -> u64 {
            self.version
        }
    }

    impl Record for Note {
        fn set_id(&mut self, id: RecordId) {
            self.id = id;
        }

        fn set_version(&mut self, version: u64) {
            self.version = version;
        }
    }

    struct NoteHooks;

    impl RepositoryHooks<Note> for NoteHooks {
        fn populate(&self, json: &mut Map<String, Value>, _context: &ActionContext) {
            json.insert("$length".into(), Value::from(json.len()));
        }

        fn copy(&self, entity: &Note, _deep: bool) -> Note {
            let mut copy = entity.clone();
            copy.text = format!("{} (copy)", entity.text);
            copy
        }

        fn before_save(&self, _tenant_id: TenantId, entity: &mut Note) -> DomainResult<()> {
            if entity.text.is_empty() {
                return Err(DomainError::missing_field("text"));
            }
            entity.text = entity.text.trim().to_string();
            Ok(())
        }

        fn before_remove(&self, entity: &Note) -> DomainResult<()> {
            if entity.text == "pinned" {
                return Err(DomainError::inconsistency("pinned notes can not be removed"));
            }
            Ok(())
        }
    }

    #[test]
    fn versions_grow_and_stale_updates_conflict() {
        let repo = InMemoryRepository::new(NoteHooks);
        let tenant = TenantId::new();
        let saved = repo.insert(tenant, Note::new(" draft ")).unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(saved.text, "draft");

        let mut edit = saved.clone();
        edit.text = "final".into();
        let updated = repo.update(tenant, edit.clone(), ExpectedVersion::Exact(1)).unwrap();
        assert_eq!(updated.version, 2);

        let err = repo.update(tenant, edit, ExpectedVersion::Exact(1)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.find(tenant, saved.id).unwrap().text, "final");
    }

    #[test]
    fn failing_hook_leaves_store_unchanged() {
        let repo = InMemoryRepository::new(NoteHooks);
        let tenant = TenantId::new();
        let saved = repo.insert(tenant, Note::new("kept")).unwrap();

        let mut blank = saved.clone();
        blank.text.clear();
        assert!(repo.save(tenant, blank).is_err());
        assert_eq!(repo.find(tenant, saved.id), Some(saved));
    }

    #[test]
    fn records_are_tenant_scoped() {
        let repo = InMemoryRepository::new(NoteHooks);
        let acme = TenantId::new();
        let saved = repo.insert(acme, Note::new("secret")).unwrap();

        let other = TenantId::new();
        assert!(repo.find(other, saved.id).is_none());
        assert!(repo.list(other).is_empty());
        assert!(matches!(
            repo.update(other, saved, ExpectedVersion::Any),
            Err(DomainError::NotFound)
        ));
    }

    #[test]
    fn copy_gets_fresh_identity() {
        let repo = InMemoryRepository::new(NoteHooks);
        let tenant = TenantId::new();
        let saved = repo.insert(tenant, Note::new("agenda")).unwrap();

        let copy = repo.copy(tenant, saved.id, false).unwrap();
        assert_ne!(copy.id, saved.id);
        assert_eq!(copy.version, 1);
        assert_eq!(copy.text, "agenda (copy)");
        assert_eq!(repo.list(tenant).len(), 2);
    }

    #[test]
    fn remove_runs_hook() {
        let repo = InMemoryRepository::new(NoteHooks);
        let tenant = TenantId::new();
        let pinned = repo.insert(tenant, Note::new("pinned")).unwrap();
        let loose = repo.insert(tenant, Note::new("loose")).unwrap();

        assert!(repo.remove(tenant, pinned.id).is_err());
        assert_eq!(repo.remove(tenant, loose.id).unwrap().text, "loose");
        assert_eq!(repo.list(tenant).len(), 1);
    }

    #[test]
    fn to_json_runs_populate() {
        let repo = InMemoryRepository::new(NoteHooks);
        let note = Note::new("hello");
        let json = repo.to_json(&note, &ActionContext::default());
        assert_eq!(json["text"], "hello");
        assert_eq!(json["$length"], 3);
    }

    proptest! {
        #[test]
        fn version_counts_saves(edits in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
            let repo = InMemoryRepository::new(NoteHooks);
            let tenant = TenantId::new();
            let mut current = repo.insert(tenant, Note::new("start")).unwrap();
            for text in &edits {
                current.text = text.clone();
                current = repo.save(tenant, current).unwrap();
            }
            prop_assert_eq!(current.version, 1 + edits.len() as u64);
            prop_assert_eq!(repo.list(tenant).len(), 1);
        }
    }
}
