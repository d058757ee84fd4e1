//! Backend en memoria del [`Store`]
//!
//! Usado con `STORAGE_BACKEND=memory` (demo y tests de integración).
//! Cada escritura es una sección crítica bajo el lock de escritura; las
//! columnas de [`Resource::UNIQUE`] se comprueban dentro de ese mismo lock.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::listing::{memory, ListQuery, Listable, Page, Value};
use crate::repositories::store::{Assignments, Resource, Store};
use crate::utils::errors::{AppError, AppResult};

pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
    next_id: AtomicI64,
}

impl<R: Resource> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<R: Resource> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_text(value: Value) -> Option<String> {
    value.as_search_text().filter(|text| !text.is_empty())
}

/// Equivalente en memoria de una violación de UNIQUE en Postgres
fn ensure_unique<R: Resource>(
    records: &[R],
    values: &impl Assignments,
    except: Option<i64>,
) -> AppResult<()> {
    for (column, value) in values.assignments() {
        if !R::UNIQUE.contains(&column) || value.is_null() {
            continue;
        }
        let taken = records
            .iter()
            .any(|record| Some(record.id()) != except && record.value(column) == value);
        if taken {
            return Err(AppError::Conflict(format!(
                "Duplicate value violates '{}_{}_key'",
                R::schema().table,
                column
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl<R: Resource> Store<R> for MemoryStore<R> {
    async fn list(&self, query: &ListQuery) -> AppResult<Page<R>> {
        let records = self.records.read().await;
        Ok(memory::paginate(&records, query))
    }

    async fn list_all(&self, query: &ListQuery) -> AppResult<Vec<R>> {
        let records = self.records.read().await;
        Ok(memory::select(&records, query).into_iter().cloned().collect())
    }

    async fn distinct(&self, column: &'static str) -> AppResult<Vec<String>> {
        let records = self.records.read().await;
        let values: BTreeSet<String> = records
            .iter()
            .filter_map(|record| non_empty_text(record.value(column)))
            .collect();
        Ok(values.into_iter().collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn count_where(&self, column: &'static str, value: Value) -> AppResult<u64> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|record| record.value(column) == value).count() as u64)
    }

    async fn count_distinct(&self, column: &'static str) -> AppResult<u64> {
        let records = self.records.read().await;
        let values: BTreeSet<String> = records
            .iter()
            .filter_map(|record| record.value(column).as_search_text())
            .collect();
        Ok(values.len() as u64)
    }

    async fn find(&self, id: i64) -> AppResult<Option<R>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    async fn exists(
        &self,
        column: &'static str,
        value: Value,
        except: Option<i64>,
    ) -> AppResult<bool> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| Some(record.id()) != except)
            .any(|record| record.value(column) == value))
    }

    async fn insert(&self, new: R::New) -> AppResult<R> {
        let mut records = self.records.write().await;
        ensure_unique(&records, &new, None)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = R::create(id, new, Utc::now());
        records.push(record.clone());
        tracing::debug!("✅ {} {} created (memory)", R::NAME, id);
        Ok(record)
    }

    async fn update(&self, id: i64, changes: R::Changes) -> AppResult<Option<R>> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|record| record.id() == id) else {
            return Ok(None);
        };
        ensure_unique(&records, &changes, Some(id))?;
        let record = &mut records[index];
        record.apply(changes, Utc::now());
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id() != id);
        Ok(records.len() < before)
    }
}
