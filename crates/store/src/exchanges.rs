//! Exchange contact book — CRUD over `exchanges.json`.

use serde::Deserialize;
use uuid::Uuid;

use chainletter_common::error::AppError;
use chainletter_common::types::Exchange;

use crate::{EXCHANGES_FILE, Store};

/// Parameters for creating an exchange contact.
///
/// `id` is normally generated; seed imports may carry their own. A create
/// with an id that already exists replaces that record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExchangeParams {
    pub id: Option<Uuid>,
    pub name: String,
    pub emails: Vec<String>,
    pub selected: Option<bool>,
}

/// Parameters for a partial exchange update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExchangeParams {
    pub name: Option<String>,
    pub emails: Option<Vec<String>>,
    pub selected: Option<bool>,
}

impl Store {
    /// List all exchange contacts in insertion order.
    pub fn list_exchanges(&self) -> Vec<Exchange> {
        self.inner.read().exchanges.clone()
    }

    /// Fetch a single exchange by id.
    pub fn get_exchange(&self, id: Uuid) -> Result<Exchange, AppError> {
        self.inner
            .read()
            .exchanges
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Exchange {} not found", id)))
    }

    /// Create an exchange contact.
    pub fn create_exchange(&self, params: CreateExchangeParams) -> Result<Exchange, AppError> {
        if params.name.trim().is_empty() {
            return Err(AppError::Validation("Exchange name is required".to_string()));
        }

        let exchange = Exchange {
            id: params.id.unwrap_or_else(Uuid::new_v4),
            name: params.name,
            emails: params.emails,
            selected: params.selected.unwrap_or(true),
        };

        let mut inner = self.inner.write();
        inner.exchanges.retain(|e| e.id != exchange.id);
        inner.exchanges.push(exchange.clone());
        self.save(EXCHANGES_FILE, &inner.exchanges)?;

        tracing::info!(exchange_id = %exchange.id, name = %exchange.name, "Exchange created");
        Ok(exchange)
    }

    /// Apply a partial update to an exchange contact.
    pub fn update_exchange(
        &self,
        id: Uuid,
        params: UpdateExchangeParams,
    ) -> Result<Exchange, AppError> {
        let mut inner = self.inner.write();
        let exchange = inner
            .exchanges
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Exchange {} not found", id)))?;

        if let Some(name) = params.name {
            exchange.name = name;
        }
        if let Some(emails) = params.emails {
            exchange.emails = emails;
        }
        if let Some(selected) = params.selected {
            exchange.selected = selected;
        }
        let updated = exchange.clone();
        self.save(EXCHANGES_FILE, &inner.exchanges)?;

        tracing::info!(exchange_id = %id, "Exchange updated");
        Ok(updated)
    }

    /// Delete an exchange contact. Returns true if it existed.
    pub fn delete_exchange(&self, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write();
        let before = inner.exchanges.len();
        inner.exchanges.retain(|e| e.id != id);
        let deleted = inner.exchanges.len() < before;
        if deleted {
            self.save(EXCHANGES_FILE, &inner.exchanges)?;
            tracing::info!(exchange_id = %id, "Exchange deleted");
        }
        Ok(deleted)
    }

    /// Replace the whole contact book (seed import).
    pub fn replace_exchanges(
        &self,
        params: Vec<CreateExchangeParams>,
    ) -> Result<Vec<Exchange>, AppError> {
        let exchanges: Vec<Exchange> = params
            .into_iter()
            .map(|p| Exchange {
                id: p.id.unwrap_or_else(Uuid::new_v4),
                name: p.name,
                emails: p.emails,
                selected: p.selected.unwrap_or(true),
            })
            .collect();

        let mut inner = self.inner.write();
        inner.exchanges = exchanges.clone();
        self.save(EXCHANGES_FILE, &inner.exchanges)?;

        tracing::info!(count = exchanges.len(), "Exchange contact book replaced");
        Ok(exchanges)
    }
}
