//! Invoice repository.
//!
//! Invoices are append-only. Each one gets a random six-digit number at save
//! time and can be found again by exact (lowercased) name, email or phone.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::types::Json;
use tracing::instrument;

use tiendita_core::{CartLine, Customer, Invoice, InvoiceId, NewInvoice, Price, normalize_contact};

use super::RepositoryError;

/// How many random invoice numbers to try before giving up.
pub const MAX_ID_ATTEMPTS: usize = 5;

/// A searchable contact column, each backed by its own index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl ContactField {
    const fn lookup_sql(self) -> &'static str {
        match self {
            Self::Name => {
                "SELECT id, name, email, phone, items, total, created_at
                 FROM invoices INDEXED BY invoices_name_idx
                 WHERE name = ? ORDER BY id"
            }
            Self::Email => {
                "SELECT id, name, email, phone, items, total, created_at
                 FROM invoices INDEXED BY invoices_email_idx
                 WHERE email = ? ORDER BY id"
            }
            Self::Phone => {
                "SELECT id, name, email, phone, items, total, created_at
                 FROM invoices INDEXED BY invoices_phone_idx
                 WHERE phone = ? ORDER BY id"
            }
        }
    }
}

#[derive(sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    items: Json<Vec<CartLine>>,
    total: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = RepositoryError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let id = InvoiceId::checked(row.id)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let customer = Customer::new(&row.name, &row.email, &row.phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invoice {id}: {e}"))
        })?;
        let total = Decimal::from_str(&row.total).map_err(|e| {
            RepositoryError::DataCorruption(format!("invoice {id}: invalid total: {e}"))
        })?;

        Ok(Self {
            id,
            customer,
            items: row.items.0,
            total: Price::new(total),
            created_at: row.created_at,
        })
    }
}

/// Draw a random invoice number in `InvoiceId::MIN..=InvoiceId::MAX`.
fn random_invoice_id() -> InvoiceId {
    InvoiceId::new(rand::rng().random_range(InvoiceId::MIN..=InvoiceId::MAX))
}

/// Repository for invoice database operations.
pub struct InvoiceRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> InvoiceRepository<'a> {
    /// Create a new invoice repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new invoice under a random six-digit number.
    ///
    /// The returned invoice is what was committed. A number that is already
    /// taken is detected by the primary key and another one is drawn.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if no free number was found in
    /// [`MAX_ID_ATTEMPTS`] draws, or `RepositoryError::Database` if the write
    /// fails.
    pub async fn save(&self, invoice: NewInvoice) -> Result<Invoice, RepositoryError> {
        self.save_with_ids(invoice, random_invoice_id).await
    }

    #[instrument(skip(self, invoice, next_id), fields(items = invoice.items().len()))]
    async fn save_with_ids(
        &self,
        invoice: NewInvoice,
        mut next_id: impl FnMut() -> InvoiceId,
    ) -> Result<Invoice, RepositoryError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = next_id();
            match self.insert(id, &invoice).await {
                Ok(()) => {
                    tracing::info!(invoice_id = %id, total = %invoice.total(), "Invoice saved");
                    return Ok(invoice.with_id(id));
                }
                Err(RepositoryError::Conflict(_)) => {
                    tracing::warn!(invoice_id = %id, attempt, "Invoice number taken, drawing another");
                }
                Err(e) => return Err(e),
            }
        }

        Err(RepositoryError::Conflict(format!(
            "no free invoice number after {MAX_ID_ATTEMPTS} attempts"
        )))
    }

    async fn insert(&self, id: InvoiceId, invoice: &NewInvoice) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let customer = invoice.customer();

        sqlx::query(
            r"
            INSERT INTO invoices (id, name, email, phone, items, total, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(id)
        .bind(customer.name())
        .bind(customer.email())
        .bind(customer.phone())
        .bind(Json(invoice.items()))
        .bind(invoice.total().amount().to_string())
        .bind(invoice.created_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!("invoice {id} already exists"));
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;
        Ok(())
    }

    /// Find invoices whose name, email or phone equals `query`, ignoring case.
    ///
    /// The three index lookups run concurrently and are merged only after
    /// all of them finish: name matches first, then email, then phone. An
    /// invoice matching on several fields appears once per field.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any lookup fails and
    /// `RepositoryError::DataCorruption` if a stored row cannot be decoded.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Invoice>, RepositoryError> {
        let key = normalize_contact(query);

        let (by_name, by_email, by_phone) = tokio::try_join!(
            self.find_by(ContactField::Name, &key),
            self.find_by(ContactField::Email, &key),
            self.find_by(ContactField::Phone, &key),
        )?;

        let mut invoices = by_name;
        invoices.extend(by_email);
        invoices.extend(by_phone);

        tracing::debug!(matches = invoices.len(), "Invoice search finished");
        Ok(invoices)
    }

    /// Exact-match lookup on one indexed contact field.
    ///
    /// `key` must already be normalized.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by(
        &self,
        field: ContactField,
        key: &str,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(field.lookup_sql())
            .bind(key)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Invoice::try_from).collect()
    }

    /// Get an invoice by its number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        let row: Option<InvoiceRow> = sqlx::query_as(
            r"
            SELECT id, name, email, phone, items, total, created_at
            FROM invoices
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Invoice::try_from).transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use tiendita_core::ProductId;

    fn shirt() -> CartLine {
        CartLine::new(ProductId::new(1), "Shirt", Price::from_units(20))
    }

    fn new_invoice(name: &str, email: &str, phone: &str) -> NewInvoice {
        let customer = Customer::new(name, email, phone).unwrap();
        NewInvoice::from_cart(customer, vec![shirt(), shirt()], Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_six_digit_id() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);

        let invoice = repo.save(new_invoice("Ana", "ana@x.com", "555")).await.unwrap();

        assert!((InvoiceId::MIN..=InvoiceId::MAX).contains(&invoice.id.as_i64()));
        assert_eq!(invoice.total, Price::from_units(40));

        let stored = repo.get_by_id(invoice.id).await.unwrap().unwrap();
        assert_eq!(stored, invoice);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        let saved = repo
            .save(new_invoice("Foo", "Foo@Bar.com", "555"))
            .await
            .unwrap();

        assert_eq!(saved.customer.email(), "foo@bar.com");

        for query in ["foo@bar.com", "FOO@BAR.COM", "Foo@Bar.com"] {
            let found = repo.search(query).await.unwrap();
            assert_eq!(found.len(), 1, "query {query}");
            assert_eq!(found[0].id, saved.id);
        }
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        repo.save(new_invoice("Ana", "ana@x.com", "555")).await.unwrap();

        assert!(repo.search("nobody@x.com").await.unwrap().is_empty());
        // Partial values are not matches
        assert!(repo.search("ana@x").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_keeps_every_invoice_sharing_a_name() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        let first = repo.save(new_invoice("Ana", "a1@x.com", "1")).await.unwrap();
        let second = repo.save(new_invoice("ANA", "a2@x.com", "2")).await.unwrap();

        let found = repo.search("ana").await.unwrap();
        let mut ids: Vec<_> = found.iter().map(|i| i.id).collect();
        ids.sort();
        let mut expected = vec![first.id, second.id];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_search_repeats_invoice_matching_several_fields() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        let saved = repo.save(new_invoice("555", "ana@x.com", "555")).await.unwrap();

        let found = repo.search("555").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|i| i.id == saved.id));
    }

    #[tokio::test]
    async fn test_search_orders_name_then_email_then_phone() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        let by_phone = repo.save(new_invoice("p", "p@x.com", "key")).await.unwrap();
        let by_name = repo.save(new_invoice("key", "n@x.com", "1")).await.unwrap();
        let by_email = repo.save(new_invoice("e", "key", "2")).await.unwrap();

        let ids: Vec<_> = repo
            .search("KEY")
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![by_name.id, by_email.id, by_phone.id]);
    }

    #[tokio::test]
    async fn test_find_by_single_field() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        repo.save(new_invoice("Ana", "ana@x.com", "555")).await.unwrap();

        assert_eq!(repo.find_by(ContactField::Phone, "555").await.unwrap().len(), 1);
        assert!(repo.find_by(ContactField::Name, "555").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_retries_taken_number() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        let taken = InvoiceId::new(123_456);
        let free = InvoiceId::new(654_321);

        repo.save_with_ids(new_invoice("Ana", "ana@x.com", "555"), || taken)
            .await
            .unwrap();

        let mut draws = vec![free, taken];
        let second = repo
            .save_with_ids(new_invoice("Bea", "bea@x.com", "556"), || {
                draws.pop().unwrap()
            })
            .await
            .unwrap();

        assert_eq!(second.id, free);
        let first = repo.get_by_id(taken).await.unwrap().unwrap();
        assert_eq!(first.customer.name(), "ana");
    }

    #[tokio::test]
    async fn test_save_gives_up_after_max_attempts() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        let taken = InvoiceId::new(111_111);
        repo.save_with_ids(new_invoice("Ana", "ana@x.com", "555"), || taken)
            .await
            .unwrap();

        let mut calls = 0;
        let result = repo
            .save_with_ids(new_invoice("Bea", "bea@x.com", "556"), || {
                calls += 1;
                taken
            })
            .await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(calls, MAX_ID_ATTEMPTS);
        assert!(repo.search("bea").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let pool = memory_pool().await;
        let repo = InvoiceRepository::new(&pool);
        assert!(repo.get_by_id(InvoiceId::new(100_000)).await.unwrap().is_none());
    }
}
