//! Structured import results and the pure fold that aggregates them.
//!
//! Each orchestration level returns an immutable result value that its
//! caller folds into its own accumulator — there is no shared mutable
//! aggregate. Invariant at every nesting level:
//! `imported + skipped + failed == number of candidates actually processed`,
//! and a parent's counts equal the sum of its children's.

/// Outcome of one import operation at any nesting level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    pub imported: u32,
    pub skipped: u32,
    pub failed: u32,
    /// Flat error list; entries are prefixed with their identifying context
    /// (external id or region name) so they stay traceable after folding.
    pub errors: Vec<String>,
    /// Internal ids of every shop touched (created, updated, or skipped).
    pub shop_ids: Vec<i64>,
}

impl ImportResult {
    /// A newly created shop: counts toward `imported`.
    #[must_use]
    pub fn created_one(shop_id: i64) -> Self {
        Self {
            success: true,
            message: format!("created shop {shop_id}"),
            imported: 1,
            shop_ids: vec![shop_id],
            ..Self::default()
        }
    }

    /// An existing shop refreshed in place: counts toward `imported`.
    #[must_use]
    pub fn updated_one(shop_id: i64) -> Self {
        Self {
            success: true,
            message: format!("updated shop {shop_id}"),
            imported: 1,
            shop_ids: vec![shop_id],
            ..Self::default()
        }
    }

    /// An existing shop left untouched. `shop_id` may be absent when the
    /// record was created concurrently and its id is not known.
    #[must_use]
    pub fn skipped_one(shop_id: Option<i64>) -> Self {
        Self {
            success: true,
            message: "skipped existing shop".to_owned(),
            skipped: 1,
            shop_ids: shop_id.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A single-record failure, captured rather than propagated.
    #[must_use]
    pub fn failed_one(external_id: &str, message: &str) -> Self {
        Self {
            success: false,
            message: format!("import of {external_id} failed"),
            failed: 1,
            errors: vec![format!("{external_id}: {message}")],
            ..Self::default()
        }
    }

    /// A sweep-level failure (geocode miss, search error) that processed no
    /// candidates: zero counts, one error entry.
    #[must_use]
    pub fn sweep_failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            errors: vec![message.clone()],
            message,
            ..Self::default()
        }
    }

    /// The non-success zero-count result for a search that yielded nothing.
    #[must_use]
    pub fn no_candidates() -> Self {
        Self {
            success: false,
            message: "search returned no candidates".to_owned(),
            ..Self::default()
        }
    }

    /// Number of candidates this result accounts for.
    #[must_use]
    pub fn processed(&self) -> u32 {
        self.imported + self.skipped + self.failed
    }

    /// Folds a child result into this accumulator: counts are summed, errors
    /// and shop ids concatenated. `success`/`message` are left for
    /// [`ImportResult::finish`].
    pub fn fold(&mut self, child: ImportResult) {
        self.imported += child.imported;
        self.skipped += child.skipped;
        self.failed += child.failed;
        self.errors.extend(child.errors);
        self.shop_ids.extend(child.shop_ids);
    }

    /// Like [`ImportResult::fold`], additionally prefixing every child error
    /// with `context` so the flat list stays traceable to its origin.
    pub fn fold_with_context(&mut self, context: &str, mut child: ImportResult) {
        child.errors = child
            .errors
            .into_iter()
            .map(|e| format!("{context}: {e}"))
            .collect();
        self.fold(child);
    }

    /// Seals an aggregate: `success` iff nothing failed, and a one-line
    /// summary of the totals.
    #[must_use]
    pub fn finish(mut self) -> Self {
        self.success = self.failed == 0;
        self.message = format!(
            "imported {}, skipped {}, failed {} ({} processed)",
            self.imported,
            self.skipped,
            self.failed,
            self.processed()
        );
        self
    }
}
