//! Draft validation
//!
//! Problems found here block a sync run before anything is sent.

use super::product::ProductDraft;
use super::variant::VariantDraft;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Product names
pub const MAX_NAME_LEN: usize = 200;

/// SKUs and attribute names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Product descriptions
pub const MAX_DESCRIPTION_LEN: usize = 5000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required_field(field));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that a string is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

fn validate_variant(variant: &VariantDraft) -> Vec<AppError> {
    let mut problems = Vec::new();
    let label = variant.label();

    if variant.price < Decimal::ZERO {
        problems.push(
            AppError::with_message(
                ErrorCode::ProductInvalidPrice,
                format!("price of variant {label} must not be negative"),
            )
            .with_detail("field", "price"),
        );
    }
    if variant.stock < 0 {
        problems.push(
            AppError::with_message(
                ErrorCode::VariantInvalidStock,
                format!("stock of variant {label} must not be negative"),
            )
            .with_detail("field", "stock"),
        );
    }
    if let Err(e) = validate_text_len(&variant.sku, "sku", MAX_SHORT_TEXT_LEN) {
        problems.push(e);
    }
    for key in variant.attribute_values.keys() {
        if key.trim().is_empty() {
            problems.push(
                AppError::with_message(
                    ErrorCode::AttributeNameEmpty,
                    format!("variant {label} has an attribute without a name"),
                )
                .with_detail("field", "attributeValues"),
            );
        } else if let Err(e) = validate_text_len(key, "attribute name", MAX_SHORT_TEXT_LEN) {
            problems.push(e);
        }
    }

    problems
        .into_iter()
        .map(|e| e.with_detail("variant", label.clone()))
        .collect()
}

impl ProductDraft {
    /// Every problem that would block a sync run
    pub fn validate(&self) -> Vec<AppError> {
        let base = self.base();
        let mut problems = Vec::new();

        if let Err(e) = validate_required_text(&base.name, "name", MAX_NAME_LEN) {
            problems.push(e);
        }
        if let Err(e) = validate_text_len(&base.description, "description", MAX_DESCRIPTION_LEN) {
            problems.push(e);
        }
        if let Err(e) = validate_text_len(&base.sku, "sku", MAX_SHORT_TEXT_LEN) {
            problems.push(e);
        }
        if base.price < Decimal::ZERO {
            problems.push(
                AppError::with_message(ErrorCode::ProductInvalidPrice, "price must not be negative")
                    .with_detail("field", "price"),
            );
        }

        for variant in self.variants() {
            problems.extend(validate_variant(variant));
        }
        problems
    }
}
