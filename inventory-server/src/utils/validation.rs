//! Input validation helpers
//!
//! Turns raw form fields and query strings into validated model payloads.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use std::collections::HashMap;

use shared::models::{ProductCreate, ProductFilter, ProductListQuery, ProductUpdate};

use crate::utils::{AppError, AppResult, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Product name
pub const MAX_NAME_LEN: usize = 200;

/// Category label
pub const MAX_CATEGORY_LEN: usize = 100;

/// Product description
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Search term
pub const MAX_SEARCH_LEN: usize = 200;

/// Fields every create/update form must carry
pub const REQUIRED_PRODUCT_FIELDS: [&str; 4] = ["name", "price", "category", "stock_quantity"];

// ── Text helpers ────────────────────────────────────────────────────

/// Validate that a string is within the length limit (in chars).
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Trimmed, non-blank value of a form field
fn non_blank<'a>(fields: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Reject the form when any required field is absent or blank
pub fn check_required(fields: &HashMap<String, String>) -> AppResult<()> {
    let missing: Vec<&str> = REQUIRED_PRODUCT_FIELDS
        .iter()
        .copied()
        .filter(|key| non_blank(fields, key).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::required_fields(&missing))
    }
}

// ── Scalar parsers ──────────────────────────────────────────────────

/// Finite decimal strictly greater than zero
pub fn parse_price(raw: &str) -> AppResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(AppError::new(ErrorCode::ProductInvalidPrice).with_detail("price", raw)),
    }
}

/// Integer greater than or equal to zero
pub fn parse_stock(raw: &str) -> AppResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(stock) if stock >= 0 => Ok(stock),
        _ => Err(AppError::new(ErrorCode::ProductInvalidStock).with_detail("stock_quantity", raw)),
    }
}

/// `1`/`0`, `true`/`false`, `on`/`off`, `yes`/`no` (case-insensitive)
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Numeric product id from a path segment
pub fn parse_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::InvalidFormat, "Invalid product id")
                .with_detail("id", raw)
        })
}

// ── Model builders ──────────────────────────────────────────────────

struct CommonFields {
    name: String,
    description: Option<String>,
    price: f64,
    category: String,
    stock_quantity: i64,
}

fn parse_common(fields: &HashMap<String, String>) -> AppResult<CommonFields> {
    check_required(fields)?;

    let name = non_blank(fields, "name").unwrap_or_default().to_string();
    let category = non_blank(fields, "category").unwrap_or_default().to_string();
    let description = non_blank(fields, "description").map(str::to_string);

    validate_text_len(&name, "name", MAX_NAME_LEN)?;
    validate_text_len(&category, "category", MAX_CATEGORY_LEN)?;
    if let Some(desc) = &description {
        validate_text_len(desc, "description", MAX_DESCRIPTION_LEN)?;
    }

    Ok(CommonFields {
        name,
        description,
        price: parse_price(non_blank(fields, "price").unwrap_or_default())?,
        category,
        stock_quantity: parse_stock(non_blank(fields, "stock_quantity").unwrap_or_default())?,
    })
}

/// Build a create payload from submitted form fields
pub fn product_create(fields: &HashMap<String, String>) -> AppResult<ProductCreate> {
    let c = parse_common(fields)?;
    Ok(ProductCreate {
        name: c.name,
        description: c.description,
        price: c.price,
        category: c.category,
        stock_quantity: c.stock_quantity,
    })
}

/// Build an update payload from submitted form fields
///
/// A missing `is_active` keeps `current_active`.
pub fn product_update(
    fields: &HashMap<String, String>,
    current_active: bool,
) -> AppResult<ProductUpdate> {
    let c = parse_common(fields)?;
    let is_active = match non_blank(fields, "is_active") {
        Some(raw) => parse_flag(raw).ok_or_else(|| {
            AppError::validation("is_active must be a boolean").with_detail("is_active", raw)
        })?,
        None => current_active,
    };
    Ok(ProductUpdate {
        name: c.name,
        description: c.description,
        price: c.price,
        category: c.category,
        stock_quantity: c.stock_quantity,
        is_active,
    })
}

/// Validate listing query parameters
pub fn product_filter(query: &ProductListQuery) -> AppResult<ProductFilter> {
    let invalid = || AppError::validation("Invalid pagination params");

    let page = match query.page.as_deref() {
        None => ProductFilter::DEFAULT_PAGE,
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| invalid().with_detail("page", raw))?,
    };
    let limit = match query.limit.as_deref() {
        None => ProductFilter::DEFAULT_LIMIT,
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|l| (1..=ProductFilter::MAX_LIMIT).contains(l))
            .ok_or_else(|| invalid().with_detail("limit", raw))?,
    };

    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    if let Some(term) = &search {
        validate_text_len(term, "search", MAX_SEARCH_LEN)?;
    }

    let include_inactive = match query.include_inactive.as_deref().map(str::trim) {
        None | Some("") => false,
        Some(raw) => parse_flag(raw).ok_or_else(|| {
            AppError::validation("include_inactive must be a boolean")
                .with_detail("include_inactive", raw)
        })?,
    };

    Ok(ProductFilter {
        page,
        limit,
        search,
        include_inactive,
    })
}
