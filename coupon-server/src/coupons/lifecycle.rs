//! Coupon Lifecycle Manager
//!
//! A coupon moves between two states, inactive and active:
//!
//! - `activate`: allowed while fewer than [`MAX_ACTIVE_COUPONS`] *other*
//!   coupons of the merchant are active
//! - `deactivate`: allowed while no `packaged` invoice references the coupon
//!
//! Both guards are evaluated by the same SQL statement that flips the flag,
//! so concurrent callers can never overshoot the cap.

use shared::models::{
    Coupon, CouponCreate, CouponUpdate, DiscountType, MAX_ACTIVE_COUPONS, MerchantSummary,
};
use sqlx::SqlitePool;

use super::error::{
    CODE_TAKEN, CouponError, CouponResult, DISCOUNT_TYPE_INVALID, DISCOUNT_VALUE_BLANK,
    DISCOUNT_VALUE_NOT_POSITIVE, DOLLAR_VALUE_INVALID, FieldErrors, PERCENT_VALUE_INVALID,
    Resource,
};
use crate::db::repository::coupon::{self as coupon_repo, CouponFields};
use crate::db::repository::merchant as merchant_repo;
use crate::utils::validation::{MAX_CODE_LEN, MAX_NAME_LEN, validate_required_text};

/// Unvalidated coupon fields
#[derive(Debug, Clone, Copy, Default)]
struct Draft<'a> {
    name: Option<&'a str>,
    code: Option<&'a str>,
    discount_value: Option<f64>,
    discount_type: Option<&'a str>,
}

impl Draft<'_> {
    /// Field checks that need no database access
    fn check(&self, errors: &mut FieldErrors) -> Option<CouponFields> {
        let name = validate_required_text(self.name, "Name", MAX_NAME_LEN)
            .map_err(|msg| errors.add("name", &msg))
            .ok();
        let code = validate_required_text(self.code, "Code", MAX_CODE_LEN)
            .map_err(|msg| errors.add("code", &msg))
            .ok();

        let discount_type = self.discount_type.and_then(|raw| raw.parse::<DiscountType>().ok());
        if discount_type.is_none() {
            errors.add("discount_type", DISCOUNT_TYPE_INVALID);
        }

        let discount_value = match (self.discount_value, discount_type) {
            (None, _) => {
                errors.add("discount_value", DISCOUNT_VALUE_BLANK);
                None
            }
            (Some(v), Some(ty)) => match check_value(v, ty) {
                Ok(()) => Some(v),
                Err(msg) => {
                    errors.add("discount_value", msg);
                    None
                }
            },
            // Type is already reported; only flag values that are bad for any type
            (Some(v), None) => {
                if !(v > 0.0) {
                    errors.add("discount_value", DISCOUNT_VALUE_NOT_POSITIVE);
                }
                None
            }
        };

        Some(CouponFields {
            name: name?.to_string(),
            code: code?.to_string(),
            discount_value: discount_value?,
            discount_type: discount_type?,
        })
    }
}

fn check_value(value: f64, discount_type: DiscountType) -> Result<(), &'static str> {
    // `!(v > 0.0)` also rejects NaN
    match discount_type {
        DiscountType::Dollar if !(value > 0.0) || value.is_infinite() => Err(DOLLAR_VALUE_INVALID),
        DiscountType::Percent if !(value > 0.0 && value <= 100.0) => Err(PERCENT_VALUE_INVALID),
        _ => Ok(()),
    }
}

/// Run every field check, including code uniqueness within the merchant.
/// All problems are reported together.
async fn validate(
    pool: &SqlitePool,
    merchant_id: i64,
    draft: Draft<'_>,
    exclude_id: Option<i64>,
) -> CouponResult<CouponFields> {
    let mut errors = FieldErrors::new();
    let fields = draft.check(&mut errors);

    if let Ok(code) = validate_required_text(draft.code, "Code", MAX_CODE_LEN)
        && coupon_repo::code_taken(pool, merchant_id, code, exclude_id).await?
    {
        errors.add("code", CODE_TAKEN);
    }

    match fields {
        Some(fields) if errors.is_empty() => Ok(fields),
        _ => Err(CouponError::Validation(errors)),
    }
}

async fn require_merchant(pool: &SqlitePool, merchant_id: i64) -> CouponResult<()> {
    if merchant_repo::exists(pool, merchant_id).await? {
        Ok(())
    } else {
        Err(CouponError::NotFound(Resource::Merchant, merchant_id))
    }
}

/// Create a coupon for a merchant.
///
/// Field errors take precedence over the capacity check. An active coupon is
/// only inserted while the merchant holds fewer than five active coupons;
/// otherwise nothing is written.
pub async fn create(pool: &SqlitePool, merchant_id: i64, data: CouponCreate) -> CouponResult<Coupon> {
    require_merchant(pool, merchant_id).await?;

    let draft = Draft {
        name: data.name.as_deref(),
        code: data.code.as_deref(),
        discount_value: data.discount_value,
        discount_type: data.discount_type.as_deref(),
    };
    let fields = validate(pool, merchant_id, draft, None).await?;

    let mut tx = pool.begin().await?;
    let Some(id) = coupon_repo::insert_guarded(
        &mut *tx,
        merchant_id,
        &fields,
        data.active,
        MAX_ACTIVE_COUPONS,
    )
    .await?
    else {
        tracing::warn!(merchant_id, code = %fields.code, "Coupon creation refused: active coupon limit reached");
        return Err(CouponError::Capacity);
    };
    let coupon = coupon_repo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| CouponError::Database(format!("Coupon {id} vanished after insert")))?;
    tx.commit().await?;

    Ok(coupon)
}

/// Mark a coupon active. Activating an already-active coupon succeeds without
/// changes.
pub async fn activate(pool: &SqlitePool, coupon_id: i64) -> CouponResult<Coupon> {
    let mut tx = pool.begin().await?;
    let matched = coupon_repo::activate_guarded(&mut *tx, coupon_id, MAX_ACTIVE_COUPONS).await?;
    let coupon = coupon_repo::find_by_id(&mut *tx, coupon_id)
        .await?
        .ok_or(CouponError::NotFound(Resource::Coupon, coupon_id))?;

    if !matched {
        tracing::warn!(coupon_id, merchant_id = coupon.merchant_id, "Coupon activation refused: active coupon limit reached");
        return Err(CouponError::Capacity);
    }

    tx.commit().await?;
    Ok(coupon)
}

/// Mark a coupon inactive unless a `packaged` invoice still references it.
pub async fn deactivate(pool: &SqlitePool, coupon_id: i64) -> CouponResult<Coupon> {
    let mut tx = pool.begin().await?;
    let matched = coupon_repo::deactivate_guarded(&mut *tx, coupon_id).await?;
    let coupon = coupon_repo::find_by_id(&mut *tx, coupon_id)
        .await?
        .ok_or(CouponError::NotFound(Resource::Coupon, coupon_id))?;

    if !matched {
        tracing::warn!(coupon_id, merchant_id = coupon.merchant_id, "Coupon deactivation refused: pending invoices");
        return Err(CouponError::PendingInvoices);
    }

    tx.commit().await?;
    Ok(coupon)
}

/// PATCH semantics: corrective edits plus an optional `active` transition.
///
/// Missing fields keep their stored value and the merged coupon is checked
/// with the same rules as `create`. Field errors are reported before any
/// guard runs. The transition and the field write share one transaction, so
/// a refused transition or a failed write leaves the coupon untouched.
pub async fn update(pool: &SqlitePool, coupon_id: i64, edits: &CouponUpdate) -> CouponResult<Coupon> {
    let existing = get(pool, coupon_id).await?;

    let fields = if edits.has_edits() {
        let draft = Draft {
            name: Some(edits.name.as_deref().unwrap_or(&existing.name)),
            code: Some(edits.code.as_deref().unwrap_or(&existing.code)),
            discount_value: Some(edits.discount_value.unwrap_or(existing.discount_value)),
            discount_type: edits
                .discount_type
                .as_deref()
                .or(existing.discount_type.map(|t| t.as_str())),
        };
        Some(validate(pool, existing.merchant_id, draft, Some(coupon_id)).await?)
    } else {
        None
    };

    if fields.is_none() && edits.active.is_none() {
        return Ok(existing);
    }

    let mut tx = pool.begin().await?;
    match edits.active {
        Some(true) => {
            if !coupon_repo::activate_guarded(&mut *tx, coupon_id, MAX_ACTIVE_COUPONS).await? {
                tracing::warn!(coupon_id, merchant_id = existing.merchant_id, "Coupon activation refused: active coupon limit reached");
                return Err(CouponError::Capacity);
            }
        }
        Some(false) => {
            if !coupon_repo::deactivate_guarded(&mut *tx, coupon_id).await? {
                tracing::warn!(coupon_id, merchant_id = existing.merchant_id, "Coupon deactivation refused: pending invoices");
                return Err(CouponError::PendingInvoices);
            }
        }
        None => {}
    }
    if let Some(fields) = &fields {
        coupon_repo::update_fields(&mut *tx, coupon_id, fields).await?;
    }
    let coupon = coupon_repo::find_by_id(&mut *tx, coupon_id)
        .await?
        .ok_or(CouponError::NotFound(Resource::Coupon, coupon_id))?;
    tx.commit().await?;

    Ok(coupon)
}

pub async fn get(pool: &SqlitePool, coupon_id: i64) -> CouponResult<Coupon> {
    coupon_repo::find_by_id(pool, coupon_id)
        .await?
        .ok_or(CouponError::NotFound(Resource::Coupon, coupon_id))
}

/// Coupons of a merchant in creation order, optionally filtered by active flag
pub async fn list(
    pool: &SqlitePool,
    merchant_id: i64,
    active: Option<bool>,
) -> CouponResult<Vec<Coupon>> {
    require_merchant(pool, merchant_id).await?;
    Ok(coupon_repo::find_by_merchant(pool, merchant_id, active).await?)
}

pub async fn merchant_summary(pool: &SqlitePool, merchant_id: i64) -> CouponResult<MerchantSummary> {
    merchant_repo::find_summary(pool, merchant_id)
        .await?
        .ok_or(CouponError::NotFound(Resource::Merchant, merchant_id))
}
