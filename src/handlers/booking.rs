use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveTime, Utc};
use sqlx::types::Json as Jsonb;
use sqlx::PgPool;
use tracing::instrument;

use crate::domain::rules;
use crate::domain::types::{BookingStatus, Role};
use crate::dtos::booking::{
    AssignStaffRequest, BookingListQuery, CancelBookingRequest, CompleteBookingRequest,
    CreateBookingRequest, RecordPaymentRequest, SetExpensesRequest, UpdateBookingRequest,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::booking::Booking;
use crate::models::package::Package;
use crate::models::transaction::Transaction;
use crate::state::AppState;

fn validate_event_time(time: &str) -> Result<(), AppError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::validation("Event time must be 24h HH:MM"))
}

async fn fetch_booking(db_pool: &PgPool, id: i64) -> Result<Booking, AppError> {
    sqlx::query_as::<_, Booking>(&format!("{} WHERE id = $1", Booking::SELECT))
        .bind(id)
        .fetch_optional(db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))
}

fn visible_to(booking: &Booking, auth: &AuthContext) -> bool {
    match auth.role {
        Role::Manager => true,
        Role::Customer => booking.user_id == Some(auth.user_id),
        Role::Staff => {
            booking.status == BookingStatus::Confirmed
                && booking.assigned_staff.contains(&auth.user_id)
        }
    }
}

// POST /bookings - any authenticated user; always enters `pending`
pub async fn create_booking(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    if req.customer_name.trim().is_empty() {
        return Err(AppError::validation("Customer name required"));
    }
    if req.customer_email.trim().is_empty() {
        return Err(AppError::validation("Customer email required"));
    }
    if req.guest_count <= 0 {
        return Err(AppError::validation("Guest count must be greater than 0"));
    }
    validate_event_time(&req.event_time)?;

    let food_addons = req.food_addons_price.unwrap_or(0.0);
    let service_addons = req.service_addons_price.unwrap_or(0.0);
    let discount = req.discount.unwrap_or(0.0);
    if food_addons < 0.0 || service_addons < 0.0 || discount < 0.0 {
        return Err(AppError::validation("Prices cannot be negative"));
    }

    // Package price becomes the base price; a custom quote needs an explicit
    // base price instead.
    let (base_price, package_id, package_name) = match req.package_id {
        Some(package_id) => {
            let package =
                sqlx::query_as::<_, Package>(&format!("{} WHERE id = $1", Package::SELECT))
                    .bind(package_id)
                    .fetch_optional(&db_pool)
                    .await?
                    .ok_or_else(|| AppError::not_found("Package not found"))?;
            (package.price, Some(package.id), Some(package.name))
        }
        None => {
            let base = req
                .base_price
                .ok_or_else(|| AppError::validation("Either package_id or base_price is required"))?;
            if base < 0.0 {
                return Err(AppError::validation("Prices cannot be negative"));
            }
            (base, None, None)
        }
    };

    let total_price = base_price + food_addons + service_addons;
    if discount > total_price {
        return Err(AppError::validation("Discount cannot exceed the total price"));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO bookings \
         (user_id, customer_name, customer_email, customer_phone, event_type, event_date, \
          event_time, guest_count, location_address, latitude, longitude, package_id, \
          package_name, base_price, food_addons_price, service_addons_price, discount, \
          total_price, price_notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                 ($14)::FLOAT8, ($15)::FLOAT8, ($16)::FLOAT8, ($17)::FLOAT8, ($18)::FLOAT8, $19) \
         RETURNING id",
    )
    .bind(auth.user_id)
    .bind(req.customer_name.trim())
    .bind(req.customer_email.trim())
    .bind(req.customer_phone.trim())
    .bind(req.event_type)
    .bind(req.event_date)
    .bind(&req.event_time)
    .bind(req.guest_count)
    .bind(req.location_address.trim())
    .bind(req.latitude)
    .bind(req.longitude)
    .bind(package_id)
    .bind(&package_name)
    .bind(base_price)
    .bind(food_addons)
    .bind(service_addons)
    .bind(discount)
    .bind(total_price)
    .bind(&req.price_notes)
    .fetch_one(&db_pool)
    .await?;

    let booking = fetch_booking(&db_pool, id).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /bookings - customers see their own, staff their confirmed
// assignments, managers everything (with optional filters)
#[instrument(skip(state, auth))]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = match auth.role {
        Role::Customer => {
            sqlx::query_as::<_, Booking>(&format!(
                "{} WHERE user_id = $1 ORDER BY event_date DESC, id DESC",
                Booking::SELECT
            ))
            .bind(auth.user_id)
            .fetch_all(&state.db_pool)
            .await?
        }
        Role::Staff => {
            sqlx::query_as::<_, Booking>(&format!(
                "{} WHERE status = 'confirmed' AND assigned_staff @> $1 \
                 ORDER BY event_date, event_time",
                Booking::SELECT
            ))
            .bind(Jsonb(vec![auth.user_id]))
            .fetch_all(&state.db_pool)
            .await?
        }
        Role::Manager => {
            let mut sql = format!("{} WHERE 1=1", Booking::SELECT);
            let mut idx = 0;
            if params.status.is_some() {
                idx += 1;
                sql.push_str(&format!(" AND status = ${idx}"));
            }
            if params.from.is_some() {
                idx += 1;
                sql.push_str(&format!(" AND event_date >= ${idx}"));
            }
            if params.to.is_some() {
                idx += 1;
                sql.push_str(&format!(" AND event_date <= ${idx}"));
            }
            sql.push_str(" ORDER BY event_date DESC, id DESC");

            let mut query = sqlx::query_as::<_, Booking>(&sql);
            if let Some(status) = params.status {
                query = query.bind(status);
            }
            if let Some(from) = params.from {
                query = query.bind(from);
            }
            if let Some(to) = params.to {
                query = query.bind(to);
            }
            query.fetch_all(&state.db_pool).await?
        }
    };

    Ok(Json(bookings))
}

// GET /bookings/{id}
pub async fn get_booking(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    let booking = fetch_booking(&db_pool, id).await?;
    if !visible_to(&booking, &auth) {
        return Err(AppError::forbidden("You cannot view this booking"));
    }
    Ok(Json(booking))
}

// PATCH /bookings/{id} - manager edits commercial/scheduling fields
pub async fn update_booking(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can edit bookings"));
    }

    let existing = fetch_booking(&db_pool, id).await?;
    if matches!(existing.status, BookingStatus::Completed | BookingStatus::Cancelled) {
        return Err(AppError::validation(format!(
            "Cannot edit a {} booking",
            existing.status
        )));
    }

    let event_time = req.event_time.unwrap_or(existing.event_time);
    validate_event_time(&event_time)?;

    let guest_count = req.guest_count.unwrap_or(existing.guest_count);
    if guest_count <= 0 {
        return Err(AppError::validation("Guest count must be greater than 0"));
    }

    let food_addons = req.food_addons_price.unwrap_or(existing.food_addons_price);
    let service_addons = req.service_addons_price.unwrap_or(existing.service_addons_price);
    let discount = req.discount.unwrap_or(existing.discount);
    if food_addons < 0.0 || service_addons < 0.0 || discount < 0.0 {
        return Err(AppError::validation("Prices cannot be negative"));
    }

    let total_price = existing.base_price + food_addons + service_addons;
    if discount > total_price {
        return Err(AppError::validation("Discount cannot exceed the total price"));
    }
    if total_price - discount < existing.amount_paid {
        return Err(AppError::validation(
            "Adjusted price would fall below the amount already paid",
        ));
    }

    let final_price = req.final_price.or(existing.final_price);
    if let Some(fp) = final_price {
        if fp < 0.0 {
            return Err(AppError::validation("Prices cannot be negative"));
        }
    }

    sqlx::query(
        "UPDATE bookings SET event_date = $2, event_time = $3, guest_count = $4, \
         location_address = $5, food_addons_price = ($6)::FLOAT8, \
         service_addons_price = ($7)::FLOAT8, discount = ($8)::FLOAT8, \
         total_price = ($9)::FLOAT8, final_price = ($10)::FLOAT8, price_notes = $11 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(req.event_date.unwrap_or(existing.event_date))
    .bind(&event_time)
    .bind(guest_count)
    .bind(req.location_address.unwrap_or(existing.location_address))
    .bind(food_addons)
    .bind(service_addons)
    .bind(discount)
    .bind(total_price)
    .bind(final_price)
    .bind(req.price_notes.or(existing.price_notes))
    .execute(&db_pool)
    .await?;

    fetch_booking(&db_pool, id).await.map(Json)
}

// POST /bookings/{id}/confirm - manager, pending -> confirmed
pub async fn confirm_booking(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can confirm bookings"));
    }

    let booking = fetch_booking(&db_pool, id).await?;
    if !booking.status.can_transition_to(BookingStatus::Confirmed) {
        return Err(AppError::validation(format!(
            "Cannot confirm a {} booking",
            booking.status
        )));
    }

    sqlx::query("UPDATE bookings SET status = 'confirmed' WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    fetch_booking(&db_pool, id).await.map(Json)
}

// POST /bookings/{id}/cancel - manager, requires a non-empty reason. The
// reason check fires before any write.
pub async fn cancel_booking(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<CancelBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can cancel bookings"));
    }
    let reason = rules::cancel_reason(&req.reason).map_err(AppError::validation)?;

    let booking = fetch_booking(&db_pool, id).await?;
    if !booking.status.can_transition_to(BookingStatus::Cancelled) {
        return Err(AppError::validation(format!(
            "Cannot cancel a {} booking",
            booking.status
        )));
    }

    sqlx::query(
        "UPDATE bookings SET status = 'cancelled', cancel_reason = $2, cancelled_by = $3, \
         cancelled_at = $4 WHERE id = $1",
    )
    .bind(id)
    .bind(reason)
    .bind(auth.user_id)
    .bind(Utc::now())
    .execute(&db_pool)
    .await?;

    fetch_booking(&db_pool, id).await.map(Json)
}

// PATCH /bookings/{id}/payment - manager records a collected payment
pub async fn record_payment(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<Json<Booking>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can record payments"));
    }
    let booking = fetch_booking(&db_pool, id).await?;
    if matches!(booking.status, BookingStatus::Completed | BookingStatus::Cancelled) {
        return Err(AppError::validation(format!(
            "Cannot record a payment on a {} booking",
            booking.status
        )));
    }

    let (new_amount_paid, payment_status) =
        rules::register_payment(booking.amount_paid, req.amount, booking.net_price())
            .map_err(AppError::validation)?;

    sqlx::query(
        "UPDATE bookings SET amount_paid = ($2)::FLOAT8, payment_status = $3, \
         payment_method = COALESCE($4, payment_method) WHERE id = $1",
    )
    .bind(id)
    .bind(new_amount_paid)
    .bind(payment_status)
    .bind(&req.payment_method)
    .execute(&db_pool)
    .await?;

    fetch_booking(&db_pool, id).await.map(Json)
}

// PUT /bookings/{id}/expenses - manager, accepts both expense shapes
pub async fn set_expenses(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<SetExpensesRequest>,
) -> Result<Json<Booking>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can record expenses"));
    }
    req.expenses.validate().map_err(AppError::validation)?;

    let booking = fetch_booking(&db_pool, id).await?;
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::validation("Cannot record expenses on a cancelled booking"));
    }

    sqlx::query("UPDATE bookings SET expenses = $2 WHERE id = $1")
        .bind(id)
        .bind(Jsonb(&req.expenses))
        .execute(&db_pool)
        .await?;

    fetch_booking(&db_pool, id).await.map(Json)
}

// PUT /bookings/{id}/staff - manager assigns active staff users
pub async fn assign_staff(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<AssignStaffRequest>,
) -> Result<Json<Booking>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can assign staff"));
    }

    let booking = fetch_booking(&db_pool, id).await?;
    if matches!(booking.status, BookingStatus::Completed | BookingStatus::Cancelled) {
        return Err(AppError::validation(format!(
            "Cannot assign staff to a {} booking",
            booking.status
        )));
    }

    let mut staff_ids = req.staff_ids;
    staff_ids.sort_unstable();
    staff_ids.dedup();

    let known: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM users WHERE id = ANY($1) AND role = 'staff' AND is_active",
    )
    .bind(&staff_ids)
    .fetch_one(&db_pool)
    .await?;

    if known != staff_ids.len() as i64 {
        return Err(AppError::validation("One or more ids are not active staff users"));
    }

    sqlx::query("UPDATE bookings SET assigned_staff = $2 WHERE id = $1")
        .bind(id)
        .bind(Jsonb(&staff_ids))
        .execute(&db_pool)
        .await?;

    fetch_booking(&db_pool, id).await.map(Json)
}

// POST /bookings/{id}/complete - manager; marks the booking completed and
// writes the derived transaction snapshot in the same SQL transaction. The
// snapshot is never re-synced afterwards.
pub async fn complete_booking(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<CompleteBookingRequest>,
) -> Result<Json<Transaction>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can complete bookings"));
    }
    if let Some(fp) = req.final_price {
        if fp < 0.0 {
            return Err(AppError::validation("Prices cannot be negative"));
        }
    }

    let mut tx = db_pool.begin().await?;

    // Row lock so two managers cannot complete the same booking twice.
    let booking = sqlx::query_as::<_, Booking>(&format!(
        "{} WHERE id = $1 FOR UPDATE",
        Booking::SELECT
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("Booking not found"))?;

    if !booking.status.can_transition_to(BookingStatus::Completed) {
        return Err(AppError::validation(format!(
            "Cannot complete a {} booking",
            booking.status
        )));
    }

    // A post-event adjustment from the request wins; otherwise an earlier
    // adjustment stands; a booking with neither keeps final_price NULL.
    let final_price = req.final_price.or(booking.final_price);
    let figures = rules::completion_figures(
        final_price,
        booking.net_price(),
        booking.amount_paid,
        booking.expense_total(),
    );

    sqlx::query(
        "UPDATE bookings SET status = 'completed', final_price = ($2)::FLOAT8, \
         payment_status = $3 WHERE id = $1",
    )
    .bind(id)
    .bind(final_price)
    .bind(figures.payment_status)
    .execute(&mut *tx)
    .await?;

    let transaction = sqlx::query_as::<_, Transaction>(
        "INSERT INTO transactions \
         (booking_id, customer_name, customer_email, event_type, package_name, amount, \
          downpayment, remaining_balance, total_expenses, profit, event_date, manager_id) \
         VALUES ($1, $2, $3, $4, $5, ($6)::FLOAT8, ($7)::FLOAT8, ($8)::FLOAT8, \
                 ($9)::FLOAT8, ($10)::FLOAT8, $11, $12) \
         RETURNING id, booking_id, customer_name, customer_email, event_type, package_name, \
                   amount::FLOAT8 AS amount, downpayment::FLOAT8 AS downpayment, \
                   remaining_balance::FLOAT8 AS remaining_balance, \
                   total_expenses::FLOAT8 AS total_expenses, profit::FLOAT8 AS profit, \
                   status, event_date, completed_at, manager_id",
    )
    .bind(booking.id)
    .bind(&booking.customer_name)
    .bind(&booking.customer_email)
    .bind(booking.event_type)
    .bind(&booking.package_name)
    .bind(figures.amount)
    .bind(figures.downpayment)
    .bind(figures.remaining_balance)
    .bind(figures.total_expenses)
    .bind(figures.profit)
    .bind(booking.event_date)
    .bind(auth.user_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Json(transaction))
}
