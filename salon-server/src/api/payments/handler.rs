//! Payment API Handlers

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::ServerState;
use crate::db::repository::{
    AppointmentRepository, PaymentRepository, StaffRepository,
};
use crate::invoicing::InvoiceStore;
use crate::money::{to_decimal, to_f64};
use crate::utils::{AppError, AppResult};
use shared::models::{Payment, PaymentCreate};

use crate::api::TenantQuery;

/// Settlement response: the payment record plus its invoice URL
#[derive(Debug, Serialize)]
pub struct PaymentCreated {
    pub payment: Payment,
    pub invoice_pdf_url: String,
}

/// POST /api/payments - 结算预约
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<(StatusCode, Json<PaymentCreated>)> {
    let (payment, invoice_pdf_url) = state.settlement().settle(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(PaymentCreated {
            payment,
            invoice_pdf_url,
        }),
    ))
}

/// Equal tip share attributed to one staff member of a payment
#[derive(Debug, Serialize)]
pub struct StaffTip {
    pub staff_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tip: f64,
}

/// Payment list view: record plus service count and per-staff tip split
#[derive(Debug, Serialize)]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: Payment,
    pub invoice_pdf_url: String,
    pub service_count: usize,
    pub staff_tips: Vec<StaffTip>,
}

/// GET /api/payments - 获取支付列表 (with staff tip split)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<PaymentView>>> {
    let payments = PaymentRepository::new(state.db.clone())
        .find_all(&query.salon_id)
        .await?;
    let appointments = AppointmentRepository::new(state.db.clone());
    let staff_repo = StaffRepository::new(state.db.clone());

    let mut views = Vec::with_capacity(payments.len());
    for payment in payments {
        let appointment = appointments.find_by_id(&payment.appointment).await?;

        let mut service_count = 0;
        let mut staff_tips = Vec::new();
        if let Some(appointment) = appointment {
            service_count = appointment.services.len();

            let staff_ids: HashSet<&str> = appointment
                .services
                .iter()
                .map(|line| line.staff.as_str())
                .collect();
            if !staff_ids.is_empty() && payment.tips > 0.0 {
                let share = to_f64(
                    to_decimal(payment.tips) / rust_decimal::Decimal::from(staff_ids.len() as i64),
                );
                for staff_id in staff_ids {
                    if let Some(staff) = staff_repo.find_by_id(staff_id).await? {
                        staff_tips.push(StaffTip {
                            staff_id: staff.id.clone().unwrap_or_default(),
                            name: staff.full_name,
                            email: staff.email,
                            phone: staff.phone_number,
                            tip: share,
                        });
                    }
                }
            }
        }

        let payment_key = crate::db::repository::strip_table_prefix(
            "payment",
            payment.id.as_deref().unwrap_or_default(),
        )
        .to_string();
        views.push(PaymentView {
            invoice_pdf_url: format!("/api/uploads/{}", InvoiceStore::file_name(&payment_key)),
            service_count,
            staff_tips,
            payment,
        });
    }

    Ok(Json(views))
}

/// Query params for invoice retrieval
#[derive(Debug, Deserialize)]
pub struct InvoiceQuery {
    pub invoice_id: String,
}

/// GET /api/payments/invoice?invoice_id= - 查看发票 PDF
pub async fn invoice(
    State(state): State<ServerState>,
    Query(query): Query<InvoiceQuery>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    if query.invoice_id.is_empty() {
        return Err(AppError::invalid("invoice_id is required"));
    }
    let file_name = InvoiceStore::file_name(&query.invoice_id);
    let bytes = state.invoices.store().read(&file_name)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("inline; filename=\"{}\"", file_name))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    Ok((headers, bytes))
}
