use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::CompletionReport;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    pub donation_id: Uuid,
    pub completion_date: NaiveDate,
    pub photo_url: String,
    pub description: String,
    pub people_served: Option<i64>,
    pub location: Option<String>,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportList {
    pub items: Vec<CompletionReport>,
}
