//! Notification history — records of compiled letters, over `reports.json`.

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use chainletter_common::error::AppError;
use chainletter_common::types::{AddressEntry, Report, ReportStatus};

use crate::{REPORTS_FILE, Store};

/// Parameters for recording a compiled notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportParams {
    pub addresses: Vec<AddressEntry>,
    pub exchanges: Vec<Uuid>,
    pub status: Option<ReportStatus>,
}

/// Parameters for updating a report's lifecycle status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReportParams {
    pub status: ReportStatus,
}

impl Store {
    /// List the notification history, newest first. Insertion order breaks
    /// timestamp ties, later records first.
    pub fn list_reports(&self) -> Vec<Report> {
        let mut reports = self.inner.read().reports.clone();
        // Reversed before the stable sort so ties keep the later insertion
        // ahead.
        reports.reverse();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports
    }

    /// Record a compiled notification.
    pub fn create_report(&self, params: CreateReportParams) -> Result<Report, AppError> {
        if params.addresses.is_empty() {
            return Err(AppError::Validation(
                "A report needs at least one address".to_string(),
            ));
        }

        let report = Report {
            id: Uuid::new_v4(),
            addresses: params.addresses,
            exchanges: params.exchanges,
            status: params.status.unwrap_or(ReportStatus::Pending),
            created_at: Utc::now(),
        };

        let mut inner = self.inner.write();
        inner.reports.push(report.clone());
        self.save(REPORTS_FILE, &inner.reports)?;

        tracing::info!(
            report_id = %report.id,
            addresses = report.addresses.len(),
            recipients = report.exchanges.len(),
            "Report recorded"
        );
        Ok(report)
    }

    /// Update a report's status.
    pub fn update_report(&self, id: Uuid, params: UpdateReportParams) -> Result<Report, AppError> {
        let mut inner = self.inner.write();
        let report = inner
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        report.status = params.status;
        let updated = report.clone();
        self.save(REPORTS_FILE, &inner.reports)?;

        tracing::info!(report_id = %id, status = %updated.status, "Report updated");
        Ok(updated)
    }
}
