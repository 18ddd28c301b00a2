use std::str::FromStr;

use async_graphql::*;
use chrono::NaiveDateTime;

use hazri_core::types::Severity;
use hazri_db::models::institute::Institute as InstituteData;
use hazri_db::models::subject::Subject as SubjectData;
use hazri_db::models::warning::AttendanceWarning as AttendanceWarningData;

use crate::get_conn_from_ctx;

use super::attendance::AlertSeverity;

/// A persisted warning row; `subject_id = None` marks an institute-level
/// warning. Names resolve lazily for dashboard display.
#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub(crate) struct WarningRecord {
    pub(crate) id: i32,
    pub(crate) institute_id: i32,
    pub(crate) subject_id: Option<i32>,
    pub(crate) severity: AlertSeverity,
    pub(crate) message: String,
    pub(crate) attendance_percentage: f64,
    pub(crate) threshold_percentage: f64,
    pub(crate) is_read: bool,
    pub(crate) created_at: NaiveDateTime,
    pub(crate) read_at: Option<NaiveDateTime>,
}

#[ComplexObject]
impl WarningRecord {
    async fn institute_name(&self, ctx: &Context<'_>) -> Result<String> {
        Ok(InstituteData::find(self.institute_id, &get_conn_from_ctx(ctx))?.name)
    }

    async fn subject_name(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        match self.subject_id {
            Some(sid) => Ok(Some(SubjectData::find(sid, &get_conn_from_ctx(ctx))?.name)),
            None => Ok(None),
        }
    }
}

impl From<&AttendanceWarningData> for WarningRecord {
    fn from(warning: &AttendanceWarningData) -> Self {
        WarningRecord {
            id: warning.id,
            institute_id: warning.institute_id,
            subject_id: warning.subject_id,
            severity: Severity::from_str(&warning.warning_type)
                .expect(&format!(
                    "cannot convert {} to Severity",
                    &warning.warning_type
                ))
                .into(),
            message: warning.message.clone(),
            attendance_percentage: warning.attendance_percentage,
            threshold_percentage: warning.threshold_percentage,
            is_read: warning.is_read,
            created_at: warning.created_at,
            read_at: warning.read_at,
        }
    }
}
