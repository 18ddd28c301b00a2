use async_graphql::{async_trait, guard::Guard, Context, EmptySubscription, Object, Result, Schema};
use chrono::{NaiveDate, Utc};

use hazri_common::utils::Role as AuthRole;
use hazri_db::models::attendance::{
    AttendanceRecord as AttendanceRecordData, NewAttendanceRecord as NewAttendanceRecordData,
};
use hazri_db::models::enrollment::{Enrollment as EnrollmentData, NewEnrollment as NewEnrollmentData};
use hazri_db::models::goal::AttendanceGoal as AttendanceGoalData;
use hazri_db::models::institute::{Institute as InstituteData, NewInstitute as NewInstituteData};
use hazri_db::models::subject::{NewSubject as NewSubjectData, Subject as SubjectData};
use hazri_db::models::warning::AttendanceWarning as AttendanceWarningData;
use hazri_db::store::DbStore;

use crate::{get_conn_from_ctx, get_id_from_ctx, get_role_from_ctx};

use attendance::{
    window_from, AttendanceEntry, AttendanceReport, AttendanceStats, GoalInput, GoalSettings,
    MarkAttendanceInput,
};
use institute::Institute;
use subject::{Subject, SubjectInput};
use warning::WarningRecord;

pub mod attendance;
pub mod institute;
pub mod subject;
pub mod warning;

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

pub struct Query;

#[Object]
impl Query {
    /// Institutes visible to the caller: owned ones for teachers, enrolled
    /// ones for students.
    #[graphql(guard(LoginGuard()))]
    async fn my_institutes(&self, ctx: &Context<'_>) -> Result<Vec<Institute>> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let conn = get_conn_from_ctx(ctx);
        let institutes = match get_role_from_ctx(ctx) {
            Some(AuthRole::Teacher) => InstituteData::list_by_owner(uid, &conn)?,
            _ => InstituteData::list_enrolled(uid, &conn)?,
        };
        Ok(institutes.iter().map(|i| i.into()).collect())
    }

    #[graphql(guard(LoginGuard()))]
    async fn subjects(&self, ctx: &Context<'_>, institute_id: i32) -> Result<Vec<Subject>> {
        Ok(SubjectData::list_active(institute_id, &get_conn_from_ctx(ctx))?
            .iter()
            .map(|s| s.into())
            .collect())
    }

    #[graphql(guard(LoginGuard()))]
    async fn subject_attendance(
        &self,
        ctx: &Context<'_>,
        institute_id: i32,
        subject_id: i32,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<AttendanceStats> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let conn = get_conn_from_ctx(ctx);
        Ok(hazri_core::subject_attendance(
            &DbStore::new(&conn),
            uid,
            institute_id,
            subject_id,
            window_from(start_date, end_date),
        )
        .into())
    }

    #[graphql(guard(LoginGuard()))]
    async fn institute_attendance(
        &self,
        ctx: &Context<'_>,
        institute_id: i32,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<AttendanceStats> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let conn = get_conn_from_ctx(ctx);
        Ok(hazri_core::institute_attendance(
            &DbStore::new(&conn),
            uid,
            institute_id,
            window_from(start_date, end_date),
        )
        .into())
    }

    /// Attendance judged against the caller's goal, for one subject or the
    /// whole institute.
    #[graphql(guard(LoginGuard()))]
    async fn attendance_status(
        &self,
        ctx: &Context<'_>,
        institute_id: i32,
        subject_id: Option<i32>,
    ) -> Result<AttendanceReport> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let conn = get_conn_from_ctx(ctx);
        Ok(hazri_core::evaluate(&DbStore::new(&conn), uid, institute_id, subject_id).into())
    }

    /// A teacher's view of one of their students.
    #[graphql(guard(RoleGuard(role = "AuthRole::Teacher")))]
    async fn student_attendance_status(
        &self,
        ctx: &Context<'_>,
        student_id: i32,
        institute_id: i32,
        subject_id: Option<i32>,
    ) -> Result<AttendanceReport> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let conn = get_conn_from_ctx(ctx);
        let institute = InstituteData::find(institute_id, &conn)?;
        if institute.owner_id != uid {
            return Err("Not your institute".into());
        }
        Ok(hazri_core::evaluate(&DbStore::new(&conn), student_id, institute_id, subject_id).into())
    }

    #[graphql(guard(LoginGuard()))]
    async fn my_warnings(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = true)] unread_only: bool,
    ) -> Result<Vec<WarningRecord>> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        Ok(
            AttendanceWarningData::list_for_user(uid, unread_only, &get_conn_from_ctx(ctx))?
                .iter()
                .map(|w| w.into())
                .collect(),
        )
    }

    #[graphql(guard(LoginGuard()))]
    async fn attendance_history(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: i32,
    ) -> Result<Vec<AttendanceEntry>> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        Ok(
            AttendanceRecordData::history_for_user(uid, limit as i64, &get_conn_from_ctx(ctx))?
                .iter()
                .map(|r| r.into())
                .collect(),
        )
    }
}

pub struct Mutation;

#[Object]
impl Mutation {
    /// Record today's attendance and synchronously re-evaluate warnings.
    /// The warning trigger swallows its own failures, so a committed record
    /// is never rolled back by warning bookkeeping.
    #[graphql(guard(RoleGuard(role = "AuthRole::Student")))]
    async fn mark_attendance(
        &self,
        ctx: &Context<'_>,
        input: MarkAttendanceInput,
    ) -> Result<AttendanceEntry> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let conn = get_conn_from_ctx(ctx);

        let subject = SubjectData::find(input.subject_id, &conn)?;
        if subject.institute_id != input.institute_id || !subject.is_active {
            return Err("Subject does not belong to this institute".into());
        }
        if !EnrollmentData::is_enrolled(uid, input.institute_id, &conn)? {
            return Err("You are not enrolled in this institute".into());
        }

        let record = NewAttendanceRecordData {
            user_id: uid,
            institute_id: input.institute_id,
            subject_id: input.subject_id,
            attendance_date: Utc::today().naive_utc(),
            status: "present".to_string(),
            selfie_image_path: input.selfie_path,
            notes: input.notes,
        }
        .create(&conn)?
        .ok_or("Attendance already marked for today for this subject")?;

        if hazri_core::on_attendance_recorded(&DbStore::new(&conn), record.id) {
            log::info!(
                "attendance warning created for user {} subject {}",
                uid, record.subject_id
            );
        }

        Ok((&record).into())
    }

    #[graphql(guard(RoleGuard(role = "AuthRole::Student")))]
    async fn set_goal(&self, ctx: &Context<'_>, input: GoalInput) -> Result<GoalSettings> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        if input.warning_threshold > input.target_percentage {
            return Err("Warning threshold cannot exceed the target".into());
        }
        let goal = AttendanceGoalData::set(
            uid,
            input.institute_id,
            input.target_percentage,
            input.warning_threshold,
            &get_conn_from_ctx(ctx),
        )?;
        Ok(GoalSettings {
            target_percentage: goal.target_percentage,
            warning_threshold: goal.warning_threshold,
        })
    }

    #[graphql(guard(LoginGuard()))]
    async fn mark_warning_read(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let rows = AttendanceWarningData::mark_read(
            id,
            Utc::now().naive_utc(),
            &get_conn_from_ctx(ctx),
        )?;
        Ok(rows > 0)
    }

    #[graphql(guard(RoleGuard(role = "AuthRole::Teacher")))]
    async fn create_institute(&self, ctx: &Context<'_>, name: String) -> Result<Institute> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let created = NewInstituteData {
            owner_id: uid,
            name,
        }
        .create(&get_conn_from_ctx(ctx))?;
        Ok((&created).into())
    }

    #[graphql(guard(RoleGuard(role = "AuthRole::Teacher")))]
    async fn create_subject(&self, ctx: &Context<'_>, input: SubjectInput) -> Result<Subject> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let conn = get_conn_from_ctx(ctx);
        let institute = InstituteData::find(input.institute_id, &conn)?;
        if institute.owner_id != uid {
            return Err("Not your institute".into());
        }
        let created = NewSubjectData {
            institute_id: input.institute_id,
            name: input.name,
            difficulty: input.difficulty.to_string(),
            color_code: input.color_code.unwrap_or_else(|| "#4e73df".to_string()),
        }
        .create(&conn)?;
        Ok((&created).into())
    }

    #[graphql(guard(RoleGuard(role = "AuthRole::Teacher")))]
    async fn enroll_student(
        &self,
        ctx: &Context<'_>,
        student_id: i32,
        institute_id: i32,
    ) -> Result<bool> {
        let uid = get_id_from_ctx(ctx).ok_or("Invalid token")?;
        let conn = get_conn_from_ctx(ctx);
        let institute = InstituteData::find(institute_id, &conn)?;
        if institute.owner_id != uid {
            return Err("Not your institute".into());
        }
        NewEnrollmentData {
            student_id,
            teacher_id: uid,
            institute_id,
        }
        .create(&conn)?;
        Ok(true)
    }
}

pub(crate) struct RoleGuard {
    role: AuthRole,
}

#[async_trait::async_trait]
impl Guard for RoleGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        match get_role_from_ctx(ctx) {
            Some(role) => {
                if role == self.role {
                    Ok(())
                } else {
                    Err("Forbidden".into())
                }
            }
            None => Err("Not Login".into()),
        }
    }
}

pub(crate) struct LoginGuard;

#[async_trait::async_trait]
impl Guard for LoginGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        get_id_from_ctx(ctx).ok_or("Not Login".into()).map(|_| ())
    }
}
