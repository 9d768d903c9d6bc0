use crate::core::ledger;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceStatus;
use crate::models::member::Member;
use chrono::NaiveDate;

pub struct MarkLogic;

impl MarkLogic {
    /// Apply the toggle rule against the stored mark and persist the
    /// outcome. Returns the member together with the resulting status so
    /// the CLI can report what actually happened.
    pub fn toggle_mark(
        pool: &mut DbPool,
        operator: &str,
        member_id: i64,
        date: NaiveDate,
        selected: AttendanceStatus,
    ) -> AppResult<(Member, AttendanceStatus)> {
        let member = queries::find_member(&pool.conn, operator, member_id)?
            .ok_or(AppError::MemberNotFound(member_id))?;

        let current = queries::get_mark(&pool.conn, operator, member_id, date)?;
        let next = ledger::toggle(current, selected);

        queries::set_mark(&pool.conn, operator, member_id, date, next)?;

        ttlog(
            &pool.conn,
            "mark",
            &format!("{}@{}", member_id, date.format("%Y-%m-%d")),
            &format!("Member '{}' marked {}", member.name, next.as_str()),
        )?;

        Ok((member, next))
    }
}
