//! Employee, attendance and payroll operations.

use crate::models::{
    AttendanceFilter, AttendanceRecord, AttendanceStatus, CreateAttendance, CreateEmployee,
    CreatePayrollEntry, Employee, ListEmployeesFilter, ListPayrollFilter, PayrollEntry,
    UpdateAttendance, UpdateEmployee,
};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::Database;
use chrono::NaiveDate;
use service_core::error::AppError;
use tracing::{info, instrument};

impl Database {
    // -------------------------------------------------------------------------
    // Employee Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn create_employee(&self, input: &CreateEmployee) -> Result<Employee, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_employee"])
            .start_timer();

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, job_title, phone, monthly_salary, hired_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, job_title, phone, monthly_salary, hired_date, active, created_utc
            "#,
        )
        .bind(&input.name)
        .bind(&input.job_title)
        .bind(&input.phone)
        .bind(input.monthly_salary)
        .bind(input.hired_date)
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(employee_id = employee.id, "Employee created");

        Ok(employee)
    }

    #[instrument(skip(self, filter))]
    pub async fn list_employees(
        &self,
        filter: &ListEmployeesFilter,
    ) -> Result<Vec<Employee>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_employees"])
            .start_timer();

        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, job_title, phone, monthly_salary, hired_date, active, created_utc
            FROM employees
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::bool IS NULL OR active = $2)
            ORDER BY name, id
            "#,
        )
        .bind(&filter.search)
        .bind(filter.active)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(employees)
    }

    #[instrument(skip(self))]
    pub async fn get_employee(&self, id: i64) -> Result<Option<Employee>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_employee"])
            .start_timer();

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, job_title, phone, monthly_salary, hired_date, active, created_utc
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();

        Ok(employee)
    }

    #[instrument(skip(self, input))]
    pub async fn update_employee(
        &self,
        id: i64,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_employee"])
            .start_timer();

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET name = COALESCE($2, name),
                job_title = COALESCE($3, job_title),
                phone = COALESCE($4, phone),
                monthly_salary = COALESCE($5, monthly_salary),
                hired_date = COALESCE($6, hired_date),
                active = COALESCE($7, active)
            WHERE id = $1
            RETURNING id, name, job_title, phone, monthly_salary, hired_date, active, created_utc
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.job_title)
        .bind(&input.phone)
        .bind(input.monthly_salary)
        .bind(input.hired_date)
        .bind(input.active)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();
        if employee.is_some() {
            info!(employee_id = id, "Employee updated");
        }

        Ok(employee)
    }

    #[instrument(skip(self))]
    pub async fn delete_employee(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_employee"])
            .start_timer();

        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(employee_id = id, "Employee deleted");
        }

        Ok(deleted)
    }

    // -------------------------------------------------------------------------
    // Attendance Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn create_attendance(
        &self,
        input: &CreateAttendance,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_attendance"])
            .start_timer();

        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records (employee_id, day, check_in, check_out, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, employee_id, day, check_in, check_out, status, created_utc
            "#,
        )
        .bind(input.employee_id)
        .bind(input.day)
        .bind(input.check_in)
        .bind(input.check_out)
        .bind(status.as_str())
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(
            attendance_id = record.id,
            employee_id = record.employee_id,
            status = record.status,
            "Attendance recorded"
        );

        Ok(record)
    }

    #[instrument(skip(self, filter))]
    pub async fn list_attendance(
        &self,
        filter: &AttendanceFilter,
        month_range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_attendance"])
            .start_timer();

        let (month_start, month_end) = match month_range {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };

        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, employee_id, day, check_in, check_out, status, created_utc
            FROM attendance_records
            WHERE ($1::bigint IS NULL OR employee_id = $1)
              AND ($2::date IS NULL OR day >= $2)
              AND ($3::date IS NULL OR day <= $3)
              AND ($4::date IS NULL OR day = $4)
            ORDER BY day DESC, employee_id
            "#,
        )
        .bind(filter.employee_id)
        .bind(month_start)
        .bind(month_end)
        .bind(filter.day)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(records)
    }

    #[instrument(skip(self, input))]
    pub async fn update_attendance(
        &self,
        id: i64,
        input: &UpdateAttendance,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_attendance"])
            .start_timer();

        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            UPDATE attendance_records
            SET check_in = $2, check_out = $3, status = $4
            WHERE id = $1
            RETURNING id, employee_id, day, check_in, check_out, status, created_utc
            "#,
        )
        .bind(id)
        .bind(input.check_in)
        .bind(input.check_out)
        .bind(status.as_str())
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();
        if let Some(ref record) = record {
            info!(
                attendance_id = record.id,
                status = record.status,
                "Attendance updated"
            );
        }

        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn delete_attendance(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_attendance"])
            .start_timer();

        let result = sqlx::query("DELETE FROM attendance_records WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Payroll Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn create_payroll_entry(
        &self,
        input: &CreatePayrollEntry,
    ) -> Result<PayrollEntry, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_payroll_entry"])
            .start_timer();

        let entry = sqlx::query_as::<_, PayrollEntry>(
            r#"
            INSERT INTO payroll_entries (employee_id, entry_type, amount, entry_date, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, employee_id, entry_type, amount, entry_date, note, created_utc
            "#,
        )
        .bind(input.employee_id)
        .bind(input.entry_type.as_str())
        .bind(input.amount)
        .bind(input.entry_date)
        .bind(&input.note)
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(
            payroll_id = entry.id,
            employee_id = entry.employee_id,
            entry_type = entry.entry_type,
            amount = %entry.amount,
            "Payroll entry recorded"
        );

        Ok(entry)
    }

    #[instrument(skip(self, filter))]
    pub async fn list_payroll_entries(
        &self,
        filter: &ListPayrollFilter,
    ) -> Result<Vec<PayrollEntry>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_payroll_entries"])
            .start_timer();

        let entries = sqlx::query_as::<_, PayrollEntry>(
            r#"
            SELECT id, employee_id, entry_type, amount, entry_date, note, created_utc
            FROM payroll_entries
            WHERE ($1::bigint IS NULL OR employee_id = $1)
              AND ($2::text IS NULL OR entry_type = $2)
              AND ($3::date IS NULL OR entry_date >= $3)
              AND ($4::date IS NULL OR entry_date <= $4)
            ORDER BY entry_date DESC, id DESC
            "#,
        )
        .bind(filter.employee_id)
        .bind(filter.entry_type.map(|t| t.as_str()))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(entries)
    }

    #[instrument(skip(self))]
    pub async fn delete_payroll_entry(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_payroll_entry"])
            .start_timer();

        let result = sqlx::query("DELETE FROM payroll_entries WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }
}
