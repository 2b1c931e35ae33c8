//! Printable report documents: self-contained RTL Arabic HTML with inline
//! CSS, one renderer per report sharing a common shell. Each document prints
//! itself on load and closes its window shortly after, matching how the
//! office opens these reports in a popup.

use crate::ledger::{DateRange, Statement};
use crate::models::{CustodySummary, Employee, Project, SupplierAccount};
use rust_decimal::Decimal;

const STYLE: &str = r#"
body { font-family: Tahoma, Arial, sans-serif; margin: 24px; color: #1a1a1a; }
h1 { font-size: 20px; margin: 0 0 4px; }
.subject { font-size: 16px; margin: 0 0 2px; }
.period { color: #555; margin: 0 0 16px; }
.summary { display: flex; gap: 12px; margin-bottom: 16px; }
.summary div { border: 1px solid #ccc; border-radius: 4px; padding: 8px 14px; }
.summary .label { display: block; font-size: 12px; color: #555; }
.summary .value { font-size: 16px; font-weight: bold; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #999; padding: 6px 10px; text-align: right; }
th { background: #eee; }
tr.opening td { color: #555; }
tr.totals td { font-weight: bold; background: #f5f5f5; }
"#;

const PRINT_SCRIPT: &str = r#"
window.onload = function () {
  window.print();
  setTimeout(function () { window.close(); }, 10000);
};
"#;

/// Supplier account statement document.
pub fn supplier_statement(
    supplier: &SupplierAccount,
    statement: &Statement,
    range: DateRange,
) -> String {
    let summary = [
        ("إجمالي الفواتير", statement.total_debits),
        ("إجمالي المدفوعات", statement.total_credits),
        ("الرصيد المستحق", statement.closing_balance),
    ];
    render_document("كشف حساب مورد", &supplier.name, range, &summary, statement)
}

/// Custody report document.
pub fn custody_report(custody: &CustodySummary, statement: &Statement, range: DateRange) -> String {
    let subject = format!("{} ({})", custody.name, custody.holder);
    let summary = [
        ("الميزانية", custody.budget),
        ("إجمالي الإضافات", statement.total_debits),
        ("إجمالي المصروفات", statement.total_credits),
        ("المتبقي", statement.closing_balance),
    ];
    render_document("تقرير عهدة", &subject, range, &summary, statement)
}

/// Project report document.
pub fn project_report(project: &Project, statement: &Statement, range: DateRange) -> String {
    let subject = match project.location.as_deref() {
        Some(location) => format!("{} ({})", project.name, location),
        None => project.name.clone(),
    };
    let summary = [
        ("إجمالي الفواتير", statement.total_debits),
        ("إجمالي المصروفات", statement.total_credits),
        ("الصافي", statement.closing_balance),
    ];
    render_document("تقرير مشروع", &subject, range, &summary, statement)
}

/// Employee payroll report document.
pub fn payroll_report(employee: &Employee, statement: &Statement, range: DateRange) -> String {
    let subject = format!("{} ({})", employee.name, employee.job_title);
    let summary = [
        ("إجمالي المستحقات", statement.total_debits),
        ("إجمالي السلف والخصومات", statement.total_credits),
        ("صافي المستحق", statement.closing_balance),
    ];
    render_document("تقرير رواتب موظف", &subject, range, &summary, statement)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

/// Zero sides of a ledger row render as an empty cell.
fn amount_cell(amount: Decimal) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        format_amount(amount)
    }
}

fn period_label(range: DateRange) -> String {
    match (range.start, range.end) {
        (None, None) => "كامل المدة".to_string(),
        (Some(start), None) => format!("الفترة: من {start}"),
        (None, Some(end)) => format!("الفترة: حتى {end}"),
        (Some(start), Some(end)) => format!("الفترة: من {start} إلى {end}"),
    }
}

fn render_document(
    title: &str,
    subject: &str,
    range: DateRange,
    summary: &[(&str, Decimal)],
    statement: &Statement,
) -> String {
    let period = period_label(range);
    let subject = escape_html(subject);

    let mut summary_cards = String::new();
    for (label, value) in summary {
        summary_cards.push_str(&format!(
            "<div><span class=\"label\">{label}</span><span class=\"value\">{}</span></div>\n",
            format_amount(*value)
        ));
    }

    // Lines arrive newest-first, so the opening balance closes the table.
    let mut rows = String::new();
    for line in &statement.lines {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            line.date,
            escape_html(&line.description),
            amount_cell(line.debit),
            amount_cell(line.credit),
            format_amount(line.running_balance),
        ));
    }
    rows.push_str(&format!(
        "<tr class=\"opening\"><td></td><td>رصيد افتتاحي</td><td></td><td></td><td>{}</td></tr>\n",
        format_amount(statement.opening_balance)
    ));

    let totals = format!(
        "<tr class=\"totals\"><td></td><td>الإجمالي</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        format_amount(statement.total_debits),
        format_amount(statement.total_credits),
        format_amount(statement.closing_balance),
    );

    format!(
        r#"<!DOCTYPE html>
<html dir="rtl" lang="ar">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>{title}</h1>
<p class="subject">{subject}</p>
<p class="period">{period}</p>
<div class="summary">
{summary_cards}</div>
<table>
<thead>
<tr><th>التاريخ</th><th>البيان</th><th>مدين</th><th>دائن</th><th>الرصيد</th></tr>
</thead>
<tbody>
{rows}</tbody>
<tfoot>
{totals}
</tfoot>
</table>
<script>{PRINT_SCRIPT}</script>
</body>
</html>
"#
    )
}
