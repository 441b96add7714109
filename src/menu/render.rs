//! Fixed-width text rendering of records.

use studentdb_core::format_date;

use crate::common::{Employee, Student};

/// Width of the `=` rulers around the student table.
pub const STUDENT_RULE_WIDTH: usize = 100;

/// Width of the `=` rulers around the employee table and menus.
pub const NARROW_RULE_WIDTH: usize = 50;

pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

fn gpa_text(gpa: Option<f64>) -> String {
    gpa.map(|g| format!("{:.2}", g)).unwrap_or_default()
}

fn salary_text(salary: Option<f64>) -> String {
    salary.map(|s| s.to_string()).unwrap_or_default()
}

/// Students as a table with a trailing count line.
///
/// Columns are padded to their width; longer values push the rest of the
/// row to the right rather than being cut.
///
/// # Layout
/// ```text
/// ====================...
/// ID    Name                 Email                          Department      GPA   Enrollment Date
/// ====================...
/// 1     Alice Johnson        alice.j@university.edu         Physics         3.80  2022-08-15
/// ====================...
/// Total Students: 1
/// ```
pub fn student_table(students: &[Student]) -> String {
    let mut lines = vec![
        String::new(),
        rule(STUDENT_RULE_WIDTH),
        format!(
            "{:<5} {:<20} {:<30} {:<15} {:<5} {}",
            "ID", "Name", "Email", "Department", "GPA", "Enrollment Date"
        ),
        rule(STUDENT_RULE_WIDTH),
    ];

    for s in students {
        lines.push(format!(
            "{:<5} {:<20} {:<30} {:<15} {:<5} {}",
            s.id,
            s.name,
            s.email,
            s.department.as_deref().unwrap_or(""),
            gpa_text(s.gpa),
            s.enrollment_date.map(format_date).unwrap_or_default()
        ));
    }

    lines.push(rule(STUDENT_RULE_WIDTH));
    lines.push(format!("Total Students: {}\n", students.len()));
    lines.join("\n")
}

/// One student, one field per line.
pub fn student_detail(s: &Student) -> String {
    [
        "\nStudent Found:".to_string(),
        format!("  ID: {}", s.id),
        format!("  Name: {}", s.name),
        format!("  Email: {}", s.email),
        format!("  Department: {}", s.department.as_deref().unwrap_or("")),
        format!("  GPA: {}", gpa_text(s.gpa)),
        format!(
            "  Enrollment Date: {}",
            s.enrollment_date.map(format_date).unwrap_or_default()
        ),
    ]
    .join("\n")
}

pub fn employee_table(employees: &[Employee]) -> String {
    let mut lines = vec![
        String::new(),
        rule(NARROW_RULE_WIDTH),
        format!("{:<8} {:<20} {}", "ID", "Name", "Salary"),
        rule(NARROW_RULE_WIDTH),
    ];

    for e in employees {
        lines.push(format!("{:<8} {:<20} {}", e.id, e.name, salary_text(e.salary)));
    }

    lines.push(rule(NARROW_RULE_WIDTH));
    lines.push(format!("Total Employees: {}\n", employees.len()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use studentdb_core::{parse_date, NewStudent};

    fn alice() -> Student {
        NewStudent::new("Alice", "alice@uni.edu")
            .with_department("Physics")
            .with_gpa(3.5)
            .with_enrollment_date(parse_date("2022-08-15").unwrap())
            .into_student(1)
    }

    #[test]
    fn test_student_table_rows_and_count() {
        let table = student_table(&[alice()]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[1], rule(STUDENT_RULE_WIDTH));
        assert!(lines[2].starts_with("ID    Name"));
        assert_eq!(
            lines[4],
            format!(
                "{:<5} {:<20} {:<30} {:<15} {:<5} {}",
                1, "Alice", "alice@uni.edu", "Physics", "3.50", "2022-08-15"
            )
        );
        assert!(table.contains("Total Students: 1"));
    }

    #[test]
    fn test_missing_fields_render_blank() {
        let student = NewStudent::new("Bob", "bob@uni.edu").into_student(2);
        let detail = student_detail(&student);
        assert!(detail.contains("  Department: \n"));
        assert!(detail.contains("  GPA: \n"));
        assert!(detail.ends_with("  Enrollment Date: "));
    }

    #[test]
    fn test_employee_table() {
        let table = employee_table(&[
            Employee::new(101, "John", Some(55000.0)),
            Employee::new(102, "Jane", None),
        ]);
        assert!(table.contains(&format!("{:<8} {:<20} {}", 101, "John", 55000)));
        assert!(table.contains("Total Employees: 2"));
    }
}
