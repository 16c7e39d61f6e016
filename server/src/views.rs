//! Server-rendered pages. Every interpolated value goes through [`escape`].

use std::fmt::Write as _;

use axum::response::Html;
use products_hr::Employee;

use crate::forms::EmployeeForm;

const STYLE: &str = "<style>
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; color: black; }
header a { font-weight: bold; text-decoration: none; color: black; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid lightgray; padding: .4rem; text-align: left; }
label { display: block; margin-top: .6rem; }
.notice { padding: .6rem; margin: 1rem 0; }
.success { background: honeydew; }
.error { background: mistyrose; }
</style>";

#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Clone, Copy, Debug)]
pub enum FormMode {
    Add,
    Edit(i64),
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, heading: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{heading} - {title}</title>{style}</head>\n<body>\n<header><a href=\"/\">{title}</a> | <a href=\"/add\">Add employee</a></header>\n<main>\n<h1>{heading}</h1>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
        heading = escape(heading),
        style = STYLE,
    ))
}

fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Success(msg)) => {
            format!("<p class=\"notice success\">{}</p>\n", escape(msg))
        }
        Some(Notice::Error(msg)) => format!("<p class=\"notice error\">{}</p>\n", escape(msg)),
        None => String::new(),
    }
}

pub fn index(
    title: &str,
    employees: &[Employee],
    search: &str,
    notice: Option<&Notice>,
) -> Html<String> {
    let mut body = notice_html(notice);
    let _ = write!(
        body,
        "<form method=\"get\" action=\"/search\">\n<input type=\"search\" name=\"name\" value=\"{}\" placeholder=\"Search by name\">\n<button type=\"submit\">Search</button>\n</form>\n",
        escape(search)
    );

    if employees.is_empty() {
        body.push_str("<p>No employees found.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Email</th><th>Salary</th><th>Department</th><th></th></tr></thead>\n<tbody>\n",
        );
        for employee in employees {
            let _ = writeln!(
                body,
                "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{salary:.2}</td><td>{department}</td><td><a href=\"/edit/{id}\">Edit</a> <a href=\"/delete/{id}\">Delete</a></td></tr>",
                id = employee.id,
                name = escape(&employee.name),
                email = escape(&employee.email),
                salary = employee.salary,
                department = escape(&employee.department),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout(title, "Employees", &body)
}

pub fn employee_form(
    title: &str,
    mode: FormMode,
    form: &EmployeeForm,
    notice: Option<&Notice>,
) -> Html<String> {
    let (heading, action, id_field) = match mode {
        FormMode::Add => (
            "Add employee".to_string(),
            "/add".to_string(),
            format!(
                "<label>ID <input name=\"id\" inputmode=\"numeric\" value=\"{}\" required></label>\n",
                escape(&form.id)
            ),
        ),
        FormMode::Edit(id) => (
            format!("Edit employee {id}"),
            format!("/edit/{id}"),
            format!("<p>ID {id}</p>\n"),
        ),
    };

    let mut body = notice_html(notice);
    let _ = write!(
        body,
        "<form method=\"post\" action=\"{action}\">\n{id_field}<label>Name <input name=\"name\" value=\"{name}\" required></label>\n<label>Email <input name=\"email\" type=\"email\" value=\"{email}\"></label>\n<label>Salary <input name=\"salary\" inputmode=\"decimal\" value=\"{salary}\"></label>\n<label>Department <input name=\"department\" value=\"{department}\"></label>\n<p><button type=\"submit\">Save</button> <a href=\"/\">Back</a></p>\n</form>\n",
        name = escape(&form.name),
        email = escape(&form.email),
        salary = escape(&form.salary),
        department = escape(&form.department),
    );

    layout(title, &heading, &body)
}

pub fn delete_confirm(title: &str, employee: &Employee) -> Html<String> {
    let body = format!(
        "<p>Delete this employee?</p>\n<dl>\n<dt>ID</dt><dd>{id}</dd>\n<dt>Name</dt><dd>{name}</dd>\n<dt>Email</dt><dd>{email}</dd>\n<dt>Salary</dt><dd>{salary:.2}</dd>\n<dt>Department</dt><dd>{department}</dd>\n</dl>\n<form method=\"post\" action=\"/delete/{id}\">\n<button type=\"submit\">Delete</button> <a href=\"/\">Cancel</a>\n</form>\n",
        id = employee.id,
        name = escape(&employee.name),
        email = escape(&employee.email),
        salary = employee.salary,
        department = escape(&employee.department),
    );
    layout(title, "Delete employee", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn index_lists_rows_and_escapes_values() {
        let employees = vec![Employee::new(
            5,
            "<script>alert(1)</script>",
            "e@x.com",
            1234.5,
            "R&D",
        )];
        let Html(page) = index("Directory", &employees, "", None);
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("R&amp;D"));
        assert!(page.contains("1234.50"));
        assert!(page.contains("href=\"/edit/5\""));
    }

    #[test]
    fn empty_index_says_so() {
        let notice = Notice::Error("store error: boom".into());
        let Html(page) = index("Directory", &[], "zzz", Some(&notice));
        assert!(page.contains("No employees found."));
        assert!(page.contains("notice error"));
        assert!(page.contains("value=\"zzz\""));
    }

    #[test]
    fn edit_form_posts_to_its_id() {
        let form = EmployeeForm::from_employee(&Employee::new(8, "Ann", "a@x.com", 1.0, "Eng"));
        let Html(page) = employee_form("Directory", FormMode::Edit(8), &form, None);
        assert!(page.contains("action=\"/edit/8\""));
        assert!(!page.contains("name=\"id\""));
    }
}
