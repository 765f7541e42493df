//! HTML rendering of the single-page form.

use medisurv_form::{Field, Outcome, TextInputs};
use std::fmt::Write;

pub const TITLE: &str = "🩺 Breast Cancer 10-Year Mortality Prediction App";
pub const PREDICT_BUTTON: &str = "🔍 Predict 10-Year Survival";

/// What to show under the form after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Outcome(Outcome),
    Error(String),
}

const STYLE: &str = "body{font-family:sans-serif;max-width:44rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.8rem;font-weight:600}\
input,select{width:100%;padding:.4rem;margin-top:.2rem}\
button{margin-top:1.2rem;padding:.5rem 1rem}\
.banner{margin-top:1.2rem;padding:.8rem;border-radius:.3rem}\
.success{background:#d4edda;color:#155724}.error{background:#f8d7da;color:#721c24}";

pub fn render_page(values: &TextInputs, banner: Option<&Banner>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(TITLE));
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(TITLE));
    html.push_str(
        "<p>This app predicts the <strong>10-year survival</strong> for breast cancer patients \
         based on clinical features.</p>\n",
    );
    html.push_str("<h2>Enter Patient Details:</h2>\n");
    html.push_str("<form method=\"post\" action=\"/predict\">\n");
    for field in Field::ALL {
        render_control(&mut html, field, values.get(field));
    }
    let _ = writeln!(
        html,
        "<button type=\"submit\">{}</button>\n</form>",
        escape_html(PREDICT_BUTTON)
    );

    match banner {
        Some(Banner::Outcome(outcome)) => {
            let class = if outcome.is_favorable() { "success" } else { "error" };
            let _ = writeln!(
                html,
                "<div class=\"banner {class}\">{}</div>",
                escape_html(outcome.message())
            );
        }
        Some(Banner::Error(message)) => {
            let _ = writeln!(
                html,
                "<div class=\"banner error\">Error: {}</div>",
                escape_html(message)
            );
        }
        None => {}
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn render_control(html: &mut String, field: Field, current: &str) {
    let key = field.key();
    let _ = writeln!(
        html,
        "<label for=\"{key}\">{}</label>",
        escape_html(field.label())
    );
    match field.options() {
        Some(options) => {
            let _ = writeln!(html, "<select id=\"{key}\" name=\"{key}\">");
            for option in options {
                let selected = if option == current { " selected" } else { "" };
                let _ = writeln!(
                    html,
                    "<option value=\"{0}\"{selected}>{0}</option>",
                    escape_html(option)
                );
            }
            html.push_str("</select>\n");
        }
        None => {
            let (min, max, step) = match field {
                Field::Age => ("20", "100", "1"),
                _ => ("0.0", "200.0", "0.01"),
            };
            let _ = writeln!(
                html,
                "<input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" \
                 step=\"{step}\" value=\"{}\" required>",
                escape_html(current)
            );
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
