//! Info panel content.
//!
//! Every renderer returns an HTML fragment; interpolated outlet fields are
//! escaped.

use catchment_core::Outlet;

pub const LOAD_ERROR_HTML: &str =
    r#"<p class="error">Failed to load outlets. Please try again later.</p>"#;

/// The result/info panel next to the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPanel {
    html: String,
}

impl InfoPanel {
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn set(&mut self, html: String) {
        self.html = html;
    }

    pub fn show_load_error(&mut self) {
        self.html = LOAD_ERROR_HTML.to_string();
    }
}

/// Marker popup: name, then address, hours and navigation link when present.
#[must_use]
pub fn popup_html(outlet: &Outlet) -> String {
    let mut content = format!("<strong>{}</strong>", html_escape(&outlet.name));

    if let Some(address) = &outlet.address {
        content.push_str(&format!("<br><span>{}</span>", html_escape(address)));
    }
    if let Some(hours) = &outlet.operating_hours {
        content.push_str(&format!("<br><span>Hours: {}</span>", html_escape(hours)));
    }
    if let Some(link) = &outlet.waze_link {
        content.push_str(&format!(
            r#"<br><a href="{}" target="_blank">Navigate with Waze</a>"#,
            html_escape(link)
        ));
    }
    content
}

/// Full outlet detail for the panel.
#[must_use]
pub fn outlet_detail_html(outlet: &Outlet) -> String {
    let mut content = format!("<h3>{}</h3>", html_escape(&outlet.name));

    if let Some(address) = &outlet.address {
        content.push_str(&format!(
            "<p><strong>Address:</strong> {}</p>",
            html_escape(address)
        ));
    }
    if let Some(hours) = &outlet.operating_hours {
        content.push_str(&format!(
            "<p><strong>Operating Hours:</strong> {}</p>",
            html_escape(hours)
        ));
    }
    if let Some(link) = &outlet.waze_link {
        content.push_str(&format!(
            r#"<p><a href="{}" target="_blank">Navigate with Waze</a></p>"#,
            html_escape(link)
        ));
    }
    content.push_str(&format!(
        "<p><strong>Coordinates:</strong> {}, {}</p>",
        coordinate_text(outlet.latitude),
        coordinate_text(outlet.longitude)
    ));
    content
}

/// Summary shown when an overlap highlight is clicked.
#[must_use]
pub fn overlap_html(first: &Outlet, second: &Outlet) -> String {
    format!(
        "<h3>Overlapping Catchment Areas</h3>\
         <p>This area is covered by multiple Subway outlets:</p>\
         <ul><li>{}</li><li>{}</li></ul>",
        html_escape(&first.name),
        html_escape(&second.name)
    )
}

/// Titled list of search results; each item carries its outlet ID.
#[must_use]
pub fn search_results_html(title: &str, outlets: &[Outlet]) -> String {
    let mut content = format!("<h3>{}</h3>", html_escape(title));

    if outlets.is_empty() {
        content.push_str("<p>No outlets found.</p>");
        return content;
    }

    content.push_str(r#"<ul class="outlet-list">"#);
    for outlet in outlets {
        content.push_str(&format!(
            r#"<li class="outlet-item" data-id="{}"><strong>{}</strong>"#,
            outlet.id,
            html_escape(&outlet.name)
        ));
        if let Some(hours) = &outlet.operating_hours {
            content.push_str(&format!("<br>Hours: {}", html_escape(hours)));
        }
        content.push_str("</li>");
    }
    content.push_str("</ul>");
    content
}

fn coordinate_text(value: Option<f64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
