//! Profile Renderer: composes the profile store into the résumé page.
//!
//! Pure string building: same store and year in, same HTML out. Interactive
//! behaviour (reveal animation, assistant panel) lives in `assets/app.js`,
//! which reads the `data-*` attributes written here.

mod main_column;
mod sidebar;

use crate::profile::ProfileStore;
use crate::reveal::{RevealOptions, RevealState};

pub const ASSISTANT_SESSIONS_PATH: &str = "/api/v1/assistant/sessions";

/// Renders the full page.
pub fn render_page(profile: &ProfileStore, year: i32) -> String {
    let info = profile.personal_info();
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\" />");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />",
    );
    html.push_str(&format!(
        "<title>{} | {}</title>",
        escape_html(&info.name),
        escape_html(&info.title)
    ));
    html.push_str("<link rel=\"stylesheet\" href=\"/assets/styles.css\" />");
    html.push_str(
        "<noscript><style>.reveal{opacity:1;transform:none}</style></noscript>",
    );
    html.push_str("</head><body><div class=\"layout\">");

    sidebar::render_sidebar(&mut html, profile, year);
    main_column::render_main(&mut html, profile);

    html.push_str("</div>");
    render_assistant_shell(&mut html);
    html.push_str("<script src=\"/assets/app.js\" defer></script>");
    html.push_str("</body></html>");
    html
}

/// Launcher button plus the empty panel the client script fills in.
fn render_assistant_shell(html: &mut String) {
    html.push_str(
        "<button type=\"button\" id=\"assistant-toggle\" class=\"assistant-toggle\" \
         aria-controls=\"assistant-panel\" aria-expanded=\"false\">\
         <span class=\"assistant-toggle-icon\" aria-hidden=\"true\">💬</span>\
         <span class=\"assistant-toggle-hint\">Pregúntame algo</span></button>",
    );
    html.push_str(&format!(
        "<section id=\"assistant-panel\" class=\"assistant\" data-sessions=\"{ASSISTANT_SESSIONS_PATH}\" hidden>"
    ));
    html.push_str(
        "<header class=\"assistant-header\"><span class=\"assistant-badge\" aria-hidden=\"true\">✦</span>\
         <div><span class=\"assistant-name\">AI Assistant</span>\
         <span class=\"assistant-status\">En línea</span></div></header>",
    );
    html.push_str(
        "<div id=\"assistant-messages\" class=\"assistant-messages\" aria-live=\"polite\"></div>",
    );
    html.push_str(
        "<div id=\"assistant-loading\" class=\"assistant-loading\" hidden>Generando respuesta</div>",
    );
    html.push_str(
        "<form id=\"assistant-form\" class=\"assistant-form\">\
         <input id=\"assistant-input\" type=\"text\" autocomplete=\"off\" \
         placeholder=\"Escribe tu consulta profesional...\" />\
         <button type=\"submit\" id=\"assistant-send\" disabled>Enviar</button></form>",
    );
    html.push_str("</section>");
}

/// Wraps `body` in a reveal container. Items start hidden; the client flips
/// them to `reveal active` once they cross the threshold.
pub(crate) fn reveal_item(html: &mut String, options: RevealOptions, body: impl FnOnce(&mut String)) {
    html.push_str(&format!(
        "<div class=\"{}\" data-reveal-threshold=\"{}\" data-reveal-margin=\"{}\" \
         style=\"transition-delay: {}ms\">",
        RevealState::Hidden.css_class(),
        options.threshold,
        options.root_margin.to_css(),
        options.delay_ms
    ));
    body(html);
    html.push_str("</div>");
}

/// External link that opens in a new browsing context.
pub(crate) fn external_link(href: &str, class: &str, label_html: &str) -> String {
    format!(
        "<a class=\"{class}\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{label_html}</a>",
        escape_html(href)
    )
}

pub(crate) fn escape_html(input: &str) -> String {
    input
        .chars()
        .map(|ch| match ch {
            '<' => "&lt;".into(),
            '>' => "&gt;".into(),
            '&' => "&amp;".into(),
            '"' => "&quot;".into(),
            '\'' => "&#39;".into(),
            _ => ch.to_string(),
        })
        .collect::<String>()
}
