use crate::profile::ProfileStore;
use crate::render::{escape_html, external_link};

/// Identity block, contact list, skill tags, language bars and footer.
pub(super) fn render_sidebar(html: &mut String, profile: &ProfileStore, year: i32) {
    let info = profile.personal_info();

    html.push_str("<aside class=\"sidebar\"><div class=\"sidebar-inner\">");

    html.push_str("<div class=\"identity\">");
    html.push_str(&format!(
        "<span class=\"monogram\">{}</span>",
        escape_html(&info.initials())
    ));
    html.push_str(&format!("<h1>{}</h1>", escape_html(&info.name)));
    html.push_str(&format!(
        "<p class=\"headline\">{}</p>",
        escape_html(&info.title)
    ));
    html.push_str("</div>");

    html.push_str("<section class=\"sidebar-section\"><h2>Información</h2><ul class=\"contact-list\">");
    html.push_str("<li>");
    html.push_str(&external_link(
        &info.linkedin_url(),
        "contact-link",
        "<span class=\"contact-icon\" aria-hidden=\"true\">in</span>LinkedIn Profile",
    ));
    html.push_str("</li>");
    html.push_str(&format!(
        "<li class=\"contact-location\"><span class=\"contact-icon\" aria-hidden=\"true\">⌖</span>{}</li>",
        escape_html(&info.location)
    ));
    html.push_str("</ul></section>");

    html.push_str("<section class=\"sidebar-section\"><h2>Aptitudes Clave</h2><ul class=\"skills\">");
    for skill in profile.skills() {
        html.push_str(&format!(
            "<li class=\"skill-tag\">{}</li>",
            escape_html(skill)
        ));
    }
    html.push_str("</ul></section>");

    html.push_str("<section class=\"sidebar-section\"><h2>Idiomas</h2><ul class=\"languages\">");
    for lang in profile.languages() {
        html.push_str("<li class=\"language\"><div class=\"language-label\">");
        html.push_str(&format!(
            "<span class=\"language-name\">{}</span><span class=\"language-level\">{}</span>",
            escape_html(&lang.name),
            escape_html(&lang.proficiency)
        ));
        html.push_str(&format!(
            "</div><div class=\"language-track\"><div class=\"language-fill\" style=\"width: {}%\"></div></div></li>",
            lang.fill_percent()
        ));
    }
    html.push_str("</ul></section>");

    html.push_str(&format!(
        "<footer class=\"sidebar-footer\">&copy; {year} {}</footer>",
        escape_html(&info.name)
    ));
    html.push_str("</div></aside>");
}
