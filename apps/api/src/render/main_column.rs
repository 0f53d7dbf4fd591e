use crate::profile::ProfileStore;
use crate::render::{escape_html, external_link, reveal_item};
use crate::reveal::RevealOptions;

const CTA_HEADING: &str = "Impulsemos juntos la excelencia sanitaria";
const CTA_BODY: &str = "Disponible para integrarme en equipos de alto rendimiento en emergencias \
                        y coordinación de servicios de salud.";

/// Summary, experience timeline, education cards and the contact call-to-action.
pub(super) fn render_main(html: &mut String, profile: &ProfileStore) {
    html.push_str("<main class=\"content\"><div class=\"content-inner\">");

    reveal_item(html, RevealOptions::default(), |html| {
        html.push_str("<section class=\"about\"><span class=\"eyebrow\">Perfil Profesional</span>");
        html.push_str("<h2>Sobre mí</h2>");
        html.push_str(&format!(
            "<blockquote class=\"summary\">&ldquo;{}&rdquo;</blockquote></section>",
            escape_html(&profile.personal_info().summary)
        ));
    });

    render_experience(html, profile);
    render_education(html, profile);
    render_call_to_action(html, profile);

    html.push_str("</div></main>");
}

fn section_heading(html: &mut String, icon_class: &str, title: &str) {
    reveal_item(html, RevealOptions::default(), |html| {
        html.push_str(&format!(
            "<div class=\"section-heading\"><span class=\"section-icon {icon_class}\" aria-hidden=\"true\"></span><h2>{title}</h2></div>"
        ));
    });
}

fn render_experience(html: &mut String, profile: &ProfileStore) {
    html.push_str("<section class=\"experience\">");
    section_heading(html, "icon-briefcase", "Trayectoria Profesional");

    html.push_str("<ol class=\"timeline\">");
    for (idx, entry) in profile.experience().iter().enumerate() {
        html.push_str("<li class=\"timeline-item\">");
        reveal_item(html, RevealOptions::staggered(idx), |html| {
            html.push_str("<article class=\"card experience-card\"><div class=\"card-top\"><div>");
            html.push_str(&format!("<h3>{}</h3>", escape_html(&entry.company)));
            html.push_str(&format!(
                "<div class=\"role\">{}</div></div>",
                escape_html(&entry.role)
            ));
            html.push_str(&format!(
                "<span class=\"period\">{}</span></div>",
                escape_html(&entry.period)
            ));
            html.push_str(&format!(
                "<div class=\"meta\"><span class=\"location\">{}</span><span class=\"dot\"></span><span class=\"duration\">{}</span></div>",
                escape_html(&entry.location),
                escape_html(&entry.duration)
            ));
            html.push_str(&format!(
                "<p class=\"description\">{}</p></article>",
                escape_html(&entry.description)
            ));
        });
        html.push_str("</li>");
    }
    html.push_str("</ol></section>");
}

fn render_education(html: &mut String, profile: &ProfileStore) {
    html.push_str("<section class=\"education\">");
    section_heading(html, "icon-cap", "Formación Académica");

    html.push_str("<div class=\"education-grid\">");
    for (idx, entry) in profile.education().iter().enumerate() {
        reveal_item(html, RevealOptions::staggered(idx), |html| {
            html.push_str("<article class=\"card education-card\">");
            html.push_str(&format!("<h3>{}</h3>", escape_html(&entry.degree)));
            html.push_str(&format!(
                "<div class=\"card-bottom\"><span class=\"institution\">{}</span><span class=\"period\">{}</span></div>",
                escape_html(&entry.institution),
                escape_html(&entry.period)
            ));
            html.push_str("</article>");
        });
    }
    html.push_str("</div></section>");
}

fn render_call_to_action(html: &mut String, profile: &ProfileStore) {
    let link = profile.personal_info().linkedin_url();
    reveal_item(html, RevealOptions::default(), |html| {
        html.push_str("<section class=\"cta\">");
        html.push_str(&format!("<h2>{CTA_HEADING}</h2><p>{CTA_BODY}</p>"));
        html.push_str(&external_link(&link, "cta-button", "Conectar en LinkedIn"));
        html.push_str("</section>");
    });
}
