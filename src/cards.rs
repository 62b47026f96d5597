use std::fmt::Write;

use dioxus::prelude::*;

use crate::catalog::{self, Project};

pub const PINNED_CONTAINER_ID: &str = "pinned-projects";

/// Something whose children can be replaced by a markup fragment.
pub trait MarkupHost {
    fn replace_markup(&self, markup: &str);
}

#[cfg(target_arch = "wasm32")]
impl MarkupHost for web_sys::Element {
    fn replace_markup(&self, markup: &str) {
        self.set_inner_html(markup);
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn push_header(out: &mut String, project: &Project, labelled: bool) {
    out.push_str(r#"<div class="project-header"><div class="folder-icon"><i class="far fa-folder"></i></div><div class="project-links">"#);
    let links = [
        (project.github, "GitHub", "fab fa-github"),
        (project.demo, "Live Demo", "fas fa-external-link-alt"),
    ];
    for (href, label, icon) in links {
        out.push_str("<a");
        if !href.trim().is_empty() {
            let _ = write!(out, r#" href="{}""#, escape_html(href));
        }
        out.push_str(r#" target="_blank" rel="noopener noreferrer""#);
        if labelled {
            let _ = write!(out, r#" aria-label="{label}""#);
        }
        let _ = write!(out, r#"><i class="{icon}"></i></a>"#);
    }
    out.push_str("</div></div>");
}

fn push_body(out: &mut String, project: &Project) {
    let _ = write!(
        out,
        "<h3>{}</h3><p>{}</p>",
        escape_html(project.title),
        escape_html(project.description)
    );
    out.push_str(r#"<div class="tech-stack">"#);
    for tech in project.technologies {
        let _ = write!(out, "<span>{}</span>", escape_html(tech));
    }
    out.push_str("</div>");
}

/// Card used in the pinned grid.
pub fn render_card(project: &Project) -> String {
    let mut out = String::from(r#"<div class="project-card">"#);
    push_header(&mut out, project, true);
    out.push_str(r#"<div class="project-content">"#);
    push_body(&mut out, project);
    out.push_str("</div></div>");
    out
}

/// Card placed inside a slideshow slide.
pub fn render_slide_card(project: &Project) -> String {
    let mut out = String::from(r#"<div class="project-card">"#);
    push_header(&mut out, project, false);
    push_body(&mut out, project);
    out.push_str("</div>");
    out
}

pub fn render_cards(projects: &[Project]) -> String {
    projects.iter().map(render_card).collect()
}

/// Replaces the container's content with one card per record. Returns
/// `false` when there is no container to fill.
pub fn populate_pinned<H: MarkupHost>(container: Option<&H>, projects: &[Project]) -> bool {
    let Some(container) = container else {
        return false;
    };
    container.replace_markup(&render_cards(projects));
    true
}

#[component]
pub fn PinnedProjects() -> Element {
    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        let container = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(PINNED_CONTAINER_ID));
        if !populate_pinned(container.as_ref(), catalog::pinned()) {
            tracing::debug!("pinned: container missing, skipping");
        }
    });

    #[cfg(not(target_arch = "wasm32"))]
    let prerendered = render_cards(catalog::pinned());
    #[cfg(target_arch = "wasm32")]
    let prerendered = String::new();

    rsx! {
        section { class: "projects", id: "projects",
            h2 { class: "section-title", "Pinned Projects" }
            div {
                class: "pinned-projects",
                id: PINNED_CONTAINER_ID,
                dangerous_inner_html: "{prerendered}",
            }
        }
    }
}
