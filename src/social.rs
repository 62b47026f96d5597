use dioxus::prelude::*;

const MAILTO_SCHEME: &str = "mailto:";

const SOCIAL_LINKS: &[(&str, &str, &str)] = &[
    ("GitHub", "https://github.com/RishitTandon7", "fab fa-github"),
    ("LinkedIn", "https://www.linkedin.com/in/rishittandon7", "fab fa-linkedin"),
    ("Email", "mailto:rishit.tandon@example.com", "fas fa-envelope"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    /// Let the browser follow the link as usual.
    Default,
    /// Open in a fresh tab with no opener and no referrer.
    OpenIsolated(String),
}

pub fn classify_href(href: Option<&str>) -> LinkAction {
    match href.map(str::trim) {
        None | Some("") => LinkAction::Default,
        Some(href) if href.to_ascii_lowercase().starts_with(MAILTO_SCHEME) => LinkAction::Default,
        Some(href) => LinkAction::OpenIsolated(href.to_string()),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn open_isolated(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if window
        .open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")
        .is_err()
    {
        tracing::warn!("social: window.open rejected for {url}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_isolated(url: &str) {
    tracing::debug!("social: would open {url}");
}

#[component]
pub fn SocialIcon(label: String, href: Option<String>, icon: String) -> Element {
    let action = classify_href(href.as_deref());
    rsx! {
        a {
            class: "social-icon",
            href: href.clone(),
            aria_label: "{label}",
            onclick: move |event| {
                if let LinkAction::OpenIsolated(url) = &action {
                    event.prevent_default();
                    open_isolated(url);
                }
            },
            i { class: "{icon}" }
        }
    }
}

#[component]
pub fn SocialLinks() -> Element {
    rsx! {
        div { class: "social-links",
            for (label, href, icon) in SOCIAL_LINKS.iter().copied() {
                SocialIcon {
                    key: "{label}",
                    label: label.to_string(),
                    href: Some(href.to_string()),
                    icon: icon.to_string(),
                }
            }
        }
    }
}
