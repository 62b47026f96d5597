use dioxus::prelude::*;

use crate::cards::PinnedProjects;
use crate::catalog;
use crate::config::use_page_config;
use crate::matrix::MatrixBackground;
use crate::slideshow::{Slideshow, SlideshowModal, ViewMoreButton};
use crate::social::SocialLinks;

const MAIN_CSS: Asset = asset!("/assets/main.css");
const ICONS_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

#[component]
pub fn App() -> Element {
    let config = use_page_config();
    use_context_provider(|| config);
    use_context_provider(|| Signal::new(Slideshow::new(catalog::additional().len())));

    rsx! {
        document::Title { "Portfolio" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ICONS_CSS }
        document::Meta { name: "theme-color", content: "#0a192f" }
        MatrixBackground {}
        main { class: "page",
            Hero {}
            PinnedProjects {}
            ViewMoreButton {}
        }
        SlideshowModal {}
        footer { class: "footer",
            SocialLinks {}
        }
    }
}

#[component]
fn Hero() -> Element {
    rsx! {
        section { class: "hero", id: "about",
            p { class: "hero-greeting", "Hi, my name is" }
            h1 { class: "hero-name", "Rishit Tandon." }
            h2 { class: "hero-tagline", "I build things for the web." }
            p { class: "hero-copy",
                "A few of the projects I have shipped are pinned below. The rest live in the slideshow."
            }
        }
    }
}
