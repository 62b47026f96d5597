mod app;
mod cards;
mod catalog;
mod config;
mod matrix;
mod slideshow;
mod social;

fn main() {
    dioxus::launch(app::App);
}
