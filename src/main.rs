use dioxus::prelude::*;

mod auth;
mod components;
mod db;
mod newsletter;
mod playback;
mod scroll;
mod site;

use components::SiteShell;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const SITE_CSS: Asset = asset!("/assets/styling/site.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let title = &site::site().artist;

    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Title { "{title}" }

        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#0f172a" }
        document::Meta {
            name: "description",
            content: "Singer, songwriter and storyteller from Belgium.",
        }

        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: SITE_CSS }

        SiteShell {}
    }
}
