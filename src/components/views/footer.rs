use chrono::{Datelike, Local};
use dioxus::prelude::*;

use crate::site::site;

pub fn copyright_line(year: i32, artist: &str) -> String {
    format!("© {year} {artist}. All rights reserved.")
}

#[component]
pub fn Footer() -> Element {
    let line = copyright_line(Local::now().year(), &site().artist);

    rsx! {
        footer { class: "py-12 px-6 border-t border-slate-800",
            div { class: "max-w-6xl mx-auto text-center text-slate-400",
                p { class: "text-2xl", "{line}" }
                p { class: "text-xl mt-3", "Made with ❤️ for music lovers everywhere" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copyright_names_year_and_artist() {
        assert_eq!(
            copyright_line(2026, "Mauro Nelson"),
            "© 2026 Mauro Nelson. All rights reserved."
        );
    }
}
