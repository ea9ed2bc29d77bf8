use dioxus::prelude::*;
use services::Notice;

#[component]
pub fn Toast(notice: Option<Notice>) -> Element {
    let Some(notice) = notice else {
        return rsx! {};
    };
    rsx! {
        div {
            class: if notice.is_error() { "toast error" } else { "toast success" },
            role: "status",
            "{notice.message()}"
        }
    }
}
