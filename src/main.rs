mod app;
mod commands;
mod components;
mod format;
mod pages;
mod session;
mod theme;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
