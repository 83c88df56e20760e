mod app;
mod commands;
mod components;
mod labels;
mod pages;
mod params;
mod remote;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
