use finance_dashboard::{config::AppConfig, logging, ui::App};

fn main() {
    logging::init(AppConfig::from_build_env().log_level);
    yew::Renderer::<App>::new().render();
}
