pub mod config;
pub mod feed;
pub mod http_cache;
pub mod http_client;
pub mod markdown;
pub mod nav;
pub mod player_page;
pub mod route;
pub mod search;
pub mod site_data;
pub mod state;
